use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// Uniqueness or reference violations. Reported as 400, not 409.
    #[error("{0}")]
    Conflict(String),
    #[error("store error: {0}")]
    Store(#[source] sea_orm::DbErr),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Store(e) => {
                tracing::error!(error = %e, "Store operation failed");
                "Internal server error".to_string()
            }
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
                tracing::warn!(status = status.as_u16(), "{msg}");
                msg
            }
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName => {
                AppError::Conflict("Category name already exists".to_string())
            }
            StoreError::CategoryInUse => AppError::Conflict(
                "Cannot delete category: movies are still associated with it".to_string(),
            ),
            StoreError::UnknownCategory => AppError::Validation("Invalid category ID".to_string()),
            StoreError::Db(e) => AppError::Store(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_surface_as_bad_request() {
        let err = AppError::from(StoreError::CategoryInUse);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Cannot delete category: movies are still associated with it"
        );
        assert_eq!(
            AppError::from(StoreError::DuplicateName).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn dangling_category_is_a_validation_error() {
        let err = AppError::from(StoreError::UnknownCategory);
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn database_errors_hide_details() {
        let err = AppError::from(StoreError::Db(sea_orm::DbErr::Custom(
            "connection reset".to_string(),
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
