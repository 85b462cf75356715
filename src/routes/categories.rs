use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{parse_id, AppState, JsonBody, MessageResponse};
use crate::entities::category;
use crate::error::{AppError, AppResult};

const CATEGORY_NOT_FOUND: &str = "Category not found";

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CategoryRequest {
    name: Option<String>,
}

impl CategoryRequest {
    fn into_name(self) -> AppResult<String> {
        self.name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::Validation("Category name is required".to_string()))
    }
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    id: Uuid,
    name: String,
    created_at: chrono::NaiveDateTime,
    updated_at: chrono::NaiveDateTime,
}

impl From<category::Model> for CategoryResponse {
    fn from(category: category::Model) -> Self {
        CategoryResponse {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = [CategoryResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryResponse>>> {
    let categories = state.store.list_categories().await?;
    tracing::debug!(count = categories.len(), "Fetched categories");

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, description = "Missing or duplicate name", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CategoryRequest>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    let name = payload.into_name()?;
    let created = state.store.create_category(name).await?;

    tracing::info!(category_id = %created.id, name = %created.name, "Category created");
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(created))))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated successfully", body = CategoryResponse),
        (status = 400, description = "Missing or duplicate name", body = MessageResponse),
        (status = 404, description = "Category not found", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<CategoryRequest>,
) -> AppResult<Json<CategoryResponse>> {
    let id = parse_id(&id, CATEGORY_NOT_FOUND)?;
    let name = payload.into_name()?;

    let updated = state
        .store
        .rename_category(id, name)
        .await?
        .ok_or_else(|| AppError::NotFound(CATEGORY_NOT_FOUND.to_string()))?;

    tracing::info!(category_id = %id, name = %updated.name, "Category updated");
    Ok(Json(CategoryResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted successfully", body = MessageResponse),
        (status = 400, description = "Movies still reference the category", body = MessageResponse),
        (status = 404, description = "Category not found", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id, CATEGORY_NOT_FOUND)?;

    if !state.store.delete_category(id).await? {
        return Err(AppError::NotFound(CATEGORY_NOT_FOUND.to_string()));
    }

    tracing::info!(category_id = %id, "Category deleted");
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
