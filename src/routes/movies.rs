use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::{parse_id, AppState, JsonBody, MessageResponse};
use crate::entities::category;
use crate::error::{AppError, AppResult};
use crate::services::category_resolver::{resolve_category, CategoryRef};
use crate::store::{MovieChanges, MovieFilter, MovieRecord, NewMovie};

const MOVIE_NOT_FOUND: &str = "Movie not found";

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    title: Option<String>,
    year: Option<String>,
    rating: Option<String>,
    thumbnail_url: Option<String>,
    stream_url: Option<String>,
    /// Category id or exact category name.
    category: Option<String>,
    is_trending: Option<bool>,
}

/// Body of `PUT /api/movies/{id}`.
///
/// Only the fields present in the body are written; omitted fields keep their
/// stored values. A supplied text field must not be empty.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieRequest {
    title: Option<String>,
    year: Option<String>,
    rating: Option<String>,
    thumbnail_url: Option<String>,
    stream_url: Option<String>,
    /// Category id or name; `null` or `""` removes the category, omitting the
    /// field keeps the current one.
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    category: Option<Option<String>>,
    is_trending: Option<bool>,
}

// Distinguishes `"category": null` (Some(None)) from a missing field (None).
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CategorySummary {
    id: Uuid,
    name: String,
}

impl From<category::Model> for CategorySummary {
    fn from(category: category::Model) -> Self {
        CategorySummary {
            id: category.id,
            name: category.name,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    id: Uuid,
    title: String,
    year: String,
    rating: String,
    thumbnail_url: String,
    stream_url: String,
    category: Option<CategorySummary>,
    is_trending: bool,
    created_at: chrono::NaiveDateTime,
    updated_at: chrono::NaiveDateTime,
}

impl From<MovieRecord> for MovieResponse {
    fn from(record: MovieRecord) -> Self {
        let MovieRecord { movie, category } = record;
        MovieResponse {
            id: movie.id,
            title: movie.title,
            year: movie.year,
            rating: movie.rating,
            thumbnail_url: movie.thumbnail_url,
            stream_url: movie.stream_url,
            category: category.map(CategorySummary::from),
            is_trending: movie.is_trending,
            created_at: movie.created_at,
            updated_at: movie.updated_at,
        }
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_empty(field: &str, value: Option<String>) -> AppResult<Option<String>> {
    match value {
        Some(v) if v.is_empty() => Err(AppError::Validation(format!("{field} cannot be empty"))),
        other => Ok(other),
    }
}

#[utoipa::path(
    get,
    path = "/api/movies",
    responses(
        (status = 200, description = "All movies with their category expanded", body = [MovieResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Movies"
)]
pub async fn list_movies(State(state): State<AppState>) -> AppResult<Json<Vec<MovieResponse>>> {
    let movies = state.store.list_movies(MovieFilter::all()).await?;
    tracing::debug!(count = movies.len(), "Fetched movies");

    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/movies/trending",
    responses(
        (status = 200, description = "Movies flagged as trending", body = [MovieResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Movies"
)]
pub async fn list_trending_movies(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MovieResponse>>> {
    let movies = state.store.list_movies(MovieFilter::trending()).await?;
    tracing::debug!(count = movies.len(), "Fetched trending movies");

    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/movies",
    request_body = CreateMovieRequest,
    responses(
        (status = 201, description = "Movie created successfully", body = MovieResponse),
        (status = 400, description = "Missing field or unknown category", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Movies"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<MovieResponse>)> {
    let (Some(title), Some(year), Some(rating), Some(thumbnail_url), Some(stream_url)) = (
        required(payload.title),
        required(payload.year),
        required(payload.rating),
        required(payload.thumbnail_url),
        required(payload.stream_url),
    ) else {
        return Err(AppError::Validation("All fields are required".to_string()));
    };

    let reference = CategoryRef::parse(payload.category.as_deref());
    let category_id = resolve_category(state.store.as_ref(), reference).await?;

    let created = state
        .store
        .create_movie(NewMovie {
            title,
            year,
            rating,
            thumbnail_url,
            stream_url,
            category_id,
            is_trending: payload.is_trending.unwrap_or(false),
        })
        .await?;

    tracing::info!(movie_id = %created.movie.id, title = %created.movie.title, "Movie created");
    Ok((StatusCode::CREATED, Json(MovieResponse::from(created))))
}

#[utoipa::path(
    put,
    path = "/api/movies/{id}",
    params(
        ("id" = String, Path, description = "Movie ID")
    ),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Movie updated successfully", body = MovieResponse),
        (status = 400, description = "Empty field or unknown category", body = MessageResponse),
        (status = 404, description = "Movie not found", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateMovieRequest>,
) -> AppResult<Json<MovieResponse>> {
    let id = parse_id(&id, MOVIE_NOT_FOUND)?;

    let mut changes = MovieChanges {
        title: non_empty("title", payload.title)?,
        year: non_empty("year", payload.year)?,
        rating: non_empty("rating", payload.rating)?,
        thumbnail_url: non_empty("thumbnailUrl", payload.thumbnail_url)?,
        stream_url: non_empty("streamUrl", payload.stream_url)?,
        category_id: None,
        is_trending: payload.is_trending,
    };

    if let Some(raw) = payload.category {
        let reference = CategoryRef::parse(raw.as_deref());
        changes.category_id = Some(resolve_category(state.store.as_ref(), reference).await?);
    }

    let updated = state
        .store
        .update_movie(id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound(MOVIE_NOT_FOUND.to_string()))?;

    tracing::info!(movie_id = %id, "Movie updated");
    Ok(Json(MovieResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/movies/{id}",
    params(
        ("id" = String, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie deleted successfully", body = MessageResponse),
        (status = 404, description = "Movie not found", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id, MOVIE_NOT_FOUND)?;

    if !state.store.delete_movie(id).await? {
        return Err(AppError::NotFound(MOVIE_NOT_FOUND.to_string()));
    }

    tracing::info!(movie_id = %id, "Movie deleted");
    Ok(Json(MessageResponse::new("Movie deleted successfully")))
}
