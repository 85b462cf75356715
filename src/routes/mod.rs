mod categories;
mod home;
mod movies;

use std::sync::Arc;

use axum::{
    extract::FromRequest,
    routing::{get, put},
    Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::error::AppError;
use crate::store::CatalogStore;

/// Shared handler state: the injected catalog store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

impl AppState {
    pub fn new(store: impl CatalogStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// JSON request body whose rejections (bad syntax, wrong field types, missing
/// content type) are reported as 400 with the usual `{"message"}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path ids that are not UUIDs can never name a record, so they are reported
/// as not found without consulting the store.
fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, AppError> {
    Uuid::try_parse(raw).map_err(|_| AppError::NotFound(not_found.to_string()))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        home::root,
        movies::list_movies,
        movies::list_trending_movies,
        movies::create_movie,
        movies::update_movie,
        movies::delete_movie,
        categories::list_categories,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
    ),
    components(
        schemas(
            home::RootResponse,
            MessageResponse,
            movies::CreateMovieRequest,
            movies::UpdateMovieRequest,
            movies::MovieResponse,
            movies::CategorySummary,
            categories::CategoryRequest,
            categories::CategoryResponse,
        )
    ),
    tags(
        (name = "General", description = "General API information"),
        (name = "Movies", description = "Movie catalog endpoints"),
        (name = "Categories", description = "Category management endpoints")
    ),
    info(
        title = "Movie Catalog API",
        version = "0.1.0",
        description = "A Rust/Axum backend for a movie catalog with categories and trending listings",
    )
)]
struct ApiDoc;

pub fn create_routes(state: AppState) -> Router {
    let swagger_router: Router = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into();

    let api_routes = Router::new()
        .route("/", get(home::root))
        .route(
            "/api/movies",
            get(movies::list_movies).post(movies::create_movie),
        )
        .route("/api/movies/trending", get(movies::list_trending_movies))
        .route(
            "/api/movies/{id}",
            put(movies::update_movie).delete(movies::delete_movie),
        )
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/categories/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
        .with_state(state);

    Router::new()
        .merge(swagger_router)
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
