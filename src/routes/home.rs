use axum::response::Json;
use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service descriptor", body = RootResponse)
    ),
    tag = "General"
)]
pub async fn root() -> Json<RootResponse> {
    let endpoints = [
        "GET /api/movies",
        "GET /api/movies/trending",
        "POST /api/movies",
        "PUT /api/movies/{id}",
        "DELETE /api/movies/{id}",
        "GET /api/categories",
        "POST /api/categories",
        "PUT /api/categories/{id}",
        "DELETE /api/categories/{id}",
        "GET /swagger-ui",
    ];

    Json(RootResponse {
        message: "Movie catalog API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: endpoints.iter().map(|e| e.to_string()).collect(),
    })
}
