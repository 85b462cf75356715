#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use movie_catalog::entities::category;
use movie_catalog::routes::{create_routes, AppState};
use movie_catalog::store::memory::InMemoryStore;
use movie_catalog::store::{
    CatalogStore, CategoryStore, MovieChanges, MovieFilter, MovieRecord, MovieStore, NewMovie,
    StoreError, StoreResult,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub fn app() -> Router {
    create_routes(AppState::new(InMemoryStore::new()))
}

/// Router over a store whose every call fails like a lost database connection.
pub fn failing_app() -> Router {
    create_routes(AppState::new(FailingStore))
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

/// Sends a request and returns the status with the decoded JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (axum::http::StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    (status, read_json(response).await)
}

pub async fn create_category(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        json_request("POST", "/api/categories", serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(status, axum::http::StatusCode::CREATED, "{body}");
    body
}

pub fn movie_payload(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "year": "1995",
        "rating": "8.3",
        "thumbnailUrl": format!("https://cdn.example.com/{title}.jpg"),
        "streamUrl": format!("https://cdn.example.com/{title}.m3u8"),
    })
}

pub async fn create_movie(app: &Router, payload: Value) -> Value {
    let (status, body) = send(app, json_request("POST", "/api/movies", payload)).await;
    assert_eq!(status, axum::http::StatusCode::CREATED, "{body}");
    body
}

pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Db(sea_orm::DbErr::Custom("connection refused".to_string()))
}

#[async_trait]
impl CategoryStore for FailingStore {
    async fn list_categories(&self) -> StoreResult<Vec<category::Model>> {
        Err(unavailable())
    }

    async fn find_category(&self, _id: Uuid) -> StoreResult<Option<category::Model>> {
        Err(unavailable())
    }

    async fn find_category_by_name(&self, _name: &str) -> StoreResult<Option<category::Model>> {
        Err(unavailable())
    }

    async fn create_category(&self, _name: String) -> StoreResult<category::Model> {
        Err(unavailable())
    }

    async fn rename_category(
        &self,
        _id: Uuid,
        _name: String,
    ) -> StoreResult<Option<category::Model>> {
        Err(unavailable())
    }

    async fn delete_category(&self, _id: Uuid) -> StoreResult<bool> {
        Err(unavailable())
    }
}

#[async_trait]
impl MovieStore for FailingStore {
    async fn list_movies(&self, _filter: MovieFilter) -> StoreResult<Vec<MovieRecord>> {
        Err(unavailable())
    }

    async fn create_movie(&self, _movie: NewMovie) -> StoreResult<MovieRecord> {
        Err(unavailable())
    }

    async fn update_movie(
        &self,
        _id: Uuid,
        _changes: MovieChanges,
    ) -> StoreResult<Option<MovieRecord>> {
        Err(unavailable())
    }

    async fn delete_movie(&self, _id: Uuid) -> StoreResult<bool> {
        Err(unavailable())
    }
}

impl CatalogStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
