mod common;

use axum::http::StatusCode;
use common::{create_category, create_movie, empty_request, json_request, movie_payload, send};
use serde_json::json;

#[tokio::test]
async fn create_and_list_categories() {
    let app = common::app();
    let created = create_category(&app, "Comedy").await;
    assert_eq!(created["name"], "Comedy");
    assert!(created["id"].is_string());

    let (status, listing) = send(&app, empty_request("GET", "/api/categories")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing.as_array().unwrap().len(), 1);
    assert_eq!(listing[0]["id"], created["id"]);
}

#[tokio::test]
async fn name_is_required() {
    let app = common::app();

    for body in [json!({}), json!({ "name": "" }), json!({ "name": null })] {
        let (status, response) = send(&app, json_request("POST", "/api/categories", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "Category name is required");
    }
}

#[tokio::test]
async fn duplicate_name_is_rejected() {
    let app = common::app();
    create_category(&app, "Comedy").await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/categories", json!({ "name": "Comedy" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Category name already exists");

    let (_, listing) = send(&app, empty_request("GET", "/api/categories")).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_duplicates_admit_one() {
    let app = common::app();
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let app = app.clone();
        tasks.spawn(async move {
            send(
                &app,
                json_request("POST", "/api/categories", json!({ "name": "Anime" })),
            )
            .await
            .0
        });
    }

    let mut created = 0;
    while let Some(status) = tasks.join_next().await {
        match status.unwrap() {
            StatusCode::CREATED => created += 1,
            other => assert_eq!(other, StatusCode::BAD_REQUEST),
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
async fn rename_category() {
    let app = common::app();
    let created = create_category(&app, "Scifi").await;
    let uri = format!("/api/categories/{}", created["id"].as_str().unwrap());

    let (status, renamed) = send(&app, json_request("PUT", &uri, json!({ "name": "Sci-Fi" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["id"], created["id"]);
    assert_eq!(renamed["name"], "Sci-Fi");

    let (status, _) = send(&app, json_request("PUT", &uri, json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rename_shows_up_on_movies() {
    let app = common::app();
    let created = create_category(&app, "Scifi").await;
    let mut payload = movie_payload("Solaris");
    payload["category"] = json!("Scifi");
    create_movie(&app, payload).await;

    let uri = format!("/api/categories/{}", created["id"].as_str().unwrap());
    send(&app, json_request("PUT", &uri, json!({ "name": "Sci-Fi" }))).await;

    let (_, movies) = send(&app, empty_request("GET", "/api/movies")).await;
    assert_eq!(movies[0]["category"]["name"], "Sci-Fi");
}

#[tokio::test]
async fn rename_onto_existing_name_is_rejected() {
    let app = common::app();
    create_category(&app, "Drama").await;
    let comedy = create_category(&app, "Comedy").await;
    let uri = format!("/api/categories/{}", comedy["id"].as_str().unwrap());

    let (status, body) = send(&app, json_request("PUT", &uri, json!({ "name": "Drama" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Category name already exists");
}

#[tokio::test]
async fn rename_unknown_category_is_not_found() {
    let app = common::app();
    let uri = format!("/api/categories/{}", uuid::Uuid::new_v4());

    let (status, body) = send(&app, json_request("PUT", &uri, json!({ "name": "Western" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category not found");
}

#[tokio::test]
async fn referenced_category_cannot_be_deleted() {
    let app = common::app();
    let horror = create_category(&app, "Horror").await;
    let mut payload = movie_payload("Halloween");
    payload["category"] = json!("Horror");
    let movie = create_movie(&app, payload).await;

    let uri = format!("/api/categories/{}", horror["id"].as_str().unwrap());
    let (status, body) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Cannot delete category: movies are still associated with it"
    );

    let (_, listing) = send(&app, empty_request("GET", "/api/categories")).await;
    assert_eq!(listing[0]["id"], horror["id"]);

    // Once the movie is gone the category can go too.
    let movie_uri = format!("/api/movies/{}", movie["id"].as_str().unwrap());
    send(&app, empty_request("DELETE", &movie_uri)).await;
    let (status, _) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unreferenced_category_is_deleted() {
    let app = common::app();
    let keep = create_category(&app, "Family").await;
    let musical = create_category(&app, "Musical").await;
    let uri = format!("/api/categories/{}", musical["id"].as_str().unwrap());

    let (status, body) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Category deleted successfully");

    let (_, listing) = send(&app, empty_request("GET", "/api/categories")).await;
    let ids: Vec<_> = listing.as_array().unwrap().iter().map(|c| c["id"].clone()).collect();
    assert_eq!(ids, vec![keep["id"].clone()]);

    let (status, _) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_ids_never_reach_the_store() {
    let app = common::failing_app();

    let (status, _) = send(
        &app,
        json_request("PUT", "/api/categories/drama", json!({ "name": "Drama" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, empty_request("DELETE", "/api/categories/drama")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category not found");
}

#[tokio::test]
async fn store_failures_are_internal_errors() {
    let app = common::failing_app();

    let (status, _) = send(&app, empty_request("GET", "/api/categories")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/categories", json!({ "name": "Drama" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn wrongly_typed_name_is_rejected() {
    let app = common::app();

    let (status, body) = send(
        &app,
        json_request("POST", "/api/categories", json!({ "name": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (_, listing) = send(&app, empty_request("GET", "/api/categories")).await;
    assert!(listing.as_array().unwrap().is_empty());
}
