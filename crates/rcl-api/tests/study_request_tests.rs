use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::common::{TestClient, test_app};

#[tokio::test]
async fn review_rejects_unknown_response_value() {
    let client = TestClient::new(test_app());

    let uri = format!("/decks/{}/cards/{}/review", Uuid::new_v4(), Uuid::new_v4());
    let response = client.post_json(&uri, &json!({ "response": "maybe" })).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn review_rejects_missing_body() {
    let client = TestClient::new(test_app());

    let uri = format!("/decks/{}/cards/{}/review", Uuid::new_v4(), Uuid::new_v4());
    let response = client.post(&uri).await;
    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn study_rejects_unknown_filter() {
    let client = TestClient::new(test_app());

    let uri = format!("/decks/{}/study?filter=everything", Uuid::new_v4());
    let response = client.get(&uri).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn study_rejects_malformed_limit() {
    let client = TestClient::new(test_app());

    let uri = format!("/decks/{}/study?limit=ten", Uuid::new_v4());
    let response = client.get(&uri).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
