use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};

use crate::{deck, state::ApiState, stats, study};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .merge(deck::routes())
        .merge(study::routes())
        .merge(stats::routes())
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
