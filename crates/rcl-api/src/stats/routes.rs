use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use rcl_srs::{Flashcard, card_difficulty, card_status, compute_stats};
use serde_json::json;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// Create the analytics routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/decks/{id}/stats", get(deck_stats))
        .route("/decks/{id}/cards/{card_id}/labels", get(card_labels))
}

/// Full deck statistics for the dashboard
async fn deck_stats(
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    rcl_db::repositories::deck::get_deck(&state.pool, deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {deck_id} not found")))?;

    let records = rcl_db::repositories::card::get_deck_cards(&state.pool, deck_id).await?;
    let cards: Vec<Flashcard> = records.into_iter().map(Flashcard::from).collect();

    Ok(Json(compute_stats(&cards, Utc::now())))
}

/// Difficulty and status labels for a single card, for list views
async fn card_labels(
    State(state): State<ApiState>,
    Path((deck_id, card_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let record = rcl_db::repositories::card::get_card(&state.pool, deck_id, card_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Card {card_id} not found in deck {deck_id}"))
        })?;

    let card = Flashcard::from(record);
    let now = Utc::now();
    Ok(Json(json!({
        "difficulty": card_difficulty(&card).to_string(),
        "status": card_status(&card, now).to_string(),
    })))
}
