use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{Duration, Utc};
use rcl_srs::{Flashcard, ReviewResponse, apply_response, select_filtered, select_for_study};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError, metrics};

/// Default session size when the client does not ask for one.
const DEFAULT_SESSION_SIZE: usize = 20;

/// Create the study routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/decks/{id}/study", get(study_session))
        .route("/decks/{id}/cards/{card_id}/review", post(submit_review))
}

/// Restrict a session to a pre-filtered subset of the deck.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StudyFilter {
    /// Reviewed cards with a low ease factor
    Struggling,
    /// Cards coming due within the next week
    Upcoming,
}

#[derive(Debug, Deserialize)]
struct StudyParams {
    limit: Option<usize>,
    filter: Option<StudyFilter>,
}

/// Select up to `limit` cards for a study session, soonest due first.
///
/// Without a filter the whole deck is eligible, so upcoming cards pad the
/// session when too few are due; `limit=0` is a valid request that returns an
/// empty session for the client to render as "nothing to study".
async fn study_session(
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
    Query(params): Query<StudyParams>,
) -> Result<impl IntoResponse, ApiError> {
    rcl_db::repositories::deck::get_deck(&state.pool, deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {deck_id} not found")))?;

    let records = rcl_db::repositories::card::get_deck_cards(&state.pool, deck_id).await?;
    let cards: Vec<Flashcard> = records.into_iter().map(Flashcard::from).collect();

    let limit = params.limit.unwrap_or(DEFAULT_SESSION_SIZE);
    let now = Utc::now();
    let session = match params.filter {
        None => select_for_study(&cards, limit),
        Some(StudyFilter::Struggling) => select_filtered(&cards, limit, |card| {
            card.ease_factor < rcl_srs::stats::STRUGGLING_EASE && !card.is_new()
        }),
        Some(StudyFilter::Upcoming) => select_filtered(&cards, limit, |card| {
            card.next_review > now
                && card.next_review <= now + Duration::days(rcl_srs::stats::UPCOMING_WINDOW_DAYS)
        }),
    };

    Ok(Json(session))
}

#[derive(Debug, Deserialize)]
struct ReviewSubmission {
    response: ReviewResponse,
}

/// Record a recall outcome for a card.
///
/// Runs the scheduler over the stored card and persists the new scheduling
/// state; the updated card is returned so the client can requeue it on
/// "forgot" without refetching the deck.
async fn submit_review(
    State(state): State<ApiState>,
    Path((deck_id, card_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ReviewSubmission>,
) -> Result<impl IntoResponse, ApiError> {
    let record = rcl_db::repositories::card::get_card(&state.pool, deck_id, card_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Card {card_id} not found in deck {deck_id}"))
        })?;

    let card = Flashcard::from(record);
    let updated = apply_response(&card, payload.response, Utc::now());
    rcl_db::repositories::card::update_scheduling(&state.pool, &updated).await?;

    metrics::record_review(payload.response);
    tracing::debug!(
        card_id = %card_id,
        interval = updated.interval,
        ease_factor = updated.ease_factor,
        "review recorded"
    );

    Ok(Json(updated))
}
