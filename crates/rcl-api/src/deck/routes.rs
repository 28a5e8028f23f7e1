use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use chrono::Utc;
use rcl_srs::{Deck, Flashcard};
use serde_json::json;
use uuid::Uuid;

use crate::{
    ApiState,
    error::ApiError,
    validation::{validate_card_content, validate_deck_name},
};

use super::model::{
    CreateDeckRequest, DeckListItem, ImportCardsRequest, NewCardRequest, UpdateDeckRequest,
};

/// Create the deck routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/decks", get(list_decks))
        .route("/decks", post(create_deck))
        .route("/decks/{id}", get(get_deck))
        .route("/decks/{id}", patch(update_deck))
        .route("/decks/{id}", delete(delete_deck))
        .route("/decks/{id}/cards", post(create_card))
        .route("/decks/{id}/cards/import", post(import_cards))
        .route("/decks/{id}/cards/{card_id}", delete(delete_card))
}

/// List all decks with card counts
async fn list_decks(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let decks = rcl_db::repositories::deck::list_decks(&state.pool).await?;
    let decks: Vec<DeckListItem> = decks.into_iter().map(DeckListItem::from).collect();
    Ok(Json(decks))
}

/// Create an empty deck
async fn create_deck(
    State(state): State<ApiState>,
    Json(payload): Json<CreateDeckRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_deck_name(&payload.name)?;

    let deck = Deck {
        id: Uuid::new_v4(),
        name: payload.name.trim().to_string(),
        cards: Vec::new(),
        created_at: Utc::now(),
        folder_id: payload.folder_id,
        sort_order: payload.sort_order,
    };
    rcl_db::repositories::deck::insert_deck(
        &state.pool,
        deck.id,
        &deck.name,
        deck.folder_id,
        deck.sort_order,
        deck.created_at,
    )
    .await?;

    tracing::info!(deck_id = %deck.id, "deck created");
    Ok((StatusCode::CREATED, Json(deck)))
}

/// Fetch a deck together with all of its cards
async fn get_deck(
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let record = rcl_db::repositories::deck::get_deck(&state.pool, deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {deck_id} not found")))?;
    let cards = rcl_db::repositories::card::get_deck_cards(&state.pool, deck_id).await?;

    let deck = Deck {
        id: record.id,
        name: record.name,
        cards: cards.into_iter().map(Flashcard::from).collect(),
        created_at: record.created_at,
        folder_id: record.folder_id,
        sort_order: record.sort_order,
    };
    Ok(Json(deck))
}

/// Rename a deck and/or move it between folders
async fn update_deck(
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
    Json(payload): Json<UpdateDeckRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = rcl_db::repositories::deck::get_deck(&state.pool, deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {deck_id} not found")))?;

    if let Some(name) = &payload.name {
        validate_deck_name(name)?;
        rcl_db::repositories::deck::rename_deck(&state.pool, deck_id, name.trim()).await?;
    }

    if payload.folder_id.is_some() || payload.sort_order.is_some() {
        // A missing folderId key keeps the current folder; an explicit null
        // moves the deck back to the root.
        let folder_id = payload.folder_id.unwrap_or(record.folder_id);
        let sort_order = payload.sort_order.or(record.sort_order);
        rcl_db::repositories::deck::move_deck(&state.pool, deck_id, folder_id, sort_order).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a deck and its cards
async fn delete_deck(
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = rcl_db::repositories::deck::delete_deck(&state.pool, deck_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Deck {deck_id} not found")));
    }
    tracing::info!(deck_id = %deck_id, "deck deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Wrap external card content into a schedulable card. The scheduling
/// defaults live in the constructor; producers only supply content.
fn build_card(request: NewCardRequest, now: chrono::DateTime<Utc>) -> Result<Flashcard, ApiError> {
    validate_card_content(
        &request.question,
        &request.answer,
        request.options.as_deref(),
        request.correct_index,
    )?;

    let mut card = Flashcard::new(request.question, request.answer, now);
    if let (Some(options), Some(correct_index)) = (request.options, request.correct_index) {
        card = card.with_choices(options, correct_index);
    }
    if let Some(tags) = request.tags {
        card = card.with_tags(tags);
    }
    Ok(card)
}

/// Add a single card to a deck
async fn create_card(
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
    Json(payload): Json<NewCardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let card = build_card(payload, Utc::now())?;

    rcl_db::repositories::deck::get_deck(&state.pool, deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {deck_id} not found")))?;
    rcl_db::repositories::card::insert_card(&state.pool, deck_id, &card).await?;

    Ok((StatusCode::CREATED, Json(card)))
}

/// Bulk-add cards to a deck (text import, Anki import, AI generation)
async fn import_cards(
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
    Json(payload): Json<ImportCardsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Validate the whole batch before touching the database
    let now = Utc::now();
    let cards = payload
        .cards
        .into_iter()
        .map(|request| build_card(request, now))
        .collect::<Result<Vec<_>, _>>()?;

    rcl_db::repositories::deck::get_deck(&state.pool, deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {deck_id} not found")))?;

    // Single transaction: an import is all-or-nothing
    let mut tx = state.pool.begin().await?;
    for card in &cards {
        rcl_db::repositories::card::insert_card(&mut *tx, deck_id, card).await?;
    }
    tx.commit().await?;

    tracing::info!(deck_id = %deck_id, count = cards.len(), "cards imported");
    Ok((StatusCode::CREATED, Json(json!({ "imported": cards.len() }))))
}

/// Remove a card from a deck
async fn delete_card(
    State(state): State<ApiState>,
    Path((deck_id, card_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = rcl_db::repositories::card::delete_card(&state.pool, deck_id, card_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!(
            "Card {card_id} not found in deck {deck_id}"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
