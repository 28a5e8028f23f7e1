use chrono::{DateTime, Utc};
use rcl_db::models::DeckSummary;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body for `POST /decks`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeckRequest {
    pub name: String,
    #[serde(default)]
    pub folder_id: Option<Uuid>,
    #[serde(default, rename = "order")]
    pub sort_order: Option<i32>,
}

/// Body for `PATCH /decks/{id}`.
///
/// `folder_id` is doubly optional: a missing key leaves the folder alone,
/// an explicit `null` moves the deck back to the root.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeckRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub folder_id: Option<Option<Uuid>>,
    #[serde(default, rename = "order")]
    pub sort_order: Option<i32>,
}

/// Distinguish a missing key (outer `None`) from an explicit `null`
/// (`Some(None)`): serde collapses both for a plain `Option<Option<T>>`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// Card content supplied by external producers (manual creation, bulk import,
/// AI generation). The scheduler's constructor owns everything else.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCardRequest {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub correct_index: Option<usize>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Body for `POST /decks/{id}/cards/import`
#[derive(Debug, Deserialize)]
pub struct ImportCardsRequest {
    pub cards: Vec<NewCardRequest>,
}

/// One deck in the `GET /decks` listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckListItem {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Uuid>,
    #[serde(rename = "order", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub card_count: i64,
}

impl From<DeckSummary> for DeckListItem {
    fn from(summary: DeckSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            folder_id: summary.folder_id,
            sort_order: summary.sort_order,
            created_at: summary.created_at,
            card_count: summary.card_count,
        }
    }
}
