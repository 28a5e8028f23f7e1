use chrono::{DateTime, Utc};
use rcl_srs::Flashcard;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Deck row - metadata only, cards live in their own table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DeckRecord {
    /// Unique deck identifier
    pub id: Uuid,
    /// Deck name (max 255 chars)
    pub name: String,
    /// Folder this deck belongs to (nullable)
    pub folder_id: Option<Uuid>,
    /// Manual sort position (nullable)
    pub sort_order: Option<i32>,
    /// When the deck was created
    pub created_at: DateTime<Utc>,
}

/// Deck row joined with its card count, for list views
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DeckSummary {
    /// Unique deck identifier
    pub id: Uuid,
    /// Deck name
    pub name: String,
    /// Folder this deck belongs to (nullable)
    pub folder_id: Option<Uuid>,
    /// Manual sort position (nullable)
    pub sort_order: Option<i32>,
    /// When the deck was created
    pub created_at: DateTime<Utc>,
    /// Number of cards in the deck
    pub card_count: i64,
}

/// Card row - content plus the scheduling state owned by the scheduler
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CardRecord {
    /// Unique card identifier
    pub id: Uuid,
    /// Deck this card belongs to (indexed)
    pub deck_id: Uuid,
    /// Question (front) text
    pub question: String,
    /// Answer (back) text
    pub answer: String,
    /// Multiple-choice options (nullable, present together with correct_index)
    pub options: Option<Vec<String>>,
    /// Index of the correct option (nullable)
    pub correct_index: Option<i32>,
    /// Free-form tags (nullable)
    pub tags: Option<Vec<String>>,
    /// Days until the next review ("interval" is reserved in PostgreSQL)
    pub interval_days: i32,
    /// Ease factor in [1.3, 2.5]
    pub ease_factor: f64,
    /// Consecutive successful reviews
    pub repetitions: i32,
    /// When the card should next be shown (indexed with deck_id)
    pub next_review: DateTime<Utc>,
    /// When the card was last reviewed; NULL means never
    pub last_review: Option<DateTime<Utc>>,
}

impl From<CardRecord> for Flashcard {
    fn from(record: CardRecord) -> Self {
        Self {
            id: record.id,
            question: record.question,
            answer: record.answer,
            options: record.options,
            correct_index: record.correct_index.and_then(|i| usize::try_from(i).ok()),
            tags: record.tags,
            interval: u32::try_from(record.interval_days).unwrap_or(0),
            ease_factor: record.ease_factor,
            repetitions: u32::try_from(record.repetitions).unwrap_or(0),
            next_review: record.next_review,
            last_review: record.last_review,
        }
    }
}
