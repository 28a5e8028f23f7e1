//! The flashcard and deck value types shared by the scheduler, the selector,
//! and the analytics pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The learner's self-reported recall outcome for a single review.
///
/// This is a closed set: the scheduler matches on it exhaustively, so an
/// out-of-range response is unrepresentable rather than silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewResponse {
    /// The card was not recalled; progress resets and the card is requeued.
    Forgot,
    /// The card was recalled with some effort.
    Correct,
    /// The card was recalled without effort.
    Easy,
}

/// A single flashcard together with its scheduling state.
///
/// The scheduling fields (`interval`, `ease_factor`, `repetitions`,
/// `next_review`, `last_review`) are owned by the scheduler once the card is
/// created: [`crate::scheduler::apply_response`] returns a new value rather
/// than mutating in place, so callers control when an update is committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    /// Unique card identifier
    pub id: Uuid,
    /// Question (front) text
    pub question: String,
    /// Answer (back) text
    pub answer: String,
    /// Multiple-choice options, including the correct answer (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Index of the correct answer within `options`; present iff `options` is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_index: Option<usize>,
    /// Free-form tags (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Days until the next scheduled review; 0 means due immediately
    pub interval: u32,
    /// Retention difficulty multiplier, clamped to [1.3, 2.5] (higher = easier)
    pub ease_factor: f64,
    /// Consecutive successful reviews since the last reset
    pub repetitions: u32,
    /// When the card should next be shown
    pub next_review: DateTime<Utc>,
    /// When the card was last reviewed; `None` means never reviewed ("new")
    pub last_review: Option<DateTime<Utc>>,
}

impl Flashcard {
    /// Create a new, never-reviewed card with default scheduling state.
    ///
    /// This is the single entry point for external card producers (manual
    /// creation, bulk import, AI generation): they supply content, the
    /// scheduler owns everything else. `now` is injected so that a freshly
    /// created card is due immediately relative to the caller's clock.
    pub fn new(question: impl Into<String>, answer: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: question.into(),
            answer: answer.into(),
            options: None,
            correct_index: None,
            tags: None,
            interval: 0,
            ease_factor: crate::scheduler::MAX_EASE_FACTOR,
            repetitions: 0,
            next_review: now,
            last_review: None,
        }
    }

    /// Attach multiple-choice options. `correct_index` points into `options`.
    #[must_use]
    pub fn with_choices(mut self, options: Vec<String>, correct_index: usize) -> Self {
        self.options = Some(options);
        self.correct_index = Some(correct_index);
        self
    }

    /// Attach free-form tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// A card is "new" until its first review, regardless of the values of
    /// the other scheduling fields.
    pub const fn is_new(&self) -> bool {
        self.last_review.is_none()
    }

    /// Whether the card is due at the given instant.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }
}

/// A named, ordered collection of flashcards.
///
/// The scheduler and analytics operate on `cards` only; deck metadata
/// (folder membership, manual sort order) belongs to deck management.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    /// Unique deck identifier
    pub id: Uuid,
    /// Deck name
    pub name: String,
    /// The cards in this deck
    pub cards: Vec<Flashcard>,
    /// When the deck was created
    pub created_at: DateTime<Utc>,
    /// Folder this deck belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Uuid>,
    /// Manual sort position within the folder or root, if any
    #[serde(default, rename = "order", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}
