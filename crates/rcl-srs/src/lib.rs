//! SRS (Spaced Repetition System) library for Recall
//!
//! This crate provides the core spaced repetition algorithm and related
//! functionality for scheduling flashcard reviews: the card model, the
//! SM-2-inspired scheduler, due-card selection, deck analytics, and the
//! in-session accumulator.
//!
//! Everything in here is pure and synchronous. The current time is always an
//! explicit parameter so that scheduling is deterministic and testable;
//! nothing reads the system clock or performs I/O.

pub mod card;
pub mod scheduler;
pub mod selector;
pub mod session;
pub mod stats;

pub use card::{Deck, Flashcard, ReviewResponse};
pub use scheduler::apply_response;
pub use selector::{select_filtered, select_for_study};
pub use session::{SessionState, SessionTally, StudySession};
pub use stats::{
    CardDifficulty, CardStatus, CardsByStatus, DeckStats, UpcomingCard, card_difficulty,
    card_status, compute_stats,
};
