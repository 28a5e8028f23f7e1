//! The review scheduler: maps a card and a recall outcome to the card's next
//! scheduling state.

use chrono::{DateTime, Duration, Utc};

use crate::card::{Flashcard, ReviewResponse};

/// Lower clamp for the ease factor.
pub const MIN_EASE_FACTOR: f64 = 1.3;
/// Upper clamp for the ease factor; also the starting value for new cards.
pub const MAX_EASE_FACTOR: f64 = 2.5;

/// Apply a recall outcome to a card and compute its next review schedule.
///
/// SM-2-inspired, three-branch variant:
///
/// * `forgot`: repetitions reset to 0, interval to 0 (the card becomes due
///   immediately so it can be requeued within the same session), ease drops
///   by 0.2.
/// * `correct`: repetitions increment; interval bootstraps 1 then 3 days,
///   afterwards `round(interval * ease)`; ease erodes by 0.05. The erosion on
///   success is intentional: a bare "correct" signals non-trivial effort, so
///   confidence drifts down unless the learner marks cards "easy".
/// * `easy`: repetitions increment; interval bootstraps 4 days, afterwards
///   `round(interval * ease * 1.3)`; ease grows by 0.1.
///
/// The ease factor never leaves [1.3, 2.5]. `last_review` is set to `now`
/// unconditionally and `next_review` is recomputed as `now + interval` days.
///
/// # Arguments
///
/// * `card` - The card's current state; never mutated
/// * `response` - The learner's self-reported outcome
/// * `now` - The moment the response was recorded (injected for determinism)
///
/// # Returns
///
/// A new [`Flashcard`] value with updated scheduling state. The function is
/// total: every response variant is handled and no input can make it fail.
pub fn apply_response(
    card: &Flashcard,
    response: ReviewResponse,
    now: DateTime<Utc>,
) -> Flashcard {
    let mut updated = card.clone();
    updated.last_review = Some(now);

    match response {
        ReviewResponse::Forgot => {
            updated.repetitions = 0;
            updated.interval = 0;
            updated.ease_factor = (updated.ease_factor - 0.2).max(MIN_EASE_FACTOR);
        }
        ReviewResponse::Correct => {
            updated.repetitions += 1;
            updated.interval = match updated.repetitions {
                1 => 1,
                2 => 3,
                _ => (f64::from(updated.interval) * updated.ease_factor).round() as u32,
            };
            updated.ease_factor = (updated.ease_factor - 0.05).max(MIN_EASE_FACTOR);
        }
        ReviewResponse::Easy => {
            updated.repetitions += 1;
            updated.interval = match updated.repetitions {
                1 => 4,
                _ => (f64::from(updated.interval) * updated.ease_factor * 1.3).round() as u32,
            };
            updated.ease_factor = (updated.ease_factor + 0.1).min(MAX_EASE_FACTOR);
        }
    }

    // Interval is applied as whole days from "now", never as elapsed seconds
    // since the previous review.
    updated.next_review = now + Duration::days(i64::from(updated.interval));

    updated
}
