//! In-session bookkeeping: running outcome tallies and the requeue-on-forgot
//! study queue.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::card::{Flashcard, ReviewResponse};
use crate::scheduler::apply_response;

/// Running per-outcome counts for a study session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionTally {
    /// Responses answered "correct"
    pub correct: u32,
    /// Responses answered "forgot"
    pub forgot: u32,
    /// Responses answered "easy"
    pub easy: u32,
}

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// More cards to present
    InProgress {
        /// Index of the card currently shown
        position: usize,
        /// Cards left in the queue, including the current one
        remaining: usize,
    },
    /// The queue is exhausted
    Complete(SessionTally),
}

/// A study session over an ordered queue of cards.
///
/// On each response the matching tally is incremented and the scheduler runs;
/// a "forgot" re-appends the *updated* card snapshot to the end of the queue
/// so it resurfaces before the session ends. The queue holds values, not
/// references, so the requeued snapshot is distinct from the original card.
#[derive(Debug, Clone)]
pub struct StudySession {
    queue: Vec<Flashcard>,
    position: usize,
    tally: SessionTally,
}

impl StudySession {
    /// Start a session over the given cards, usually the output of
    /// [`crate::selector::select_for_study`].
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            queue: cards,
            position: 0,
            tally: SessionTally::default(),
        }
    }

    /// The card currently presented, or `None` once the session is complete.
    pub fn current(&self) -> Option<&Flashcard> {
        self.queue.get(self.position)
    }

    /// Record a response for the current card and advance.
    ///
    /// Returns the rescheduled card so the caller can persist it. Returns
    /// `None` when the session is already complete; the tally and queue are
    /// untouched in that case.
    pub fn respond(&mut self, response: ReviewResponse, now: DateTime<Utc>) -> Option<Flashcard> {
        let card = self.queue.get(self.position)?;
        let updated = apply_response(card, response, now);

        match response {
            ReviewResponse::Forgot => {
                self.tally.forgot += 1;
                self.queue.push(updated.clone());
            }
            ReviewResponse::Correct => self.tally.correct += 1,
            ReviewResponse::Easy => self.tally.easy += 1,
        }
        self.position += 1;

        Some(updated)
    }

    /// Current state of the session.
    pub fn state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Complete(self.tally)
        } else {
            SessionState::InProgress {
                position: self.position,
                remaining: self.remaining(),
            }
        }
    }

    /// Whether every queued card (including requeued ones) has been answered.
    pub fn is_complete(&self) -> bool {
        self.position >= self.queue.len()
    }

    /// Cards left to answer.
    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.position)
    }

    /// The running outcome counts.
    pub const fn tally(&self) -> SessionTally {
        self.tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(n: usize) -> Vec<Flashcard> {
        let now = Utc::now();
        (0..n)
            .map(|i| Flashcard::new(format!("Q{i}"), format!("A{i}"), now))
            .collect()
    }

    #[test]
    fn tallies_each_outcome() {
        let now = Utc::now();
        let mut session = StudySession::new(cards(3));

        session.respond(ReviewResponse::Correct, now);
        session.respond(ReviewResponse::Easy, now);
        session.respond(ReviewResponse::Forgot, now);

        let tally = session.tally();
        assert_eq!(tally.correct, 1);
        assert_eq!(tally.easy, 1);
        assert_eq!(tally.forgot, 1);
    }

    #[test]
    fn forgot_requeues_the_updated_snapshot() {
        let now = Utc::now();
        let deck = cards(2);
        let first_id = deck[0].id;
        let mut session = StudySession::new(deck);

        let updated = session.respond(ReviewResponse::Forgot, now).unwrap();
        assert_eq!(updated.id, first_id);

        // The second card is next, the forgotten one resurfaces at the end
        session.respond(ReviewResponse::Correct, now);
        let requeued = session.current().expect("forgotten card should resurface");
        assert_eq!(requeued.id, first_id);
        // Post-scheduling snapshot, not the pristine original
        assert_eq!(requeued.last_review, Some(now));
        assert!(!session.is_complete());
    }

    #[test]
    fn completes_when_the_queue_is_exhausted() {
        let now = Utc::now();
        let mut session = StudySession::new(cards(2));
        assert_eq!(
            session.state(),
            SessionState::InProgress {
                position: 0,
                remaining: 2
            }
        );

        session.respond(ReviewResponse::Correct, now);
        session.respond(ReviewResponse::Easy, now);

        assert!(session.is_complete());
        assert!(session.current().is_none());
        let SessionState::Complete(tally) = session.state() else {
            panic!("session should be complete");
        };
        assert_eq!(tally.correct, 1);
        assert_eq!(tally.easy, 1);
    }

    #[test]
    fn respond_after_completion_is_a_no_op() {
        let now = Utc::now();
        let mut session = StudySession::new(cards(1));
        session.respond(ReviewResponse::Correct, now);

        assert!(session.respond(ReviewResponse::Easy, now).is_none());
        assert_eq!(session.tally().easy, 0);
    }

    #[test]
    fn empty_session_starts_complete() {
        let session = StudySession::new(Vec::new());
        assert!(session.is_complete());
        assert_eq!(session.state(), SessionState::Complete(SessionTally::default()));
    }

    #[test]
    fn forgetting_every_card_still_terminates() {
        let now = Utc::now();
        let mut session = StudySession::new(cards(2));

        // Forget both once; each resurfaces exactly once more
        session.respond(ReviewResponse::Forgot, now);
        session.respond(ReviewResponse::Forgot, now);
        assert_eq!(session.remaining(), 2);

        session.respond(ReviewResponse::Correct, now);
        session.respond(ReviewResponse::Correct, now);
        assert!(session.is_complete());
        assert_eq!(session.tally().forgot, 2);
        assert_eq!(session.tally().correct, 2);
    }
}
