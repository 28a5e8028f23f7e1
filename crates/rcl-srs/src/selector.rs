//! Due-card selection: picks the bounded, ordered subset of a deck to present
//! in a study session.

use crate::card::Flashcard;

/// Select up to `max_count` cards for a study session.
///
/// The whole deck is sorted by `next_review` ascending and the first
/// `max_count` cards are taken. Deliberately NOT filtered to overdue cards:
/// when fewer than `max_count` cards are currently due, the soonest-upcoming
/// cards fill the remainder so the session size stays predictable. Cards that
/// were never reviewed carry `next_review = creation time`, which sorts them
/// alongside freshly-due material.
///
/// An empty input or `max_count == 0` yields an empty session; callers should
/// surface that as a "nothing to study" state rather than an error.
pub fn select_for_study(cards: &[Flashcard], max_count: usize) -> Vec<Flashcard> {
    let mut sorted: Vec<Flashcard> = cards.to_vec();
    sorted.sort_by_key(|card| card.next_review);
    sorted.truncate(max_count);
    sorted
}

/// Select up to `max_count` cards matching `predicate`, with the same
/// due-date ordering as [`select_for_study`].
///
/// Used for filtered sessions such as "struggling cards only" or "everything
/// due this week", where the analytics pass supplies the predicate.
pub fn select_filtered<F>(cards: &[Flashcard], max_count: usize, predicate: F) -> Vec<Flashcard>
where
    F: Fn(&Flashcard) -> bool,
{
    let filtered: Vec<Flashcard> = cards.iter().filter(|card| predicate(card)).cloned().collect();
    select_for_study(&filtered, max_count)
}
