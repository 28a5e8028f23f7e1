//! Deck analytics: per-card difficulty/status classification and aggregate
//! deck statistics for dashboards and filtered study sessions.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::card::Flashcard;

/// Ease factor below which a reviewed card counts as struggling.
pub const STRUGGLING_EASE: f64 = 2.0;
/// Coarse mastery bar used by the progress partition (cheap proxy).
pub const PROGRESS_MASTERED_REPS: u32 = 3;
/// Strict mastery bar: repetitions threshold.
///
/// A card clearing this AND [`SCHEDULE_MASTERED_EASE`] is considered durably
/// known and is removed from the due-date buckets entirely, even when its
/// `next_review` falls in a near-term window. Intentionally stricter than
/// [`PROGRESS_MASTERED_REPS`]; the two thresholds must stay distinct.
pub const SCHEDULE_MASTERED_REPS: u32 = 5;
/// Strict mastery bar: ease factor threshold.
pub const SCHEDULE_MASTERED_EASE: f64 = 2.3;
/// How far ahead (in calendar days) the upcoming/status buckets look.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// A card due within the upcoming window, paired with how many days away it is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingCard {
    /// The card itself
    pub card: Flashcard,
    /// `ceil((next_review - now) / 1 day)`, so a card due in one hour is 1
    pub days_until_due: i64,
}

/// The finer due-date partition of a deck.
///
/// Buckets compare calendar dates, not timestamps, so "due today" is stable
/// throughout the day. A card meeting the strict mastery bar lands in
/// `mastered` and in no other bucket.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardsByStatus {
    /// Due-date day strictly before today (and not strictly mastered)
    pub overdue: Vec<Flashcard>,
    /// Due-date day is today
    pub due_today: Vec<Flashcard>,
    /// Due-date day is tomorrow
    pub due_tomorrow: Vec<Flashcard>,
    /// Due-date day within the next 7 calendar days (after tomorrow)
    pub due_this_week: Vec<Flashcard>,
    /// Strictly mastered: `repetitions >= 5` and `ease_factor >= 2.3`
    pub mastered: Vec<Flashcard>,
}

/// Aggregate statistics over a deck's cards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    /// Total number of cards
    pub total: usize,
    /// Cards never reviewed
    #[serde(rename = "new")]
    pub new_cards: usize,
    /// Reviewed cards with fewer than 3 repetitions
    pub learning: usize,
    /// Cards with 3 or more repetitions (coarse progress-bar measure)
    pub mastered: usize,
    /// Cards with `next_review <= now`
    pub due: usize,
    /// Reviewed cards with a low ease factor, worst first
    pub struggling_cards: Vec<Flashcard>,
    /// Cards coming due within the next 7 days, soonest first
    pub upcoming_cards: Vec<UpcomingCard>,
    /// Mean ease factor over reviewed cards; 2.5 when nothing was reviewed
    pub avg_ease_factor: f64,
    /// Sum of repetitions across all cards
    pub total_reviews: u64,
    /// Percentage of reviewed cards with ease >= 2.0; 100 when nothing was reviewed
    pub retention_rate: f64,
    /// The finer due-date partition
    pub cards_by_status: CardsByStatus,
}

/// Compute the full statistics for a card set at the given instant.
///
/// Pure and idempotent: two calls over the same unmutated cards produce
/// identical results. An empty card set is a valid input and yields the
/// zero-valued stats (with the documented defaults for the two averages).
pub fn compute_stats(cards: &[Flashcard], now: DateTime<Utc>) -> DeckStats {
    let today = now.date_naive();

    // Coarse partition (new/learning/mastered) and due count, single pass.
    let mut new_cards = 0;
    let mut learning = 0;
    let mut mastered = 0;
    let mut due = 0;
    for card in cards {
        if card.is_new() {
            new_cards += 1;
        } else if card.repetitions >= PROGRESS_MASTERED_REPS {
            mastered += 1;
        } else {
            learning += 1;
        }
        if card.is_due(now) {
            due += 1;
        }
    }

    let mut struggling_cards: Vec<Flashcard> = cards
        .iter()
        .filter(|card| card.ease_factor < STRUGGLING_EASE && !card.is_new())
        .cloned()
        .collect();
    struggling_cards.sort_by(|a, b| a.ease_factor.total_cmp(&b.ease_factor));

    let mut upcoming_cards: Vec<UpcomingCard> = cards
        .iter()
        .filter(|card| card.next_review > now)
        .filter_map(|card| {
            let days_until_due = days_until(now, card.next_review);
            (days_until_due <= UPCOMING_WINDOW_DAYS).then(|| UpcomingCard {
                card: card.clone(),
                days_until_due,
            })
        })
        .collect();
    upcoming_cards.sort_by_key(|upcoming| upcoming.days_until_due);

    let reviewed: Vec<&Flashcard> = cards.iter().filter(|card| !card.is_new()).collect();
    // Guard the zero-reviewed case: default to the starting ease and a full
    // retention estimate instead of dividing by zero.
    let avg_ease_factor = if reviewed.is_empty() {
        crate::scheduler::MAX_EASE_FACTOR
    } else {
        reviewed.iter().map(|card| card.ease_factor).sum::<f64>() / reviewed.len() as f64
    };
    let retention_rate = if reviewed.is_empty() {
        100.0
    } else {
        let retained = reviewed
            .iter()
            .filter(|card| card.ease_factor >= STRUGGLING_EASE)
            .count();
        retained as f64 / reviewed.len() as f64 * 100.0
    };

    let total_reviews = cards.iter().map(|card| u64::from(card.repetitions)).sum();

    let mut cards_by_status = CardsByStatus::default();
    let tomorrow = today + Duration::days(1);
    let week_end = today + Duration::days(UPCOMING_WINDOW_DAYS);
    for card in cards {
        let due_day = card.next_review.date_naive();
        if card.repetitions >= SCHEDULE_MASTERED_REPS && card.ease_factor >= SCHEDULE_MASTERED_EASE
        {
            cards_by_status.mastered.push(card.clone());
        } else if due_day < today {
            cards_by_status.overdue.push(card.clone());
        } else if due_day == today {
            cards_by_status.due_today.push(card.clone());
        } else if due_day == tomorrow {
            cards_by_status.due_tomorrow.push(card.clone());
        } else if due_day <= week_end {
            cards_by_status.due_this_week.push(card.clone());
        }
    }

    DeckStats {
        total: cards.len(),
        new_cards,
        learning,
        mastered,
        due,
        struggling_cards,
        upcoming_cards,
        avg_ease_factor,
        total_reviews,
        retention_rate,
        cards_by_status,
    }
}

/// Whole days from `now` until `instant`, rounded up.
///
/// Millisecond precision, so any strictly-future instant yields at least 1
/// and stays consistent with the `next_review > now` filters upstream.
fn days_until(now: DateTime<Utc>, instant: DateTime<Utc>) -> i64 {
    let millis = (instant - now).num_milliseconds();
    (millis as f64 / 86_400_000.0).ceil() as i64
}

/// Per-card difficulty tier, derived from the ease factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardDifficulty {
    /// Never reviewed
    New,
    /// `ease_factor >= 2.4`
    Easy,
    /// `ease_factor >= 2.0`
    Good,
    /// `ease_factor >= 1.6`
    Hard,
    /// Everything below
    Struggling,
}

impl fmt::Display for CardDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::New => "New",
            Self::Easy => "Easy",
            Self::Good => "Good",
            Self::Hard => "Hard",
            Self::Struggling => "Struggling",
        };
        f.write_str(label)
    }
}

/// Classify a card's difficulty.
pub fn card_difficulty(card: &Flashcard) -> CardDifficulty {
    if card.is_new() {
        CardDifficulty::New
    } else if card.ease_factor >= 2.4 {
        CardDifficulty::Easy
    } else if card.ease_factor >= STRUGGLING_EASE {
        CardDifficulty::Good
    } else if card.ease_factor >= 1.6 {
        CardDifficulty::Hard
    } else {
        CardDifficulty::Struggling
    }
}

/// Per-card scheduling status, for list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardStatus {
    /// Never reviewed
    NotStarted,
    /// `next_review <= now`
    DueNow,
    /// Due exactly one day out
    DueTomorrow,
    /// Due in 2-7 days
    DueInDays(i64),
    /// `repetitions >= 5` and more than a week out
    Mastered,
    /// Everything else: scheduled further than a week away
    ReviewInDays(i64),
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => f.write_str("Not started"),
            Self::DueNow => f.write_str("Due now"),
            Self::DueTomorrow => f.write_str("Due tomorrow"),
            Self::DueInDays(days) => write!(f, "Due in {days} days"),
            Self::Mastered => f.write_str("Mastered"),
            Self::ReviewInDays(days) => write!(f, "Review in {days}d"),
        }
    }
}

/// Classify a card's scheduling status at the given instant.
pub fn card_status(card: &Flashcard, now: DateTime<Utc>) -> CardStatus {
    if card.is_new() {
        return CardStatus::NotStarted;
    }
    if card.is_due(now) {
        return CardStatus::DueNow;
    }

    let days_until_due = days_until(now, card.next_review);
    if days_until_due == 1 {
        CardStatus::DueTomorrow
    } else if days_until_due <= UPCOMING_WINDOW_DAYS {
        CardStatus::DueInDays(days_until_due)
    } else if card.repetitions >= SCHEDULE_MASTERED_REPS {
        CardStatus::Mastered
    } else {
        CardStatus::ReviewInDays(days_until_due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Fixed "now" so day-bucket assertions do not depend on wall-clock time.
    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    fn reviewed_card(now: DateTime<Utc>, reps: u32, ease: f64, due_in_days: i64) -> Flashcard {
        let mut card = Flashcard::new("Q", "A", now);
        card.repetitions = reps;
        card.ease_factor = ease;
        card.last_review = Some(now - Duration::days(1));
        card.next_review = now + Duration::days(due_in_days);
        card
    }

    #[test]
    fn empty_deck_yields_zero_stats_with_defaults() {
        let stats = compute_stats(&[], fixed_now());

        assert_eq!(stats.total, 0);
        assert_eq!(stats.due, 0);
        assert_eq!(stats.avg_ease_factor, 2.5);
        assert_eq!(stats.retention_rate, 100.0);
        assert!(stats.struggling_cards.is_empty());
        assert!(stats.upcoming_cards.is_empty());
    }

    #[test]
    fn coarse_partition_is_complete() {
        let now = fixed_now();
        let cards = vec![
            Flashcard::new("new", "A", now),
            reviewed_card(now, 1, 2.4, 1),
            reviewed_card(now, 2, 2.3, 2),
            reviewed_card(now, 3, 2.2, 3),
            reviewed_card(now, 7, 2.5, 30),
        ];
        let stats = compute_stats(&cards, now);

        assert_eq!(stats.new_cards, 1);
        assert_eq!(stats.learning, 2);
        assert_eq!(stats.mastered, 2);
        assert_eq!(stats.new_cards + stats.learning + stats.mastered, stats.total);
    }

    #[test]
    fn due_counts_cards_at_or_before_now() {
        let now = fixed_now();
        let cards = vec![
            reviewed_card(now, 1, 2.4, -3),
            reviewed_card(now, 1, 2.4, 0),
            reviewed_card(now, 1, 2.4, 2),
        ];
        let stats = compute_stats(&cards, now);
        assert_eq!(stats.due, 2);
    }

    #[test]
    fn struggling_cards_are_reviewed_low_ease_worst_first() {
        let now = fixed_now();
        let mut never_reviewed_low_ease = Flashcard::new("Q", "A", now);
        never_reviewed_low_ease.ease_factor = 1.4;

        let cards = vec![
            reviewed_card(now, 2, 1.9, 1),
            reviewed_card(now, 2, 2.2, 1),
            reviewed_card(now, 2, 1.5, 1),
            never_reviewed_low_ease,
            reviewed_card(now, 2, 2.1, 1),
        ];
        let stats = compute_stats(&cards, now);

        assert_eq!(stats.struggling_cards.len(), 2);
        assert_eq!(stats.struggling_cards[0].ease_factor, 1.5);
        assert_eq!(stats.struggling_cards[1].ease_factor, 1.9);
    }

    #[test]
    fn upcoming_cards_cover_the_next_week_sorted_by_days() {
        let now = fixed_now();
        let cards = vec![
            reviewed_card(now, 1, 2.4, 6),
            reviewed_card(now, 1, 2.4, 2),
            reviewed_card(now, 1, 2.4, 0),  // already due, not upcoming
            reviewed_card(now, 1, 2.4, 12), // beyond the window
        ];
        let stats = compute_stats(&cards, now);

        assert_eq!(stats.upcoming_cards.len(), 2);
        assert_eq!(stats.upcoming_cards[0].days_until_due, 2);
        assert_eq!(stats.upcoming_cards[1].days_until_due, 6);
    }

    #[test]
    fn days_until_due_rounds_up() {
        let now = fixed_now();
        let mut card = reviewed_card(now, 1, 2.4, 0);
        card.next_review = now + Duration::hours(1);
        let stats = compute_stats(&[card], now);

        assert_eq!(stats.upcoming_cards.len(), 1);
        assert_eq!(stats.upcoming_cards[0].days_until_due, 1);
    }

    #[test]
    fn card_due_within_a_second_is_still_upcoming() {
        let now = fixed_now();
        let mut card = reviewed_card(now, 1, 2.4, 0);
        card.next_review = now + Duration::milliseconds(500);
        let stats = compute_stats(&[card], now);

        // Strictly future, so it must land in the upcoming list with a
        // rounded-up day count, not fall between the filter and the ceil
        assert_eq!(stats.upcoming_cards.len(), 1);
        assert_eq!(stats.upcoming_cards[0].days_until_due, 1);
    }

    #[test]
    fn averages_ignore_unreviewed_cards() {
        let now = fixed_now();
        let cards = vec![
            Flashcard::new("new", "A", now), // ease 2.5, must not enter the mean
            reviewed_card(now, 2, 2.0, 1),
            reviewed_card(now, 2, 1.8, 1),
        ];
        let stats = compute_stats(&cards, now);

        assert!((stats.avg_ease_factor - 1.9).abs() < 1e-9);
        assert_eq!(stats.retention_rate, 50.0);
    }

    #[test]
    fn total_reviews_sums_repetitions() {
        let now = fixed_now();
        let cards = vec![
            reviewed_card(now, 3, 2.4, 1),
            reviewed_card(now, 5, 2.4, 1),
            Flashcard::new("new", "A", now),
        ];
        let stats = compute_stats(&cards, now);
        assert_eq!(stats.total_reviews, 8);
    }

    #[test]
    fn strict_mastery_removes_cards_from_due_buckets() {
        let now = fixed_now();
        // Overdue by date, but strictly mastered: only the mastered bucket
        let cards = vec![reviewed_card(now, 6, 2.4, -3)];
        let by_status = compute_stats(&cards, now).cards_by_status;

        assert_eq!(by_status.mastered.len(), 1);
        assert!(by_status.overdue.is_empty());
    }

    #[test]
    fn coarse_mastery_does_not_clear_the_strict_bar() {
        let now = fixed_now();
        // reps >= 3 but ease below 2.3: coarse-mastered yet still overdue
        let cards = vec![reviewed_card(now, 4, 2.0, -3)];
        let stats = compute_stats(&cards, now);

        assert_eq!(stats.mastered, 1);
        assert!(stats.cards_by_status.mastered.is_empty());
        assert_eq!(stats.cards_by_status.overdue.len(), 1);
    }

    #[test]
    fn status_buckets_compare_calendar_days() {
        let now = fixed_now();
        // Due later today, after "now": still dueToday, not upcoming-tomorrow
        let mut later_today = reviewed_card(now, 1, 2.4, 0);
        later_today.next_review = now + Duration::hours(5);
        let mut yesterday = reviewed_card(now, 1, 2.4, 0);
        yesterday.next_review = now - Duration::days(1);

        let cards = vec![
            later_today,
            yesterday,
            reviewed_card(now, 1, 2.4, 1),
            reviewed_card(now, 1, 2.4, 5),
            reviewed_card(now, 1, 2.4, 20),
        ];
        let by_status = compute_stats(&cards, now).cards_by_status;

        assert_eq!(by_status.due_today.len(), 1);
        assert_eq!(by_status.overdue.len(), 1);
        assert_eq!(by_status.due_tomorrow.len(), 1);
        assert_eq!(by_status.due_this_week.len(), 1);
        // The 20-days-out card is in no bucket at all
        let bucketed = by_status.overdue.len()
            + by_status.due_today.len()
            + by_status.due_tomorrow.len()
            + by_status.due_this_week.len()
            + by_status.mastered.len();
        assert_eq!(bucketed, 4);
    }

    #[test]
    fn compute_stats_is_idempotent() {
        let now = fixed_now();
        let cards = vec![
            Flashcard::new("new", "A", now),
            reviewed_card(now, 2, 1.8, -1),
            reviewed_card(now, 6, 2.4, 3),
        ];

        let first = compute_stats(&cards, now);
        let second = compute_stats(&cards, now);

        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn difficulty_tiers() {
        let now = fixed_now();
        assert_eq!(card_difficulty(&Flashcard::new("Q", "A", now)), CardDifficulty::New);
        assert_eq!(card_difficulty(&reviewed_card(now, 1, 2.5, 1)), CardDifficulty::Easy);
        assert_eq!(card_difficulty(&reviewed_card(now, 1, 2.4, 1)), CardDifficulty::Easy);
        assert_eq!(card_difficulty(&reviewed_card(now, 1, 2.1, 1)), CardDifficulty::Good);
        assert_eq!(card_difficulty(&reviewed_card(now, 1, 1.7, 1)), CardDifficulty::Hard);
        assert_eq!(
            card_difficulty(&reviewed_card(now, 1, 1.3, 1)),
            CardDifficulty::Struggling
        );
    }

    #[test]
    fn status_labels() {
        let now = fixed_now();
        assert_eq!(card_status(&Flashcard::new("Q", "A", now), now), CardStatus::NotStarted);
        assert_eq!(card_status(&reviewed_card(now, 1, 2.4, -1), now), CardStatus::DueNow);
        assert_eq!(card_status(&reviewed_card(now, 1, 2.4, 1), now), CardStatus::DueTomorrow);
        assert_eq!(card_status(&reviewed_card(now, 1, 2.4, 4), now), CardStatus::DueInDays(4));
        assert_eq!(card_status(&reviewed_card(now, 6, 2.4, 30), now), CardStatus::Mastered);
        assert_eq!(
            card_status(&reviewed_card(now, 2, 2.4, 30), now),
            CardStatus::ReviewInDays(30)
        );
        assert_eq!(CardStatus::ReviewInDays(9).to_string(), "Review in 9d");
        assert_eq!(CardStatus::DueInDays(3).to_string(), "Due in 3 days");
    }
}
