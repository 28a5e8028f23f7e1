use rcl_srs::Flashcard;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::CardRecord;

/// The interval is stored in an INTEGER column; saturate rather than wrap
/// negative for values beyond its range.
fn interval_to_column(interval: u32) -> i32 {
    i32::try_from(interval).unwrap_or(i32::MAX)
}

/// Insert a card with its full scheduling state.
///
/// The value usually comes straight from the [`Flashcard`] constructor
/// (manual creation, import, AI generation) but a card mid-schedule round
/// trips losslessly too.
pub async fn insert_card<'e, E>(
    executor: E,
    deck_id: Uuid,
    card: &Flashcard,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO cards (
                id, deck_id, question, answer, options, correct_index, tags,
                interval_days, ease_factor, repetitions, next_review, last_review
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(card.id)
    .bind(deck_id)
    .bind(&card.question)
    .bind(&card.answer)
    .bind(&card.options)
    .bind(card.correct_index.map(|i| i as i32))
    .bind(&card.tags)
    .bind(interval_to_column(card.interval))
    .bind(card.ease_factor)
    .bind(card.repetitions as i32)
    .bind(card.next_review)
    .bind(card.last_review)
    .execute(executor)
    .await?;
    Ok(())
}

/// Fetch a single card, scoped to its deck.
pub async fn get_card<'e, E>(
    executor: E,
    deck_id: Uuid,
    card_id: Uuid,
) -> Result<Option<CardRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, deck_id, question, answer, options, correct_index, tags,
                   interval_days, ease_factor, repetitions, next_review, last_review
            FROM cards
            WHERE deck_id = $1 AND id = $2
        "#,
    )
    .bind(deck_id)
    .bind(card_id)
    .fetch_optional(executor)
    .await
}

/// Fetch every card of a deck, soonest due first.
///
/// The ordering matches the due-set selector's sort so callers that want "the
/// whole deck as one session" can use the rows as-is.
pub async fn get_deck_cards<'e, E>(
    executor: E,
    deck_id: Uuid,
) -> Result<Vec<CardRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, deck_id, question, answer, options, correct_index, tags,
                   interval_days, ease_factor, repetitions, next_review, last_review
            FROM cards
            WHERE deck_id = $1
            ORDER BY next_review
        "#,
    )
    .bind(deck_id)
    .fetch_all(executor)
    .await
}

/// Persist the scheduling state produced by the review scheduler.
///
/// Content columns are left untouched; only the scheduler-owned fields move.
pub async fn update_scheduling<'e, E>(
    executor: E,
    card: &Flashcard,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE cards
            SET interval_days = $2,
                ease_factor = $3,
                repetitions = $4,
                next_review = $5,
                last_review = $6
            WHERE id = $1
        "#,
    )
    .bind(card.id)
    .bind(interval_to_column(card.interval))
    .bind(card.ease_factor)
    .bind(card.repetitions as i32)
    .bind(card.next_review)
    .bind(card.last_review)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a card. Returns false when it does not exist in the deck.
pub async fn delete_card<'e, E>(
    executor: E,
    deck_id: Uuid,
    card_id: Uuid,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM cards WHERE deck_id = $1 AND id = $2
        "#,
    )
    .bind(deck_id)
    .bind(card_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}
