use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{DeckRecord, DeckSummary};

/// Insert a new deck.
pub async fn insert_deck<'e, E>(
    executor: E,
    id: Uuid,
    name: &str,
    folder_id: Option<Uuid>,
    sort_order: Option<i32>,
    created_at: DateTime<Utc>,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO decks (id, name, folder_id, sort_order, created_at)
            VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(folder_id)
    .bind(sort_order)
    .bind(created_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// List all decks with their card counts, manual order first.
pub async fn list_decks<'e, E>(executor: E) -> Result<Vec<DeckSummary>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                d.id,
                d.name,
                d.folder_id,
                d.sort_order,
                d.created_at,
                COUNT(c.id) AS card_count
            FROM decks d
            LEFT JOIN cards c ON c.deck_id = d.id
            GROUP BY d.id
            ORDER BY d.sort_order NULLS LAST, d.created_at
        "#,
    )
    .fetch_all(executor)
    .await
}

/// Fetch a single deck's metadata.
pub async fn get_deck<'e, E>(executor: E, deck_id: Uuid) -> Result<Option<DeckRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, folder_id, sort_order, created_at
            FROM decks
            WHERE id = $1
        "#,
    )
    .bind(deck_id)
    .fetch_optional(executor)
    .await
}

/// Rename a deck. Returns false when the deck does not exist.
pub async fn rename_deck<'e, E>(executor: E, deck_id: Uuid, name: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE decks SET name = $2 WHERE id = $1
        "#,
    )
    .bind(deck_id)
    .bind(name)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Move a deck into a folder (or out of one) and update its manual position.
pub async fn move_deck<'e, E>(
    executor: E,
    deck_id: Uuid,
    folder_id: Option<Uuid>,
    sort_order: Option<i32>,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE decks SET folder_id = $2, sort_order = $3 WHERE id = $1
        "#,
    )
    .bind(deck_id)
    .bind(folder_id)
    .bind(sort_order)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a deck; its cards cascade. Returns false when the deck does not exist.
pub async fn delete_deck<'e, E>(executor: E, deck_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM decks WHERE id = $1
        "#,
    )
    .bind(deck_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}
