//! Repository for the `snippets` table.

use sqlx::PgPool;
use snippets_core::types::DbId;

use crate::models::snippet::{Snippet, WriteSnippet};

/// Column list shared across queries. Every query aliases the snippet row
/// as `s` and joins the owner as `u`.
const COLUMNS: &str = "s.id, s.owner_id, u.username AS owner_username, s.title, s.code, \
                       s.linenos, s.language, s.style, s.highlighted, s.created_at, s.updated_at";

/// Stable list ordering: creation time, then id to break ties.
const ORDER: &str = "ORDER BY s.created_at ASC, s.id ASC";

/// Provides CRUD operations for snippets.
pub struct SnippetRepo;

impl SnippetRepo {
    /// Insert a new snippet owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &WriteSnippet,
    ) -> Result<Snippet, sqlx::Error> {
        let query = format!(
            "WITH s AS (
                INSERT INTO snippets (owner_id, title, code, linenos, language, style, highlighted)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
             )
             SELECT {COLUMNS} FROM s JOIN users u ON u.id = s.owner_id"
        );
        sqlx::query_as::<_, Snippet>(&query)
            .bind(owner_id)
            .bind(&input.fields.title)
            .bind(&input.fields.code)
            .bind(input.fields.linenos)
            .bind(&input.fields.language)
            .bind(&input.fields.style)
            .bind(&input.highlighted)
            .fetch_one(pool)
            .await
    }

    /// Find a snippet by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Snippet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM snippets s JOIN users u ON u.id = s.owner_id WHERE s.id = $1"
        );
        sqlx::query_as::<_, Snippet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of snippets, oldest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Snippet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM snippets s JOIN users u ON u.id = s.owner_id
             {ORDER} LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Snippet>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of snippets.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM snippets")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Overwrite every client-writable column of a snippet.
    ///
    /// The owner never changes. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &WriteSnippet,
    ) -> Result<Option<Snippet>, sqlx::Error> {
        let query = format!(
            "WITH s AS (
                UPDATE snippets SET
                    title = $2,
                    code = $3,
                    linenos = $4,
                    language = $5,
                    style = $6,
                    highlighted = $7
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM s JOIN users u ON u.id = s.owner_id"
        );
        sqlx::query_as::<_, Snippet>(&query)
            .bind(id)
            .bind(&input.fields.title)
            .bind(&input.fields.code)
            .bind(input.fields.linenos)
            .bind(&input.fields.language)
            .bind(&input.fields.style)
            .bind(&input.highlighted)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a snippet by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Snippet ids owned by any of `owner_ids`, as `(owner_id, snippet_id)`
    /// pairs in list order.
    pub async fn list_ids_by_owners(
        pool: &PgPool,
        owner_ids: &[DbId],
    ) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query =
            format!("SELECT s.owner_id, s.id FROM snippets s WHERE s.owner_id = ANY($1) {ORDER}");
        sqlx::query_as::<_, (DbId, DbId)>(&query)
            .bind(owner_ids)
            .fetch_all(pool)
            .await
    }
}
