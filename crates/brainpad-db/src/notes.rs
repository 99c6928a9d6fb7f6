//! PostgreSQL note repository.

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use tracing::debug;

use brainpad_core::{Error, Note, NotePatch, NoteRepository, Result};

use crate::escape_like;

/// Columns returned by every statement, in `Note` field order.
const NOTE_COLUMNS: &str = "id, title, content, tags, created_at, updated_at";

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn list_sql() -> String {
        format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY created_at DESC")
    }

    fn insert_sql() -> String {
        format!(
            "INSERT INTO notes (id, title, content, tags, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {NOTE_COLUMNS}"
        )
    }

    /// Absent patch fields bind as NULL and keep the stored value.
    fn update_sql() -> String {
        format!(
            "UPDATE notes SET \
                title = COALESCE($2, title), \
                content = COALESCE($3, content), \
                tags = COALESCE($4, tags), \
                updated_at = GREATEST($5, created_at) \
             WHERE id = $1 RETURNING {NOTE_COLUMNS}"
        )
    }

    fn search_sql() -> String {
        format!(
            "SELECT {NOTE_COLUMNS} FROM notes \
             WHERE title ILIKE $1 ESCAPE '\\' \
                OR content ILIKE $1 ESCAPE '\\' \
                OR tags::text ILIKE $1 ESCAPE '\\' \
             ORDER BY created_at DESC"
        )
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn list(&self) -> Result<Vec<Note>> {
        let start = Instant::now();
        let notes = sqlx::query_as::<_, Note>(&Self::list_sql())
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "list",
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed notes"
        );
        Ok(notes)
    }

    async fn insert(&self, note: &Note) -> Result<Note> {
        let created = sqlx::query_as::<_, Note>(&Self::insert_sql())
            .bind(&note.id)
            .bind(&note.title)
            .bind(&note.content)
            .bind(&note.tags)
            .bind(note.created_at)
            .bind(note.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        created.ok_or_else(|| Error::Internal("Failed to create note.".to_string()))
    }

    async fn update(&self, id: &str, patch: &NotePatch, now: DateTime<Utc>) -> Result<Note> {
        let updated = sqlx::query_as::<_, Note>(&Self::update_sql())
            .bind(id)
            .bind(patch.title.as_deref())
            .bind(patch.content.as_deref())
            .bind(patch.tags.clone())
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        updated.ok_or_else(|| Error::NoteNotFound(id.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<Note>> {
        let start = Instant::now();
        let pattern = format!("%{}%", escape_like(query));
        let notes = sqlx::query_as::<_, Note>(&Self::search_sql())
            .bind(pattern)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "search",
            query = %query,
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Searched notes"
        );
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_return_all_note_columns() {
        for sql in [
            PgNoteRepository::list_sql(),
            PgNoteRepository::insert_sql(),
            PgNoteRepository::update_sql(),
            PgNoteRepository::search_sql(),
        ] {
            assert!(sql.contains(NOTE_COLUMNS), "missing columns in: {sql}");
        }
    }

    #[test]
    fn test_reads_order_newest_first() {
        assert!(PgNoteRepository::list_sql().ends_with("ORDER BY created_at DESC"));
        assert!(PgNoteRepository::search_sql().ends_with("ORDER BY created_at DESC"));
    }

    #[test]
    fn test_search_matches_three_columns_with_escape() {
        let sql = PgNoteRepository::search_sql();
        assert_eq!(sql.matches("ILIKE $1 ESCAPE '\\'").count(), 3);
        assert!(sql.contains("tags::text"));
    }

    #[test]
    fn test_update_clamps_updated_at() {
        assert!(PgNoteRepository::update_sql().contains("GREATEST($5, created_at)"));
    }
}
