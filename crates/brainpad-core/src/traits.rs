//! Core traits for brainpad abstractions.
//!
//! The HTTP layer only sees these traits, so the PostgreSQL store and the
//! in-memory store are interchangeable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Note;
use crate::validation::NotePatch;

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Repository for the `notes` table.
///
/// Every method maps to exactly one statement against the store. There is
/// no locking and no multi-statement transaction, so concurrent writers to
/// the same note resolve as last write wins.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// All notes, newest `created_at` first.
    async fn list(&self) -> Result<Vec<Note>>;

    /// Persist a fully formed note and return the stored row.
    ///
    /// Returns `Error::Internal` if the store reports no row.
    async fn insert(&self, note: &Note) -> Result<Note>;

    /// Apply a patch to the note with the given id, setting `updated_at`.
    ///
    /// Returns `Error::NoteNotFound` if no row matches.
    async fn update(&self, id: &str, patch: &NotePatch, now: DateTime<Utc>) -> Result<Note>;

    /// Hard-delete the note with the given id.
    ///
    /// Returns `Error::NoteNotFound` if no row was removed.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Notes where `query` is a case-insensitive substring of the title,
    /// the content, or the textual form of the tags, newest first.
    async fn search(&self, query: &str) -> Result<Vec<Note>>;
}
