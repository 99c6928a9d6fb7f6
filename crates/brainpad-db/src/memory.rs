//! In-process note store.
//!
//! Same ordering and matching semantics as [`PgNoteRepository`], held in a
//! vector behind a lock. Used by the API's `memory` store backend for local
//! development and by handler and client tests that should not need
//! PostgreSQL.
//!
//! [`PgNoteRepository`]: crate::PgNoteRepository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::trace;

use brainpad_core::{Error, Note, NotePatch, NoteRepository, Result};

/// In-memory implementation of NoteRepository.
#[derive(Clone, Default)]
pub struct MemoryNoteRepository {
    notes: Arc<RwLock<Vec<Note>>>,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, e.g. with fixtures.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: Arc::new(RwLock::new(notes)),
        }
    }

    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }

    /// Newest first. Equal timestamps put the later insert first.
    fn newest_first(mut notes: Vec<Note>) -> Vec<Note> {
        notes.reverse();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notes
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn list(&self) -> Result<Vec<Note>> {
        let notes = self.notes.read().await.clone();
        Ok(Self::newest_first(notes))
    }

    async fn insert(&self, note: &Note) -> Result<Note> {
        let mut notes = self.notes.write().await;
        if notes.iter().any(|n| n.id == note.id) {
            return Err(Error::Internal(format!("duplicate note id {}", note.id)));
        }
        notes.push(note.clone());
        trace!(
            subsystem = "db",
            component = "memory_store",
            op = "insert",
            note_id = %note.id,
            "Inserted note"
        );
        Ok(note.clone())
    }

    async fn update(&self, id: &str, patch: &NotePatch, now: DateTime<Utc>) -> Result<Note> {
        let mut notes = self.notes.write().await;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))?;
        patch.apply_to(note, now);
        Ok(note.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Err(Error::NoteNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<Note>> {
        let matched: Vec<Note> = self
            .notes
            .read()
            .await
            .iter()
            .filter(|n| n.matches_query(query))
            .cloned()
            .collect();
        Ok(Self::newest_first(matched))
    }
}
