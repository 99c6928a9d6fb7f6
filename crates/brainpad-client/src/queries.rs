//! Cached note queries and the mutations that keep the cache in step.

use std::sync::Arc;

use tracing::debug;

use brainpad_core::{defaults::NOTES_QUERY_KEY, CreateNoteInput, Note, UpdateNoteInput};

use crate::api::NotesApi;
use crate::cache::QueryCache;
use crate::error::ClientResult;

/// Data access for the notes page.
///
/// The full list lives in the cache under `"notes"`:
///
/// - create marks it stale so the next [`notes`](Self::notes) refetches
/// - update replaces the matching note in place
/// - delete removes the matching note in place
/// - search results go to the caller and never touch the cache
/// - a list response that started before any of those mutations is handed
///   to its caller but not stored
#[derive(Clone)]
pub struct NotesQueries {
    api: Arc<dyn NotesApi>,
    cache: QueryCache<Vec<Note>>,
}

impl NotesQueries {
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
        }
    }

    pub fn cache(&self) -> &QueryCache<Vec<Note>> {
        &self.cache
    }

    /// All notes, newest first; served from cache while fresh.
    pub async fn notes(&self) -> ClientResult<Vec<Note>> {
        if let Some(notes) = self.cache.get_fresh(NOTES_QUERY_KEY).await {
            return Ok(notes);
        }
        let generation = self.cache.generation(NOTES_QUERY_KEY).await;
        let notes = self.api.list().await?;
        let stored = self
            .cache
            .set_if_current(NOTES_QUERY_KEY, notes.clone(), generation)
            .await;
        debug!(
            subsystem = "client",
            component = "queries",
            op = "list",
            result_count = notes.len(),
            stored,
            "Fetched notes"
        );
        Ok(notes)
    }

    /// Last loaded list without fetching, fresh or stale.
    pub async fn cached_notes(&self) -> Option<Vec<Note>> {
        self.cache.peek(NOTES_QUERY_KEY).await
    }

    pub async fn create(&self, input: CreateNoteInput) -> ClientResult<Note> {
        let note = self.api.create(input).await?;
        self.cache.invalidate(NOTES_QUERY_KEY).await;
        Ok(note)
    }

    pub async fn update(&self, input: UpdateNoteInput) -> ClientResult<Note> {
        let note = self.api.update(input).await?;
        let replacement = note.clone();
        self.cache
            .update(NOTES_QUERY_KEY, move |notes| {
                if let Some(slot) = notes.iter_mut().find(|n| n.id == replacement.id) {
                    *slot = replacement;
                }
            })
            .await;
        Ok(note)
    }

    pub async fn delete(&self, id: &str) -> ClientResult<String> {
        let removed = self.api.delete(id).await?;
        self.cache
            .update(NOTES_QUERY_KEY, |notes| notes.retain(|n| n.id != removed))
            .await;
        Ok(removed)
    }

    pub async fn search(&self, query: &str) -> ClientResult<Vec<Note>> {
        self.api.search(query).await
    }
}
