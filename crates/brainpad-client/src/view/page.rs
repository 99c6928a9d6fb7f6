//! The notes dashboard: search box, grid and create form together.

use std::sync::Arc;

use tracing::warn;

use brainpad_core::Note;

use crate::api::NotesApi;
use crate::error::ClientResult;
use crate::queries::NotesQueries;
use crate::view::card::NoteCard;
use crate::view::form::CreateNoteForm;
use crate::view::grid::GridContent;
use crate::view::search::SearchController;

pub struct NotesPage {
    queries: NotesQueries,
    search: SearchController,
    pub form: CreateNoteForm,
    error: Option<String>,
}

impl NotesPage {
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self::with_search(NotesQueries::new(api), SearchController::new)
    }

    /// Build with a custom search controller, e.g. a different debounce.
    pub fn with_search(
        queries: NotesQueries,
        search: impl FnOnce(NotesQueries) -> SearchController,
    ) -> Self {
        Self {
            search: search(queries.clone()),
            queries,
            form: CreateNoteForm::new(),
            error: None,
        }
    }

    pub fn queries(&self) -> &NotesQueries {
        &self.queries
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Load the full list into the cache, refetching only when it is stale.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        match self.queries.notes().await {
            Ok(_) => {
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(subsystem = "view", component = "page", error = %e, "Failed to load notes");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Submit the create form and reload the list on success.
    pub async fn submit_form(&mut self) -> ClientResult<Note> {
        let note = self.form.submit(&self.queries).await?;
        self.refresh().await?;
        Ok(note)
    }

    /// Grid contents: search results while search is active, else the
    /// cached list. Card edits and deletes show up here without a refresh.
    pub async fn grid(&self) -> GridContent {
        let search = self.search.state();
        if search.active {
            GridContent::build(Some(search.results.as_slice()), search.loading, true)
        } else {
            let notes = self.queries.cached_notes().await;
            GridContent::build(notes.as_deref(), notes.is_none(), false)
        }
    }

    /// Editable cards for whatever the grid currently shows.
    pub async fn cards(&self) -> Vec<NoteCard> {
        let search = self.search.state();
        let notes = if search.active {
            search.results
        } else {
            self.queries.cached_notes().await.unwrap_or_default()
        };
        notes.into_iter().map(NoteCard::new).collect()
    }
}
