//! Inline-editable note card.

use tracing::{debug, info, warn};

use brainpad_core::{validation::validate_update, Note, UpdateNoteInput};

use crate::error::ClientResult;
use crate::queries::NotesQueries;
use crate::view::form::{join_tags, parse_tags};
use crate::view::grid::NoteCardView;

/// Editable copy of a note's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl Draft {
    fn of(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            tags: note.tags.clone(),
        }
    }

    /// Tags as shown in the edit field.
    pub fn tags_text(&self) -> String {
        join_tags(&self.tags)
    }

    /// Only the fields that differ from `note`, or `None` when nothing does.
    fn changes_from(&self, note: &Note) -> Option<UpdateNoteInput> {
        if !note.differs_from(&self.title, &self.content, &self.tags) {
            return None;
        }
        let mut input = UpdateNoteInput::new(&note.id);
        if self.title != note.title {
            input = input.title(&self.title);
        }
        if self.content != note.content {
            input = input.content(&self.content);
        }
        if self.tags != note.tags {
            input = input.tags(self.tags.clone());
        }
        Some(input)
    }
}

/// What a focus loss did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurOutcome {
    /// The card was not being edited.
    Ignored,
    /// Nothing changed; edit mode closed without a request.
    Closed,
    /// Changes were saved and edit mode closed.
    Saved,
}

#[derive(Debug, Clone)]
pub struct NoteCard {
    note: Note,
    draft: Option<Draft>,
    error: Option<String>,
}

impl NoteCard {
    pub fn new(note: Note) -> Self {
        Self {
            note,
            draft: None,
            error: None,
        }
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn view(&self) -> NoteCardView {
        NoteCardView::from(&self.note)
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Message of the last failed save or delete.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the note with a newer copy. An open draft is reset to it.
    pub fn set_note(&mut self, note: Note) {
        if self.draft.is_some() {
            self.draft = Some(Draft::of(&note));
        }
        self.note = note;
    }

    /// Enter edit mode. Clicking a card that is already editing does nothing.
    pub fn click(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(Draft::of(&self.note));
            self.error = None;
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.title = title.into();
        }
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.content = content.into();
        }
    }

    /// Set tags from the comma-separated edit field.
    pub fn set_tags_text(&mut self, text: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.tags = parse_tags(text);
        }
    }

    pub fn has_changes(&self) -> bool {
        self.draft
            .as_ref()
            .is_some_and(|d| self.note.differs_from(&d.title, &d.content, &d.tags))
    }

    /// Leave edit mode, discarding the draft.
    pub fn cancel(&mut self) {
        self.draft = None;
        self.error = None;
    }

    /// Focus left the card: save if something changed, otherwise just close.
    pub async fn blur(&mut self, queries: &NotesQueries) -> ClientResult<BlurOutcome> {
        if !self.is_editing() {
            return Ok(BlurOutcome::Ignored);
        }
        if !self.has_changes() {
            debug!(
                subsystem = "view",
                component = "card",
                note_id = %self.note.id,
                "No changes on blur"
            );
            self.draft = None;
            return Ok(BlurOutcome::Closed);
        }
        self.save(queries).await?;
        Ok(BlurOutcome::Saved)
    }

    /// Send the changed fields. On failure the card stays in edit mode with
    /// the draft intact.
    pub async fn save(&mut self, queries: &NotesQueries) -> ClientResult<()> {
        let Some(draft) = &self.draft else {
            return Ok(());
        };
        let Some(input) = draft.changes_from(&self.note) else {
            self.draft = None;
            return Ok(());
        };
        if let Err(e) = validate_update(&input) {
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        match queries.update(input).await {
            Ok(note) => {
                info!(
                    subsystem = "view",
                    component = "card",
                    note_id = %note.id,
                    "Card saved"
                );
                self.note = note;
                self.draft = None;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(
                    subsystem = "view",
                    component = "card",
                    note_id = %self.note.id,
                    error = %e,
                    "Card save failed"
                );
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Delete the note once `confirm` agrees. Returns whether it was deleted.
    pub async fn delete(
        &mut self,
        queries: &NotesQueries,
        confirm: impl FnOnce(&Note) -> bool,
    ) -> ClientResult<bool> {
        if !confirm(&self.note) {
            return Ok(false);
        }
        match queries.delete(&self.note.id).await {
            Ok(_) => Ok(true),
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
