//! "Add Note" form state.

use tracing::{info, warn};

use brainpad_core::{validation::validate_create, CreateNoteInput, Note};

use crate::error::ClientResult;
use crate::queries::NotesQueries;

/// Split comma-separated tag text into trimmed, non-empty tags.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Inverse of [`parse_tags`] for display in a text field.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateNoteForm {
    pub open: bool,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub error: Option<String>,
}

impl CreateNoteForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close without submitting. Field values are kept for the next open.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn set_tags_text(&mut self, text: &str) {
        self.tags = parse_tags(text);
    }

    pub fn tags_text(&self) -> String {
        join_tags(&self.tags)
    }

    fn input(&self) -> CreateNoteInput {
        CreateNoteInput::new(&self.title, &self.content).with_tags(self.tags.clone())
    }

    /// Create the note. Success resets the fields and closes the form;
    /// failure leaves both untouched and records the message.
    pub async fn submit(&mut self, queries: &NotesQueries) -> ClientResult<Note> {
        let input = self.input();
        if let Err(e) = validate_create(&input) {
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        match queries.create(input).await {
            Ok(note) => {
                info!(subsystem = "view", component = "create_form", note_id = %note.id, "Note created");
                *self = Self::default();
                Ok(note)
            }
            Err(e) => {
                warn!(subsystem = "view", component = "create_form", error = %e, "Create failed");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
