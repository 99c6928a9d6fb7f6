//! Input validation shared by the API handlers and the client.
//!
//! Both sides of the network call the same functions, so a request the
//! client accepts is one the server accepts and vice versa. Each function
//! turns a raw request body into the validated value the store consumes.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{CreateNoteInput, Note, SearchNotesInput, UpdateNoteInput};

/// A request rejected before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required.")]
    TitleRequired,

    #[error("Title cannot be empty.")]
    TitleEmpty,

    #[error("No update data provided.")]
    NoUpdateData,

    /// Body was not valid JSON or did not match the expected shape.
    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

/// A validated create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NewNote {
    /// Materialize the note with its id and both timestamps set to `now`.
    pub fn into_note(self, id: String, now: DateTime<Utc>) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A validated partial update. At least one field is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }

    /// Apply to a note: present fields replace (tags wholesale), and
    /// `updated_at` moves to `now` but never before `created_at`.
    pub fn apply_to(&self, note: &mut Note, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        if let Some(tags) = &self.tags {
            note.tags = tags.clone();
        }
        note.updated_at = now.max(note.created_at);
    }
}

/// Validate a create request. Missing tags default to an empty list.
pub fn validate_create(input: &CreateNoteInput) -> Result<NewNote, ValidationError> {
    if input.title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(NewNote {
        title: input.title.clone(),
        content: input.content.clone(),
        tags: input.tags.clone().unwrap_or_default(),
    })
}

/// Validate an update request, splitting off the id.
pub fn validate_update(input: &UpdateNoteInput) -> Result<(String, NotePatch), ValidationError> {
    if matches!(&input.title, Some(t) if t.is_empty()) {
        return Err(ValidationError::TitleEmpty);
    }
    let patch = NotePatch {
        title: input.title.clone(),
        content: input.content.clone(),
        tags: input.tags.clone(),
    };
    if patch.is_empty() {
        return Err(ValidationError::NoUpdateData);
    }
    Ok((input.id.clone(), patch))
}

/// Returns the query to run, or `None` when it is blank and the search
/// should short-circuit to an empty result.
pub fn search_query(input: &SearchNotesInput) -> Option<&str> {
    if input.query.trim().is_empty() {
        None
    } else {
        Some(input.query.as_str())
    }
}
