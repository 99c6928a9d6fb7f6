//! What the notes grid shows.

use chrono::NaiveDate;

use brainpad_core::{defaults, Note};

pub const EMPTY_SEARCH_TITLE: &str = "No Results Found";
pub const EMPTY_SEARCH_TEXT: &str = "Try a different search term.";
pub const EMPTY_LIST_TITLE: &str = "No Notes Yet";
pub const EMPTY_LIST_TEXT: &str = "Click 'Add Note' to create your first note.";

/// Read-only rendering of a note in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCardView {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub tags: Vec<String>,
    pub created_on: NaiveDate,
}

impl From<&Note> for NoteCardView {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            preview: preview(&note.content),
            tags: note.tags.clone(),
            created_on: note.created_at.date_naive(),
        }
    }
}

/// First 150 characters of `content`, with `...` appended when cut.
pub fn preview(content: &str) -> String {
    let limit = defaults::CARD_PREVIEW_CHARS;
    match content.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridContent {
    /// Placeholder cards while the active query is in flight.
    Loading { skeletons: usize },
    Empty {
        title: &'static str,
        text: &'static str,
    },
    Notes(Vec<NoteCardView>),
}

impl GridContent {
    /// Pick the grid contents for the active query.
    ///
    /// `notes` is `None` before the first response arrives.
    pub fn build(notes: Option<&[Note]>, loading: bool, searching: bool) -> Self {
        if loading {
            return GridContent::Loading {
                skeletons: defaults::GRID_SKELETON_CARDS,
            };
        }
        match notes {
            Some(notes) if !notes.is_empty() => {
                GridContent::Notes(notes.iter().map(NoteCardView::from).collect())
            }
            _ if searching => GridContent::Empty {
                title: EMPTY_SEARCH_TITLE,
                text: EMPTY_SEARCH_TEXT,
            },
            _ => GridContent::Empty {
                title: EMPTY_LIST_TITLE,
                text: EMPTY_LIST_TEXT,
            },
        }
    }
}
