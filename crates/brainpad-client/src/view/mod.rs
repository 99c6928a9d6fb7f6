//! Presentation state for the notes dashboard.
//!
//! Plain state machines with async actions; any UI toolkit can render them.

pub mod card;
pub mod form;
pub mod grid;
pub mod page;
pub mod search;

pub use card::{BlurOutcome, Draft, NoteCard};
pub use form::{join_tags, parse_tags, CreateNoteForm};
pub use grid::{preview, GridContent, NoteCardView};
pub use page::NotesPage;
pub use search::{SearchController, SearchState};
