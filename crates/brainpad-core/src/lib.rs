//! # brainpad-core
//!
//! Core types, validation rules, and traits for brainpad.
//!
//! This crate holds everything both sides of the network boundary agree on:
//! the [`Note`] model, the request/response contracts of the five note
//! operations, the validation functions that the server and the client run
//! identically, and the [`NoteRepository`] trait the stores implement.

pub mod defaults;
pub mod error;
pub mod ids;
pub mod models;
pub mod traits;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use ids::new_note_id;
pub use models::*;
pub use traits::*;
pub use validation::{NewNote, NotePatch, ValidationError};
