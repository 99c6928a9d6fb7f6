//! Error types for brainpad.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias using brainpad's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the note stores and the operations built on them.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No note with the given id
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Input rejected by the shared validation rules
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Store failure that is not a database error
    #[error("Internal error: {0}")]
    Internal(String),
}
