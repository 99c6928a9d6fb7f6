use async_trait::async_trait;

use brainpad_core::{CreateNoteInput, Note, UpdateNoteInput};

use crate::error::ClientResult;

/// The five note operations as seen from the client.
///
/// [`NotesClient`](crate::NotesClient) implements this over HTTP; tests
/// substitute in-process fakes.
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Note>>;

    async fn create(&self, input: CreateNoteInput) -> ClientResult<Note>;

    async fn update(&self, input: UpdateNoteInput) -> ClientResult<Note>;

    /// Returns the id of the removed note.
    async fn delete(&self, id: &str) -> ClientResult<String>;

    async fn search(&self, query: &str) -> ClientResult<Vec<Note>>;
}
