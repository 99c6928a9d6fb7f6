//! End to end: NotesClient against the real router on an ephemeral port,
//! backed by the in-memory store.

use std::sync::Arc;

use brainpad_api::{create_router, AppState, HttpConfig};
use brainpad_client::{ClientError, NotesApi, NotesClient, NotesQueries};
use brainpad_core::{CreateNoteInput, UpdateNoteInput};
use brainpad_db::MemoryNoteRepository;

async fn spawn_server() -> NotesClient {
    let store = MemoryNoteRepository::new();
    let router = create_router(AppState::new(Arc::new(store)), &HttpConfig::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    NotesClient::new(format!("http://{addr}")).unwrap()
}

#[tokio::test]
async fn test_full_note_lifecycle() {
    let client = spawn_server().await;

    let created = client
        .create(CreateNoteInput::new("A", "B").with_tags(["x", "y"]))
        .await
        .unwrap();
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.tags, vec!["x", "y"]);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let updated = client
        .update(UpdateNoteInput::new(&created.id).tags(["z"]))
        .await
        .unwrap();
    assert_eq!(updated.tags, vec!["z"]);
    assert!(updated.updated_at > updated.created_at);

    let hits = client.search("z").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert!(client.search("   ").await.unwrap().is_empty());

    assert_eq!(client.delete(&created.id).await.unwrap(), created.id);
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_server_errors_surface_with_message() {
    let client = spawn_server().await;

    let err = client
        .update(UpdateNoteInput::new("missing").title("X"))
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Note not found.");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_query_cache_over_http() {
    let client = spawn_server().await;
    let queries = NotesQueries::new(Arc::new(client));

    assert!(queries.notes().await.unwrap().is_empty());
    let note = queries
        .create(CreateNoteInput::new("First", ""))
        .await
        .unwrap();

    let notes = queries.notes().await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, note.id);

    queries.delete(&note.id).await.unwrap();
    assert!(queries.cached_notes().await.unwrap().is_empty());
}
