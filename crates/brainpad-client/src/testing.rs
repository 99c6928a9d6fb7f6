//! In-process [`NotesApi`] for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use brainpad_core::{
    new_note_id,
    validation::{validate_create, validate_update},
    CreateNoteInput, Note, NoteRepository, UpdateNoteInput,
};
use brainpad_db::MemoryNoteRepository;

use crate::api::NotesApi;
use crate::error::{ClientError, ClientResult};

/// Server stand-in backed by the in-memory store. Counts calls per
/// operation and can delay lists and searches or fail updates on demand.
pub(crate) struct FakeNotesApi {
    store: MemoryNoteRepository,
    calls: Mutex<HashMap<&'static str, usize>>,
    search_delays: Mutex<HashMap<String, Duration>>,
    list_delay: Mutex<Duration>,
    fail_updates: AtomicBool,
    base: DateTime<Utc>,
    tick: AtomicI64,
}

impl FakeNotesApi {
    pub fn new() -> Self {
        Self {
            store: MemoryNoteRepository::new(),
            calls: Mutex::new(HashMap::new()),
            search_delays: Mutex::new(HashMap::new()),
            list_delay: Mutex::new(Duration::ZERO),
            fail_updates: AtomicBool::new(false),
            base: Utc::now(),
            tick: AtomicI64::new(0),
        }
    }

    /// Strictly increasing timestamps so newest-first order is deterministic.
    fn now(&self) -> DateTime<Utc> {
        let tick = self.tick.fetch_add(1, Ordering::SeqCst) + 1;
        self.base + chrono::Duration::seconds(tick)
    }

    fn record(&self, op: &'static str) {
        *self.calls.lock().unwrap().entry(op).or_default() += 1;
    }

    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().unwrap().get(op).copied().unwrap_or(0)
    }

    pub async fn seed(&self, title: &str) -> Note {
        let note = validate_create(&CreateNoteInput::new(title, ""))
            .unwrap()
            .into_note(new_note_id(), self.now());
        self.store.insert(&note).await.unwrap()
    }

    pub fn delay_search(&self, query: &str, delay: Duration) {
        self.search_delays
            .lock()
            .unwrap()
            .insert(query.to_string(), delay);
    }

    /// Hold list responses back. The snapshot is taken before the delay.
    pub fn delay_list(&self, delay: Duration) {
        *self.list_delay.lock().unwrap() = delay;
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

fn api_error(err: brainpad_core::Error) -> ClientError {
    let (status, message) = match err {
        brainpad_core::Error::NoteNotFound(_) => (404, "Note not found.".to_string()),
        other => (500, other.to_string()),
    };
    ClientError::Api { status, message }
}

#[async_trait]
impl NotesApi for FakeNotesApi {
    async fn list(&self) -> ClientResult<Vec<Note>> {
        self.record("list");
        let notes = self.store.list().await.map_err(api_error)?;
        let delay = *self.list_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(notes)
    }

    async fn create(&self, input: CreateNoteInput) -> ClientResult<Note> {
        let new = validate_create(&input)?;
        self.record("create");
        let note = new.into_note(new_note_id(), self.now());
        self.store.insert(&note).await.map_err(api_error)
    }

    async fn update(&self, input: UpdateNoteInput) -> ClientResult<Note> {
        let (id, patch) = validate_update(&input)?;
        self.record("update");
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: 500,
                message: "connection refused".to_string(),
            });
        }
        self.store
            .update(&id, &patch, self.now())
            .await
            .map_err(api_error)
    }

    async fn delete(&self, id: &str) -> ClientResult<String> {
        self.record("delete");
        self.store.delete(id).await.map_err(api_error)?;
        Ok(id.to_string())
    }

    async fn search(&self, query: &str) -> ClientResult<Vec<Note>> {
        self.record("search");
        let delay = self.search_delays.lock().unwrap().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.store.search(query).await.map_err(api_error)
    }
}
