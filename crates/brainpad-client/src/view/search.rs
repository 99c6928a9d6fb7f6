//! Debounced search box state.
//!
//! Keystrokes land in [`SearchController::input`]. Each one replaces the
//! single pending debounce task, so only the text that survives a quiet
//! period is dispatched. Requests are numbered; a response is applied only
//! if no newer dispatch happened while it was in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use brainpad_core::{defaults, Note};

use crate::queries::NotesQueries;

/// Observable search state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Raw text in the box.
    pub input: String,
    /// Last text that survived the debounce.
    pub debounced: String,
    /// Whether the grid should show search results instead of the full list.
    pub active: bool,
    /// A dispatched search has not answered yet.
    pub loading: bool,
    pub results: Vec<Note>,
    pub error: Option<String>,
}

struct Inner {
    queries: NotesQueries,
    delay: Duration,
    state: watch::Sender<SearchState>,
    /// Number of the most recent dispatch. Responses carrying an older
    /// number are dropped.
    latest: AtomicU64,
    pending: Mutex<Option<JoinHandle<()>>>,
}

pub struct SearchController {
    inner: Arc<Inner>,
}

impl SearchController {
    pub fn new(queries: NotesQueries) -> Self {
        Self::with_delay(queries, Duration::from_millis(defaults::SEARCH_DEBOUNCE_MS))
    }

    pub fn with_delay(queries: NotesQueries, delay: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            inner: Arc::new(Inner {
                queries,
                delay,
                state,
                latest: AtomicU64::new(0),
                pending: Mutex::new(None),
            }),
        }
    }

    pub fn state(&self) -> SearchState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state.subscribe()
    }

    /// Record a keystroke and restart the debounce timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn input(&self, text: impl Into<String>) {
        let text = text.into();
        trace!(subsystem = "view", component = "search", len = text.len(), "Search input");
        self.inner.state.send_modify(|s| s.input = text.clone());

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            tokio::time::sleep(inner.delay).await;
            Inner::dispatch(&inner, text);
        });

        let previous = self.inner.lock_pending().replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Equivalent to typing an empty string.
    pub fn clear(&self) {
        self.input("");
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Some(task) = self.inner.lock_pending().take() {
            task.abort();
        }
    }
}

impl Inner {
    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Act on debounced text. The request runs in its own task so a later
    /// keystroke cannot cancel it; staleness is settled by sequence number.
    fn dispatch(inner: &Arc<Self>, text: String) {
        let seq = inner.latest.fetch_add(1, Ordering::SeqCst) + 1;

        if text.trim().is_empty() {
            debug!(subsystem = "view", component = "search", seq, "Search cleared");
            inner.state.send_modify(|s| {
                s.debounced = text;
                s.active = false;
                s.loading = false;
                s.results.clear();
                s.error = None;
            });
            return;
        }

        debug!(
            subsystem = "view",
            component = "search",
            seq,
            query = %text,
            "Dispatching search"
        );
        inner.state.send_modify(|s| {
            s.debounced = text.clone();
            s.active = true;
            s.loading = true;
            s.error = None;
        });

        let inner = Arc::clone(inner);
        tokio::spawn(async move {
            let outcome = inner.queries.search(&text).await;
            if inner.latest.load(Ordering::SeqCst) != seq {
                warn!(
                    subsystem = "view",
                    component = "search",
                    seq,
                    query = %text,
                    "Dropping stale search response"
                );
                return;
            }
            inner.state.send_modify(|s| {
                s.loading = false;
                match outcome {
                    Ok(notes) => {
                        s.results = notes;
                        s.error = None;
                    }
                    Err(e) => {
                        s.results.clear();
                        s.error = Some(e.to_string());
                    }
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeNotesApi;

    async fn controller() -> (Arc<FakeNotesApi>, SearchController) {
        let api = Arc::new(FakeNotesApi::new());
        api.seed("Milk").await;
        api.seed("Bread").await;
        let queries = NotesQueries::new(api.clone());
        (api, SearchController::new(queries))
    }

    /// Let spawned tasks run to their next await point.
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_value_is_dispatched_after_quiet_period() {
        let (api, search) = controller().await;

        search.input("m");
        tokio::time::sleep(Duration::from_millis(100)).await;
        search.input("mi");
        tokio::time::sleep(Duration::from_millis(100)).await;
        search.input("milk");

        tokio::time::sleep(Duration::from_millis(299)).await;
        settle().await;
        assert_eq!(api.calls("search"), 0);
        assert!(!search.state().active);

        tokio::time::sleep(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(api.calls("search"), 1);

        let state = search.state();
        assert!(state.active);
        assert!(!state.loading);
        assert_eq!(state.debounced, "milk");
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].title, "Milk");
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_deactivates_without_request() {
        let (api, search) = controller().await;

        search.input("milk");
        tokio::time::sleep(Duration::from_millis(301)).await;
        settle().await;
        assert!(search.state().active);

        search.input("   ");
        tokio::time::sleep(Duration::from_millis(301)).await;
        settle().await;

        let state = search.state();
        assert!(!state.active);
        assert!(state.results.is_empty());
        assert_eq!(api.calls("search"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_then_retype_before_timer_dispatches_nothing_new() {
        let (api, search) = controller().await;

        search.input("milk");
        tokio::time::sleep(Duration::from_millis(100)).await;
        search.clear();
        tokio::time::sleep(Duration::from_millis(301)).await;
        settle().await;

        assert_eq!(api.calls("search"), 0);
        assert_eq!(search.state().input, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_dropped() {
        let (api, search) = controller().await;
        api.delay_search("milk", Duration::from_secs(2));

        search.input("milk");
        tokio::time::sleep(Duration::from_millis(301)).await;
        settle().await;
        assert!(search.state().loading);

        search.input("bread");
        tokio::time::sleep(Duration::from_millis(301)).await;
        settle().await;
        assert_eq!(search.state().results[0].title, "Bread");

        // the slow "milk" response arrives after "bread" was applied
        tokio::time::sleep(Duration::from_secs(3)).await;
        settle().await;

        let state = search.state();
        assert_eq!(api.calls("search"), 2);
        assert_eq!(state.debounced, "bread");
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].title, "Bread");
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_after_clear_is_dropped() {
        let (api, search) = controller().await;
        api.delay_search("milk", Duration::from_secs(1));

        search.input("milk");
        tokio::time::sleep(Duration::from_millis(301)).await;
        search.clear();
        tokio::time::sleep(Duration::from_secs(2)).await;
        settle().await;

        let state = search.state();
        assert!(!state.active);
        assert!(state.results.is_empty());
    }
}
