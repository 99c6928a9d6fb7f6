//! Centralized default constants for brainpad.
//!
//! Server, client, and presentation code reference these instead of
//! repeating magic numbers.

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host for the API server.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default bind port for the API server.
pub const SERVER_PORT: u16 = 3000;

/// Default PostgreSQL connection URL.
pub const DATABASE_URL: &str = "postgres://localhost/brainpad";

/// Default CORS origins (dev frontend and the API itself).
pub const ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// PostgreSQL pool size.
pub const DB_MAX_CONNECTIONS: u32 = 10;

/// Seconds a query waits for a free pool connection.
pub const DB_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Maximum accepted request body size in bytes (1 MiB).
pub const REQUEST_BODY_LIMIT_BYTES: usize = 1024 * 1024;

// =============================================================================
// CLIENT
// =============================================================================

/// Default base URL the client talks to.
pub const API_URL: &str = "http://localhost:3000";

/// Client request timeout in seconds.
pub const CLIENT_TIMEOUT_SECS: u64 = 30;

/// Cache key shared by the note list query and the mutations that touch it.
pub const NOTES_QUERY_KEY: &str = "notes";

// =============================================================================
// PRESENTATION
// =============================================================================

/// Quiet period before a search keystroke burst is dispatched.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Characters of content shown on a note card before truncation.
pub const CARD_PREVIEW_CHARS: usize = 150;

/// Number of placeholder cards rendered while the grid is loading.
pub const GRID_SKELETON_CARDS: usize = 6;
