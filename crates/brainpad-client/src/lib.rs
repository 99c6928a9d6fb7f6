//! # brainpad-client
//!
//! Client side of brainpad:
//!
//! - [`NotesClient`]: typed HTTP client that validates before sending
//! - [`NotesQueries`]: cached list query plus mutations that keep it current
//! - [`view`]: debounced search, grid, inline-edit card and create form state
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use brainpad_client::{NotesClient, view::NotesPage};
//!
//! let client = Arc::new(NotesClient::from_env()?);
//! let mut page = NotesPage::new(client);
//! page.refresh().await?;
//! page.search().input("milk");
//! ```

pub mod api;
pub mod cache;
pub mod error;
pub mod http;
pub mod queries;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use api::NotesApi;
pub use cache::{CacheStats, QueryCache};
pub use error::{ClientError, ClientResult};
pub use http::NotesClient;
pub use queries::NotesQueries;
