//! # brainpad-api
//!
//! HTTP surface for brainpad notes.
//!
//! | Method | Path            | Body                | Response                      |
//! |--------|-----------------|---------------------|-------------------------------|
//! | GET    | `/notes`        | -                   | `{notes}`                     |
//! | POST   | `/notes`        | `CreateNoteInput`   | `{note}`                      |
//! | POST   | `/notes/update` | `UpdateNoteInput`   | `{note}`                      |
//! | POST   | `/notes/delete` | `DeleteNoteInput`   | `{success, id}`               |
//! | POST   | `/notes/search` | `SearchNotesInput`  | `{notes}`                     |
//! | GET    | `/health`       | -                   | `{status, version}`           |
//! | GET    | `/openapi.json` | -                   | OpenAPI document              |
//!
//! Errors are `{"error": "<message>"}` with status 400, 404 or 500.

pub mod config;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod telemetry;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use brainpad_core::NoteRepository;

pub use config::{HttpConfig, ServerConfig, StoreBackend};
pub use error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteRepository>,
}

impl AppState {
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }
}

/// Request ids are UUIDv7 so they sort by arrival time in the logs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Build the application router with its middleware stack.
pub fn create_router(state: AppState, http: &HttpConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(http.allowed_origins.clone())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(openapi::openapi_json))
        .route(
            "/notes",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route("/notes/update", post(handlers::update_note))
        .route("/notes/delete", post(handlers::delete_note))
        .route("/notes/search", post(handlers::search_notes))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(http.body_limit_bytes))
        .with_state(state)
}
