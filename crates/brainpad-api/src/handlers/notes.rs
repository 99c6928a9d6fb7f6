//! Note query and mutation handlers.
//!
//! Every handler validates with the shared rules from `brainpad_core`, calls
//! the store once, and wraps the result in the JSON envelope the client
//! expects. Bodies that fail to parse are reported as 400 like any other
//! validation failure.

use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;
use tracing::{debug, info};

use brainpad_core::{
    new_note_id,
    validation::{search_query, validate_create, validate_update},
    CreateNoteInput, DeleteNoteInput, DeleteNoteResponse, ErrorResponse, NoteResponse,
    NotesResponse, SearchNotesInput, UpdateNoteInput,
};

use crate::{error::ApiError, AppState};

fn body<T>(payload: Result<Json<T>, JsonRejection>, op: &'static str) -> Result<T, ApiError> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| ApiError::from(rejection).logged(op))
}

/// List every note, newest first.
#[utoipa::path(get, path = "/notes", tag = "Notes",
    responses(
        (status = 200, description = "All notes, newest first", body = NotesResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<NotesResponse>, ApiError> {
    let start = Instant::now();
    let notes = state
        .notes
        .list()
        .await
        .map_err(|e| ApiError::from(e).logged("list"))?;

    debug!(
        subsystem = "api",
        component = "notes",
        op = "list",
        result_count = notes.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Listed notes"
    );
    Ok(Json(NotesResponse { notes }))
}

/// Create a note with a generated id and equal timestamps.
#[utoipa::path(post, path = "/notes", tag = "Notes",
    request_body = CreateNoteInput,
    responses(
        (status = 200, description = "Created note", body = NoteResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<CreateNoteInput>, JsonRejection>,
) -> Result<Json<NoteResponse>, ApiError> {
    let input = body(payload, "create")?;
    let new = validate_create(&input).map_err(|e| ApiError::from(e).logged("create"))?;

    let note = new.into_note(new_note_id(), Utc::now());
    let note = state
        .notes
        .insert(&note)
        .await
        .map_err(|e| ApiError::from(e).logged("create"))?;

    info!(
        subsystem = "api",
        component = "notes",
        op = "create",
        note_id = %note.id,
        "Note created"
    );
    Ok(Json(NoteResponse { note }))
}

/// Apply a partial update. Absent fields are left unchanged.
#[utoipa::path(post, path = "/notes/update", tag = "Notes",
    request_body = UpdateNoteInput,
    responses(
        (status = 200, description = "Updated note", body = NoteResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn update_note(
    State(state): State<AppState>,
    payload: Result<Json<UpdateNoteInput>, JsonRejection>,
) -> Result<Json<NoteResponse>, ApiError> {
    let input = body(payload, "update")?;
    let (id, patch) = validate_update(&input).map_err(|e| ApiError::from(e).logged("update"))?;

    let note = state
        .notes
        .update(&id, &patch, Utc::now())
        .await
        .map_err(|e| ApiError::from(e).logged("update"))?;

    info!(
        subsystem = "api",
        component = "notes",
        op = "update",
        note_id = %note.id,
        "Note updated"
    );
    Ok(Json(NoteResponse { note }))
}

#[utoipa::path(post, path = "/notes/delete", tag = "Notes",
    request_body = DeleteNoteInput,
    responses(
        (status = 200, description = "Note removed", body = DeleteNoteResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn delete_note(
    State(state): State<AppState>,
    payload: Result<Json<DeleteNoteInput>, JsonRejection>,
) -> Result<Json<DeleteNoteResponse>, ApiError> {
    let DeleteNoteInput { id } = body(payload, "delete")?;

    state
        .notes
        .delete(&id)
        .await
        .map_err(|e| ApiError::from(e).logged("delete"))?;

    info!(
        subsystem = "api",
        component = "notes",
        op = "delete",
        note_id = %id,
        "Note deleted"
    );
    Ok(Json(DeleteNoteResponse { success: true, id }))
}

/// Case-insensitive substring search over title, content and tags.
///
/// A blank query returns an empty list without touching the store.
#[utoipa::path(post, path = "/notes/search", tag = "Notes",
    request_body = SearchNotesInput,
    responses(
        (status = 200, description = "Matching notes, newest first", body = NotesResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn search_notes(
    State(state): State<AppState>,
    payload: Result<Json<SearchNotesInput>, JsonRejection>,
) -> Result<Json<NotesResponse>, ApiError> {
    let input = body(payload, "search")?;
    let Some(query) = search_query(&input) else {
        debug!(subsystem = "api", component = "notes", op = "search", "Blank query");
        return Ok(Json(NotesResponse { notes: Vec::new() }));
    };

    let start = Instant::now();
    let notes = state
        .notes
        .search(query)
        .await
        .map_err(|e| ApiError::from(e).logged("search"))?;

    debug!(
        subsystem = "api",
        component = "notes",
        op = "search",
        query = %query,
        result_count = notes.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Search completed"
    );
    Ok(Json(NotesResponse { notes }))
}
