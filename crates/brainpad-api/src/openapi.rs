use axum::Json;
use utoipa::OpenApi;

use brainpad_core::{
    CreateNoteInput, DeleteNoteInput, DeleteNoteResponse, ErrorResponse, HealthResponse, Note,
    NoteResponse, NotesResponse, SearchNotesInput, UpdateNoteInput,
};

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "brainpad API",
        description = "Create, edit, delete and search short notes."
    ),
    paths(
        handlers::health_check,
        handlers::notes::list_notes,
        handlers::notes::create_note,
        handlers::notes::update_note,
        handlers::notes::delete_note,
        handlers::notes::search_notes,
    ),
    components(schemas(
        Note,
        CreateNoteInput,
        UpdateNoteInput,
        DeleteNoteInput,
        SearchNotesInput,
        NotesResponse,
        NoteResponse,
        DeleteNoteResponse,
        ErrorResponse,
        HealthResponse,
    )),
    tags(
        (name = "Notes", description = "Note queries and mutations"),
        (name = "System", description = "Health"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
