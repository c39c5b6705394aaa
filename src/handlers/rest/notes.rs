use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use super::read_body;
use crate::{
    dto::{CreateNoteRequest, DataResponse, ErrorResponse, MessageResponse, UpdateNoteRequest},
    models::Note,
    service::NoteService,
};

#[derive(OpenApi)]
#[openapi(
    paths(get_all_notes, create_note, get_one_note, update_note, delete_note),
    components(schemas(
        Note,
        CreateNoteRequest,
        UpdateNoteRequest,
        MessageResponse,
        ErrorResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "List of all notes", body = DataResponse<Vec<Note>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.get_all_notes().await {
        Ok(notes) => (StatusCode::OK, Json(DataResponse { data: notes })).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = DataResponse<Note>),
        (status = 400, description = "Missing title/content or unknown notebook", body = ErrorResponse),
        (status = 500, description = "Store failure or notebook service unavailable", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Response {
    let request = match read_body(payload) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };

    match service.create_note(request).await {
        Ok(note) => (StatusCode::CREATED, Json(DataResponse { data: note })).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = DataResponse<Note>),
        (status = 400, description = "Invalid note ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
) -> Response {
    match service.get_one_note(&id).await {
        Ok(note) => (StatusCode::OK, Json(DataResponse { data: note })).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = DataResponse<Note>),
        (status = 400, description = "Invalid ID, no fields, blank field or unknown notebook", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Store failure or notebook service unavailable", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Response {
    let request = match read_body(payload) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };

    match service.update_note(&id, request).await {
        Ok(note) => (StatusCode::OK, Json(DataResponse { data: note })).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = MessageResponse),
        (status = 400, description = "Invalid note ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(State(service): State<Arc<NoteService>>, Path(id): Path<String>) -> Response {
    match service.delete_note(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Note was deleted".to_string(),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
