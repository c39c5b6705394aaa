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
    dto::{
        CreateNotebookRequest, DataResponse, ErrorResponse, MessageResponse,
        UpdateNotebookRequest,
    },
    models::Notebook,
    service::NotebookService,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        get_all_notebooks,
        create_notebook,
        get_one_notebook,
        update_notebook,
        delete_notebook
    ),
    components(schemas(
        Notebook,
        CreateNotebookRequest,
        UpdateNotebookRequest,
        MessageResponse,
        ErrorResponse
    )),
    tags(
        (name = "notebooks", description = "Notebook management API")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/notebooks",
    responses(
        (status = 200, description = "List of all notebooks", body = DataResponse<Vec<Notebook>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notebooks"
)]
#[debug_handler]
pub async fn get_all_notebooks(State(service): State<Arc<NotebookService>>) -> Response {
    match service.get_all_notebooks().await {
        Ok(notebooks) => (StatusCode::OK, Json(DataResponse { data: notebooks })).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/notebooks",
    request_body = CreateNotebookRequest,
    responses(
        (status = 201, description = "Notebook created successfully", body = DataResponse<Notebook>),
        (status = 400, description = "Missing title or blank description", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notebooks"
)]
#[debug_handler]
pub async fn create_notebook(
    State(service): State<Arc<NotebookService>>,
    payload: Result<Json<CreateNotebookRequest>, JsonRejection>,
) -> Response {
    let request = match read_body(payload) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };

    match service.create_notebook(request).await {
        Ok(notebook) => {
            (StatusCode::CREATED, Json(DataResponse { data: notebook })).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/notebooks/{id}",
    params(
        ("id" = String, Path, description = "Notebook ID")
    ),
    responses(
        (status = 200, description = "Notebook found", body = DataResponse<Notebook>),
        (status = 400, description = "Invalid notebook ID", body = ErrorResponse),
        (status = 404, description = "Notebook not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notebooks"
)]
#[debug_handler]
pub async fn get_one_notebook(
    State(service): State<Arc<NotebookService>>,
    Path(id): Path<String>,
) -> Response {
    match service.get_one_notebook(&id).await {
        Ok(notebook) => (StatusCode::OK, Json(DataResponse { data: notebook })).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/notebooks/{id}",
    params(
        ("id" = String, Path, description = "Notebook ID")
    ),
    request_body = UpdateNotebookRequest,
    responses(
        (status = 200, description = "Notebook updated successfully", body = DataResponse<Notebook>),
        (status = 400, description = "Invalid ID, no fields or blank field", body = ErrorResponse),
        (status = 404, description = "Notebook not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notebooks"
)]
#[debug_handler]
pub async fn update_notebook(
    State(service): State<Arc<NotebookService>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNotebookRequest>, JsonRejection>,
) -> Response {
    let request = match read_body(payload) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };

    match service.update_notebook(&id, request).await {
        Ok(notebook) => (StatusCode::OK, Json(DataResponse { data: notebook })).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/notebooks/{id}",
    params(
        ("id" = String, Path, description = "Notebook ID")
    ),
    responses(
        (status = 200, description = "Notebook deleted; notes referencing it are kept", body = MessageResponse),
        (status = 400, description = "Invalid notebook ID", body = ErrorResponse),
        (status = 404, description = "Notebook not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notebooks"
)]
#[debug_handler]
pub async fn delete_notebook(
    State(service): State<Arc<NotebookService>>,
    Path(id): Path<String>,
) -> Response {
    match service.delete_notebook(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Notebook was deleted".to_string(),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
