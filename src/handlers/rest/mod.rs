pub mod notebooks;
pub mod notes;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::ErrorResponse,
    service::{NoteService, NotebookService, ServiceError},
};

pub const INTERNAL_ERROR_MESSAGE: &str = "Error occurred at the server. Please retry later";

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput(_) | Self::UnknownNotebook => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Lookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Dependency failures are for operators only
        let error = if status.is_server_error() {
            tracing::error!("request failed: {}", self);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

fn read_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServiceError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!("rejected request body: {}", rejection.body_text());
        ServiceError::InvalidInput("Invalid request body")
    })
}

pub fn notebook_router(service: Arc<NotebookService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api-doc/openapi.json",
            get(|| async { Json(notebooks::ApiDoc::openapi()) }),
        )
        .route(
            "/notebooks",
            get(notebooks::get_all_notebooks).post(notebooks::create_notebook),
        )
        .route(
            "/notebooks/{id}",
            get(notebooks::get_one_notebook)
                .put(notebooks::update_notebook)
                .delete(notebooks::delete_notebook),
        )
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

pub fn note_router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api-doc/openapi.json",
            get(|| async { Json(notes::ApiDoc::openapi()) }),
        )
        .route("/notes", get(notes::get_all_notes).post(notes::create_note))
        .route(
            "/notes/{id}",
            get(notes::get_one_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Response {
    (StatusCode::OK, "OK").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{
        lookup::LookupError,
        repository::{StoreError, memory::MemoryNotebookRepository},
    };

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn client_errors_carry_their_message() {
        let response = ServiceError::UnknownNotebook.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "Notebook with the given ID does not exist"
        );

        let response = ServiceError::NotFound("Note").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "Note not found");
    }

    #[tokio::test]
    async fn dependency_failures_hide_their_cause() {
        let errors = [
            ServiceError::Store(StoreError::Unavailable("db host 10.0.0.7 down".to_string())),
            ServiceError::Lookup(LookupError::UnexpectedStatus(StatusCode::BAD_GATEWAY)),
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(json_body(response).await["error"], INTERNAL_ERROR_MESSAGE);
        }
    }

    #[tokio::test]
    async fn health_and_openapi_are_served() {
        let service = Arc::new(NotebookService::new(Arc::new(
            MemoryNotebookRepository::new(),
        )));
        let router = notebook_router(service);

        let response = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::get("/api-doc/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let doc = json_body(response).await;
        assert!(doc["paths"].get("/notebooks/{id}").is_some());
    }
}
