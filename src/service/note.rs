use std::sync::Arc;

use uuid::Uuid;

use super::{ServiceError, optional_text};
use crate::{
    dto::{CreateNoteRequest, UpdateNoteRequest},
    lookup::{NotebookLookup, NotebookVerdict},
    models::{NewNote, Note, NotePatch, parse_id},
    repository::NoteRepository,
};

const INVALID_ID: &str = "Invalid note ID";
const RESOURCE: &str = "Note";

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
    notebooks: Arc<dyn NotebookLookup>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>, notebooks: Arc<dyn NotebookLookup>) -> Self {
        Self { repo, notebooks }
    }

    pub async fn get_all_notes(&self) -> Result<Vec<Note>, ServiceError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn create_note(&self, request: CreateNoteRequest) -> Result<Note, ServiceError> {
        let (Some(title), Some(content)) = (
            non_blank(request.title),
            non_blank(request.content),
        ) else {
            return Err(ServiceError::InvalidInput("Title and content are required"));
        };
        let notebook_id = notebook_ref(request.notebook_id);

        if let Some(notebook_id) = &notebook_id {
            self.verify_notebook(notebook_id).await?;
        }

        let note = self
            .repo
            .insert(NewNote {
                title,
                content,
                notebook_id,
            })
            .await?;
        tracing::info!("Created note {}", note.id);
        Ok(note)
    }

    pub async fn get_one_note(&self, id: &str) -> Result<Note, ServiceError> {
        let id = Self::parse(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(RESOURCE))
    }

    pub async fn update_note(
        &self,
        id: &str,
        request: UpdateNoteRequest,
    ) -> Result<Note, ServiceError> {
        let id = Self::parse(id)?;
        let notebook_id = notebook_ref(request.notebook_id);

        if request.title.is_none() && request.content.is_none() && notebook_id.is_none() {
            return Err(ServiceError::InvalidInput(
                "At least one of title, content or notebookId is required to update",
            ));
        }

        let patch = NotePatch {
            title: optional_text(request.title, "Title cannot be empty")?,
            content: optional_text(request.content, "Content cannot be empty")?,
            notebook_id,
        };

        if let Some(notebook_id) = &patch.notebook_id {
            self.verify_notebook(notebook_id).await?;
        }

        self.repo
            .update_by_id(id, patch)
            .await?
            .ok_or(ServiceError::NotFound(RESOURCE))
    }

    pub async fn delete_note(&self, id: &str) -> Result<(), ServiceError> {
        let id = Self::parse(id)?;

        if self.repo.delete_by_id(id).await? {
            tracing::info!("Deleted note {}", id);
            Ok(())
        } else {
            Err(ServiceError::NotFound(RESOURCE))
        }
    }

    /// Fails closed: only a definitive `Exists` lets the write go ahead.
    async fn verify_notebook(&self, notebook_id: &str) -> Result<(), ServiceError> {
        match self.notebooks.check_exists(notebook_id).await {
            NotebookVerdict::Exists => Ok(()),
            NotebookVerdict::NotFound => {
                tracing::warn!("Rejected reference to unknown notebook '{}'", notebook_id);
                Err(ServiceError::UnknownNotebook)
            }
            NotebookVerdict::RemoteError(e) => Err(ServiceError::Lookup(e)),
        }
    }

    fn parse(id: &str) -> Result<Uuid, ServiceError> {
        parse_id(id).ok_or(ServiceError::InvalidInput(INVALID_ID))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Null and empty references both mean "not filed under a notebook".
fn notebook_ref(value: Option<String>) -> Option<String> {
    value.filter(|id| !id.is_empty())
}
