use std::sync::Arc;

use uuid::Uuid;

use super::{ServiceError, optional_text, require_text};
use crate::{
    dto::{CreateNotebookRequest, UpdateNotebookRequest},
    models::{NewNotebook, Notebook, NotebookPatch, parse_id},
    repository::NotebookRepository,
};

const INVALID_ID: &str = "Invalid notebook ID";
const RESOURCE: &str = "Notebook";

#[derive(Clone)]
pub struct NotebookService {
    repo: Arc<dyn NotebookRepository>,
}

impl NotebookService {
    pub fn new(repo: Arc<dyn NotebookRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all_notebooks(&self) -> Result<Vec<Notebook>, ServiceError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn create_notebook(
        &self,
        request: CreateNotebookRequest,
    ) -> Result<Notebook, ServiceError> {
        let notebook = NewNotebook {
            title: require_text(request.title, "Title is required")?,
            description: optional_text(request.description, "Description cannot be empty string")?,
        };

        let notebook = self.repo.insert(notebook).await?;
        tracing::info!("Created notebook {}", notebook.id);
        Ok(notebook)
    }

    pub async fn get_one_notebook(&self, id: &str) -> Result<Notebook, ServiceError> {
        let id = Self::parse(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(RESOURCE))
    }

    pub async fn update_notebook(
        &self,
        id: &str,
        request: UpdateNotebookRequest,
    ) -> Result<Notebook, ServiceError> {
        let id = Self::parse(id)?;

        if request.title.is_none() && request.description.is_none() {
            return Err(ServiceError::InvalidInput(
                "Title or Description is required to update",
            ));
        }

        let patch = NotebookPatch {
            title: optional_text(request.title, "Title cannot be empty string")?,
            description: optional_text(request.description, "Description cannot be empty string")?,
        };

        self.repo
            .update_by_id(id, patch)
            .await?
            .ok_or(ServiceError::NotFound(RESOURCE))
    }

    /// Removes the notebook only. Notes that reference it are left untouched.
    pub async fn delete_notebook(&self, id: &str) -> Result<(), ServiceError> {
        let id = Self::parse(id)?;

        if self.repo.delete_by_id(id).await? {
            tracing::info!("Deleted notebook {}", id);
            Ok(())
        } else {
            Err(ServiceError::NotFound(RESOURCE))
        }
    }

    fn parse(id: &str) -> Result<Uuid, ServiceError> {
        parse_id(id).ok_or(ServiceError::InvalidInput(INVALID_ID))
    }
}
