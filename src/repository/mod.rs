pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewNote, NewNotebook, Note, NotePatch, Notebook, NotebookPatch};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] refinery::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for notebook records. Owned by the notebook service only.
#[async_trait]
pub trait NotebookRepository: Send + Sync {
    async fn insert(&self, notebook: NewNotebook) -> Result<Notebook, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notebook>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Notebook>, StoreError>;

    /// Applies `patch` and returns the updated record, or `None` if no record has `id`.
    async fn update_by_id(
        &self,
        id: Uuid,
        patch: NotebookPatch,
    ) -> Result<Option<Notebook>, StoreError>;

    /// Returns `true` if a record was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Storage for note records. Owned by the note service only.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn insert(&self, note: NewNote) -> Result<Note, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Note>, StoreError>;

    async fn update_by_id(&self, id: Uuid, patch: NotePatch) -> Result<Option<Note>, StoreError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}
