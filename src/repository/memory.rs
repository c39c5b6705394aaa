//! Process-local stores backing tests and local experiments.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{NoteRepository, NotebookRepository, StoreError};
use crate::models::{NewNote, NewNotebook, Note, NotePatch, Notebook, NotebookPatch};

/// Records kept in insertion order.
///
/// [`MemoryRepository::set_available`] switches the store into a mode where
/// every operation fails, which is how outages are simulated.
pub struct MemoryRepository<T> {
    records: RwLock<Vec<T>>,
    available: AtomicBool,
}

pub type MemoryNotebookRepository = MemoryRepository<Notebook>;
pub type MemoryNoteRepository = MemoryRepository<Note>;

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }
}

impl<T: Clone> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store is offline".to_string()))
        }
    }
}

#[async_trait]
impl NotebookRepository for MemoryRepository<Notebook> {
    async fn insert(&self, notebook: NewNotebook) -> Result<Notebook, StoreError> {
        self.ensure_available()?;
        let now = Utc::now();
        let record = Notebook {
            id: Uuid::new_v4(),
            title: notebook.title,
            description: notebook.description,
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notebook>, StoreError> {
        self.ensure_available()?;
        Ok(self.records.read().await.iter().find(|n| n.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Notebook>, StoreError> {
        self.ensure_available()?;
        Ok(self.records.read().await.clone())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: NotebookPatch,
    ) -> Result<Option<Notebook>, StoreError> {
        self.ensure_available()?;
        let mut records = self.records.write().await;
        let Some(notebook) = records.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            notebook.title = title;
        }
        if let Some(description) = patch.description {
            notebook.description = Some(description);
        }
        notebook.updated_at = Utc::now();

        Ok(Some(notebook.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        self.ensure_available()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|n| n.id != id);
        Ok(records.len() != before)
    }
}

#[async_trait]
impl NoteRepository for MemoryRepository<Note> {
    async fn insert(&self, note: NewNote) -> Result<Note, StoreError> {
        self.ensure_available()?;
        let now = Utc::now();
        let record = Note {
            id: Uuid::new_v4(),
            title: note.title,
            content: note.content,
            notebook_id: note.notebook_id,
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, StoreError> {
        self.ensure_available()?;
        Ok(self.records.read().await.iter().find(|n| n.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        self.ensure_available()?;
        Ok(self.records.read().await.clone())
    }

    async fn update_by_id(&self, id: Uuid, patch: NotePatch) -> Result<Option<Note>, StoreError> {
        self.ensure_available()?;
        let mut records = self.records.write().await;
        let Some(note) = records.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(notebook_id) = patch.notebook_id {
            note.notebook_id = Some(notebook_id);
        }
        note.updated_at = Utc::now();

        Ok(Some(note.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        self.ensure_available()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|n| n.id != id);
        Ok(records.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_keeps_unpatched_fields() {
        let repo = MemoryNotebookRepository::new();
        let created = repo
            .insert(NewNotebook {
                title: "Work".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let updated = repo
            .update_by_id(
                created.id,
                NotebookPatch {
                    title: None,
                    description: Some("x".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Work");
        assert_eq!(updated.description.as_deref(), Some("x"));
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn offline_store_fails_every_operation() {
        let repo = MemoryNoteRepository::new();
        repo.set_available(false);

        let err = NoteRepository::find_all(&repo).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));

        repo.set_available(true);
        assert!(NoteRepository::find_all(&repo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let repo = MemoryNoteRepository::new();
        let note = repo
            .insert(NewNote {
                title: "a".to_string(),
                content: "b".to_string(),
                notebook_id: None,
            })
            .await
            .unwrap();

        assert!(repo.delete_by_id(note.id).await.unwrap());
        assert!(!repo.delete_by_id(note.id).await.unwrap());
        assert!(repo.is_empty().await);
    }
}
