use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};
use uuid::Uuid;

use super::{NoteRepository, NotebookRepository, StoreError};
use crate::models::{NewNote, NewNotebook, Note, NotePatch, Notebook, NotebookPatch};

mod notebook_migrations {
    refinery::embed_migrations!("migrations/notebooks");
}

mod note_migrations {
    refinery::embed_migrations!("migrations/notes");
}

async fn connect(database_dsn: &str) -> Result<Client, tokio_postgres::Error> {
    let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

    tokio::spawn(async move {
        if let Err(e) = con.await {
            tracing::error!("connection error: {}", e);
        }
    });

    Ok(client)
}

fn log_report(report: &refinery::Report) {
    for migration in report.applied_migrations() {
        tracing::info!(
            "Migration Applied -  Name: {}, Version: {}",
            migration.name(),
            migration.version()
        );
    }

    tracing::info!("DB migrations finished!");
}

fn notebook_from_row(row: &Row) -> Result<Notebook, StoreError> {
    Ok(Notebook {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn note_from_row(row: &Row) -> Result<Note, StoreError> {
    Ok(Note {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        notebook_id: row.try_get("notebook_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub struct PgNotebookRepository {
    client: Client,
}

impl PgNotebookRepository {
    pub async fn new(database_dsn: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: connect(database_dsn).await?,
        })
    }

    pub async fn migrate(&mut self) -> Result<(), StoreError> {
        let report = notebook_migrations::migrations::runner()
            .run_async(&mut self.client)
            .await?;
        log_report(&report);
        Ok(())
    }
}

#[async_trait]
impl NotebookRepository for PgNotebookRepository {
    async fn insert(&self, notebook: NewNotebook) -> Result<Notebook, StoreError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO notebooks (title, description) VALUES ($1, $2) RETURNING id, title, description, created_at, updated_at",
                &[&notebook.title, &notebook.description],
            )
            .await?;

        notebook_from_row(&row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notebook>, StoreError> {
        let row = self
            .client
            .query_opt(
                "SELECT id, title, description, created_at, updated_at FROM notebooks WHERE id = $1",
                &[&id],
            )
            .await?;

        row.as_ref().map(notebook_from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Notebook>, StoreError> {
        let rows = self
            .client
            .query(
                "SELECT id, title, description, created_at, updated_at FROM notebooks ORDER BY created_at, id",
                &[],
            )
            .await?;

        rows.iter().map(notebook_from_row).collect()
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: NotebookPatch,
    ) -> Result<Option<Notebook>, StoreError> {
        let row = self
            .client
            .query_opt(
                "UPDATE notebooks SET title = COALESCE($2, title), description = COALESCE($3, description), updated_at = now() WHERE id = $1 RETURNING id, title, description, created_at, updated_at",
                &[&id, &patch.title, &patch.description],
            )
            .await?;

        row.as_ref().map(notebook_from_row).transpose()
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let rows = self
            .client
            .execute("DELETE FROM notebooks WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }
}

pub struct PgNoteRepository {
    client: Client,
}

impl PgNoteRepository {
    pub async fn new(database_dsn: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: connect(database_dsn).await?,
        })
    }

    pub async fn migrate(&mut self) -> Result<(), StoreError> {
        let report = note_migrations::migrations::runner()
            .run_async(&mut self.client)
            .await?;
        log_report(&report);
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, note: NewNote) -> Result<Note, StoreError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO notes (title, content, notebook_id) VALUES ($1, $2, $3) RETURNING id, title, content, notebook_id, created_at, updated_at",
                &[&note.title, &note.content, &note.notebook_id],
            )
            .await?;

        note_from_row(&row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, StoreError> {
        let row = self
            .client
            .query_opt(
                "SELECT id, title, content, notebook_id, created_at, updated_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        row.as_ref().map(note_from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        let rows = self
            .client
            .query(
                "SELECT id, title, content, notebook_id, created_at, updated_at FROM notes ORDER BY created_at, id",
                &[],
            )
            .await?;

        rows.iter().map(note_from_row).collect()
    }

    async fn update_by_id(&self, id: Uuid, patch: NotePatch) -> Result<Option<Note>, StoreError> {
        let row = self
            .client
            .query_opt(
                "UPDATE notes SET title = COALESCE($2, title), content = COALESCE($3, content), notebook_id = COALESCE($4, notebook_id), updated_at = now() WHERE id = $1 RETURNING id, title, content, notebook_id, created_at, updated_at",
                &[&id, &patch.title, &patch.content, &patch.notebook_id],
            )
            .await?;

        row.as_ref().map(note_from_row).transpose()
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }
}
