use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    /// Notebook ID
    pub id: Uuid,
    /// Notebook title
    pub title: String,
    /// Optional free-form description
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Note ID
    pub id: Uuid,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// ID of the notebook this note was filed under, if any.
    ///
    /// The notebook existed when the reference was written; it may have been
    /// deleted since.
    pub notebook_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a notebook supplied on create.
#[derive(Debug, Clone)]
pub struct NewNotebook {
    pub title: String,
    pub description: Option<String>,
}

/// Sparse notebook update: only `Some` fields overwrite.
#[derive(Debug, Clone, Default)]
pub struct NotebookPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub notebook_id: Option<String>,
}

/// Sparse note update: only `Some` fields overwrite.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub notebook_id: Option<String>,
}

/// Parses a store identifier without touching the store.
///
/// `None` means the identifier is malformed and can never match a record.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_hyphenated_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()), Some(id));
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert_eq!(parse_id("does-not-exist-id"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("64b7f0c2e1a4b2d3c4e5f6a7"), None);
    }

    #[test]
    fn note_serializes_with_camel_case_keys() {
        let note = Note {
            id: Uuid::nil(),
            title: "Todo".to_string(),
            content: "buy milk".to_string(),
            notebook_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&note).unwrap();
        assert!(value.get("notebookId").is_some_and(serde_json::Value::is_null));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("notebook_id").is_none());
    }
}
