mod note;
mod notebook;

pub use note::NoteService;
pub use notebook::NotebookService;

use crate::{lookup::LookupError, repository::StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Malformed identifier or missing/blank field. The message goes to the caller.
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// A notebook reference that the notebook service says does not resolve.
    #[error("Notebook with the given ID does not exist")]
    UnknownNotebook,

    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("notebook lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

/// Trims a supplied value, rejecting it with `message` if nothing is left.
fn require_text(value: Option<String>, message: &'static str) -> Result<String, ServiceError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ServiceError::InvalidInput(message)),
    }
}

/// Like [`require_text`] but an absent value stays absent.
fn optional_text(
    value: Option<String>,
    message: &'static str,
) -> Result<Option<String>, ServiceError> {
    value.map(|v| require_text(Some(v), message)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_trims() {
        assert_eq!(
            require_text(Some("  Work \n".to_string()), "x").unwrap(),
            "Work"
        );
    }

    #[test]
    fn require_text_rejects_missing_and_blank() {
        assert!(matches!(
            require_text(None, "Title is required"),
            Err(ServiceError::InvalidInput("Title is required"))
        ));
        assert!(require_text(Some("   ".to_string()), "x").is_err());
    }

    #[test]
    fn optional_text_passes_absence_through() {
        assert_eq!(optional_text(None, "x").unwrap(), None);
        assert!(optional_text(Some(String::new()), "x").is_err());
    }
}
