//! Dictionary Context - Errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictionaryError {
    #[error("Verb not found: {0}")]
    VerbNotFound(Uuid),

    #[error("Verb is not editable: {0}")]
    NotEditable(Uuid),

    #[error("Dictionary is busy submitting changes")]
    Busy,

    #[error("Refresh not possible while there are unsaved changes")]
    PendingChanges,
}
