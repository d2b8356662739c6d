use crate::editor::EditorError;
use crate::metadata::MetadataError;
use crate::notes::StoreError;
use crossref_client::CrossrefError;
use thiserror::Error;

/// Why an import did not complete
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("metadata request failed: {0}")]
    Fetch(#[from] CrossrefError),

    #[error("invalid metadata: {0}")]
    Metadata(#[from] MetadataError),

    #[error("document store: {0}")]
    Store(#[from] StoreError),

    #[error("editor: {0}")]
    Editor(#[from] EditorError),
}

impl ImportError {
    /// Network, HTTP status and response-shape problems look the same to the user
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, ImportError::Fetch(_) | ImportError::Metadata(_))
    }
}
