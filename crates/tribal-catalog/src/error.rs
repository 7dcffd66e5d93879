use thiserror::Error;
use tribal_store::StoreError;
use tribal_types::{PostId, TypeError};

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The referenced post does not exist.
    #[error("post not found: {0}")]
    NotFound(PostId),

    #[error("invalid post: {0}")]
    InvalidPost(#[from] TypeError),

    /// A document read was refused by the store.
    #[error("document read failed: {0}")]
    StoreRead(String),

    /// A document create/update/delete was refused by the store.
    #[error("document write failed: {0}")]
    StoreWrite(String),

    /// A file upload or deletion was refused by the store.
    #[error("file operation failed: {0}")]
    StoreFile(String),

    /// Transport-level failure reported by the store client.
    #[error("network error: {0}")]
    Network(String),

    /// A stored document could not be decoded into a post.
    #[error("malformed post document {id}: {reason}")]
    Codec { id: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub(crate) fn document_read(err: StoreError) -> Self {
        match err {
            StoreError::Network(msg) => Self::Network(msg),
            other => Self::StoreRead(other.to_string()),
        }
    }

    pub(crate) fn document_write(err: StoreError) -> Self {
        match err {
            StoreError::Network(msg) => Self::Network(msg),
            other => Self::StoreWrite(other.to_string()),
        }
    }

    pub(crate) fn file(err: StoreError) -> Self {
        match err {
            StoreError::Network(msg) => Self::Network(msg),
            other => Self::StoreFile(other.to_string()),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
