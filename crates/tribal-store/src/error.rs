/// Errors from catalog store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A document targeted by an update does not exist.
    #[error("document not found: {collection}/{id}")]
    DocumentNotFound { collection: String, id: String },

    /// A create used an id that is already taken.
    #[error("id already exists: {0}")]
    AlreadyExists(String),

    /// The store refused a document write.
    #[error("document write failed: {0}")]
    Write(String),

    /// The store refused a file upload or deletion.
    #[error("file operation failed: {0}")]
    File(String),

    /// Transport-level failure talking to the store.
    #[error("network error: {0}")]
    Network(String),

    /// A query list could not be applied.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
