use thiserror::Error;

/// Errors produced by type construction and parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid identifier {value:?}: {reason}")]
    InvalidId { value: String, reason: String },

    #[error("invalid file URL {url:?}: {reason}")]
    InvalidFileUrl { url: String, reason: String },

    #[error("post title must not be empty")]
    EmptyTitle,
}
