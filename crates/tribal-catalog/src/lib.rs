//! Catalog service for the Tribal Tune instrument catalog.
//!
//! An instrument post is one document plus two files (image, audio) living
//! in separate buckets. [`CatalogService`] owns the policy that keeps those
//! three records consistent:
//!
//! - **create**: upload image, upload audio, then create the document. Any
//!   failure rolls back the files uploaded so far.
//! - **update**: upload replacements, relink the document, then delete the
//!   replaced files. Old files are only deleted once nothing references them.
//! - **delete**: delete the document, then both files.
//!
//! No transaction spans the document store and the buckets. File deletions
//! that fail are parked in a best-effort cleanup queue
//! ([`CatalogService::pending_cleanup`], [`CatalogService::retry_cleanup`])
//! instead of being forgotten.
//!
//! Every operation returns a [`CatalogResult`]. A missing post is always
//! [`CatalogError::NotFound`] and is never conflated with a store failure.

pub mod cleanup;
pub mod codec;
pub mod config;
pub mod error;
pub mod service;

pub use cleanup::{CleanupQueue, CleanupReport};
pub use config::{CatalogConfig, MediaBuckets};
pub use error::{CatalogError, CatalogResult};
pub use service::{CatalogService, PostFilter};

pub use tribal_types::{FileRef, FileUpload, InstrumentPost, MediaKind, NewPost, PostId, PostUpdate};
