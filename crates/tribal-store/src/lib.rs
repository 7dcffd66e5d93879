//! Remote catalog store interface for Tribal Tune.
//!
//! The catalog is backed by a hosted document database plus file buckets.
//! This crate describes that collaborator as two async traits so the
//! catalog service never depends on a concrete backend.
//!
//! # Storage Interfaces
//!
//! - [`DocumentStore`] -- create/get/update/delete/list JSON documents in a
//!   `(database, collection)` namespace, filtered by [`Query`] predicates
//! - [`FileStore`] -- create/get/delete binary files inside a bucket
//!
//! # Backends
//!
//! - [`InMemoryDocumentStore`] / [`InMemoryFileStore`] -- `HashMap`-based
//!   stores for tests and local demos, with a [`FaultPlan`] for injecting
//!   failures into individual operations
//!
//! # Design Rules
//!
//! 1. A missing document or file is `Ok(None)` / `Ok(false)`, never an error.
//! 2. Updates merge the supplied fields; fields not supplied keep their value.
//! 3. Listing order is creation order.
//! 4. Every call is attempted exactly once. No retries inside the store.

pub mod document;
pub mod error;
pub mod fault;
pub mod file;
pub mod memory;
pub mod traits;

pub use document::{Document, DocumentList, Fields, Query};
pub use error::{StoreError, StoreResult};
pub use fault::{FaultKind, FaultPlan, StoreOp};
pub use file::StoredFile;
pub use memory::{InMemoryDocumentStore, InMemoryFileStore};
pub use traits::{DocumentStore, FileStore};
