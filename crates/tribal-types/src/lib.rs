//! Foundation types for the Tribal Tune instrument catalog.
//!
//! This crate provides the identity, media, and post types shared by the
//! store, catalog, and search crates. Every other Tribal Tune crate depends
//! on `tribal-types`.
//!
//! # Key Types
//!
//! - [`PostId`] / [`FileId`] / [`BucketId`]: opaque, validated identifiers
//! - [`MediaKind`]: which of the two file buckets (image, audio) a file lives in
//! - [`FileRef`]: bucket + file identifier + resolvable view URL
//! - [`StorageEndpoint`]: builds and parses the view/preview URL convention
//! - [`InstrumentPost`]: a persisted catalog listing
//! - [`NewPost`] / [`PostUpdate`]: create and partial-update requests
//! - [`FileUpload`]: binary payload for a file bucket

pub mod error;
pub mod file_ref;
pub mod ids;
pub mod media;
pub mod post;
pub mod upload;

pub use error::TypeError;
pub use file_ref::{FileRef, StorageEndpoint};
pub use ids::{BucketId, FileId, PostId};
pub use media::MediaKind;
pub use post::{InstrumentPost, NewPost, PostUpdate};
pub use upload::FileUpload;
