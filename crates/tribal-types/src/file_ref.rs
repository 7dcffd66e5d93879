//! File references and the storage URL convention.
//!
//! A stored file is addressed by a view URL of the form
//!
//! ```text
//! <endpoint>/storage/buckets/<bucket>/files/<file>/view?project=<project>&mode=admin
//! ```
//!
//! The file identifier is always the path segment immediately before
//! `/view`, so the encoding can be inverted with [`FileRef::from_view_url`].
//! Post documents carry the identifier explicitly as well; URL parsing is
//! only needed for records written before that field existed.

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::ids::{BucketId, FileId};

/// Base endpoint and project that every file URL is built against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEndpoint {
    endpoint: String,
    project_id: String,
}

impl StorageEndpoint {
    pub fn new(endpoint: impl Into<String>, project_id: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: project_id.into(),
        }
    }

    /// Resolvable URL that serves the raw file.
    pub fn view_url(&self, bucket: &BucketId, file_id: &FileId) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/view?project={}&mode=admin",
            self.endpoint, bucket, file_id, self.project_id
        )
    }

    /// URL of the store-rendered preview (thumbnail) of a file.
    pub fn preview_url(&self, bucket: &BucketId, file_id: &FileId) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/preview?project={}",
            self.endpoint, bucket, file_id, self.project_id
        )
    }

    /// Build a [`FileRef`] for a file that now exists in `bucket`.
    pub fn file_ref(&self, bucket: &BucketId, file_id: &FileId) -> FileRef {
        FileRef {
            bucket: bucket.clone(),
            file_id: file_id.clone(),
            url: self.view_url(bucket, file_id),
        }
    }
}

/// A file owned by a post: where it lives and how to fetch it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRef {
    pub bucket: BucketId,
    pub file_id: FileId,
    pub url: String,
}

impl FileRef {
    /// Recover bucket and file identifiers from a view URL.
    ///
    /// Requires the full `/storage/buckets/<bucket>/files/<file>/view` shape.
    pub fn from_view_url(url: &str) -> Result<Self, TypeError> {
        let segments = path_segments(url);
        let invalid = |reason: &str| TypeError::InvalidFileUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        match segments.as_slice() {
            [.., "buckets", bucket, "files", file, "view"] => Ok(Self {
                bucket: BucketId::parse(*bucket).map_err(|e| invalid(&e.to_string()))?,
                file_id: FileId::parse(*file).map_err(|e| invalid(&e.to_string()))?,
                url: url.to_string(),
            }),
            _ => Err(invalid("expected /storage/buckets/<bucket>/files/<file>/view")),
        }
    }
}

fn path_segments(url: &str) -> Vec<&str> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/').split('/').collect()
}
