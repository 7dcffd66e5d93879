use bytes::Bytes;
use chrono::{DateTime, Utc};
use tribal_types::{BucketId, FileId, FileUpload};

/// A file held in a bucket, with the metadata the store keeps for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredFile {
    pub id: FileId,
    pub bucket: BucketId,
    pub name: String,
    pub content_type: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub data: Bytes,
}

impl StoredFile {
    pub fn from_upload(bucket: BucketId, id: FileId, upload: FileUpload) -> Self {
        Self {
            id,
            bucket,
            size: upload.data.len() as u64,
            name: upload.name,
            content_type: upload.content_type,
            created_at: Utc::now(),
            data: upload.data,
        }
    }
}
