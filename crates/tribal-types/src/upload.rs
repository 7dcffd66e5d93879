use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Binary payload destined for a file bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    /// Original file name, kept as file metadata by the store.
    pub name: String,
    /// MIME type, e.g. `image/png` or `audio/mpeg`.
    pub content_type: String,
    pub data: Bytes,
}

impl FileUpload {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
