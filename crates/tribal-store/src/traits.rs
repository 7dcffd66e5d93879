use async_trait::async_trait;
use tribal_types::{BucketId, FileId, FileUpload};

use crate::document::{Document, DocumentList, Fields, Query};
use crate::error::StoreResult;
use crate::file::StoredFile;

/// Document database holding one JSON document per catalog entry.
///
/// Documents live in a `(database_id, collection_id)` namespace and are
/// addressed by a caller-chosen id. Implementations must be `Send + Sync`
/// so a single store can be shared behind an `Arc`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document. Fails with `AlreadyExists` if the id is taken.
    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Fields,
    ) -> StoreResult<Document>;

    /// Read a document. Returns `Ok(None)` if it does not exist.
    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<Option<Document>>;

    /// Merge `data` into an existing document and return the result.
    ///
    /// Fields absent from `data` keep their stored value. Fails with
    /// `DocumentNotFound` if the document does not exist.
    async fn update_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Fields,
    ) -> StoreResult<Document>;

    /// Delete a document. Returns `true` if it existed.
    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<bool>;

    /// List documents in creation order, filtered and windowed by `queries`.
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> StoreResult<DocumentList>;
}

/// Binary file storage organised into buckets.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store `upload` under `file_id`. Fails with `AlreadyExists` if taken.
    async fn create_file(
        &self,
        bucket: &BucketId,
        file_id: &FileId,
        upload: FileUpload,
    ) -> StoreResult<StoredFile>;

    /// Read a file. Returns `Ok(None)` if it does not exist.
    async fn get_file(&self, bucket: &BucketId, file_id: &FileId)
        -> StoreResult<Option<StoredFile>>;

    /// Delete a file. Returns `true` if it existed.
    async fn delete_file(&self, bucket: &BucketId, file_id: &FileId) -> StoreResult<bool>;
}
