use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use tribal_types::{BucketId, FileId, FileUpload};

use crate::document::{apply_queries, Document, DocumentList, Fields, Query};
use crate::error::{StoreError, StoreResult};
use crate::fault::{FaultPlan, StoreOp};
use crate::file::StoredFile;
use crate::traits::{DocumentStore, FileStore};

type CollectionKey = (String, String);

fn key(database_id: &str, collection_id: &str) -> CollectionKey {
    (database_id.to_string(), collection_id.to_string())
}

/// In-memory document store.
///
/// Intended for tests and local demos. Each collection is a `Vec` kept in
/// creation order behind a `RwLock`. Failures can be scripted through
/// [`InMemoryDocumentStore::faults`].
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<CollectionKey, Vec<Document>>>,
    faults: FaultPlan,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            faults: FaultPlan::new(),
        }
    }

    /// Failure schedule consulted before every operation.
    pub fn faults(&self) -> &FaultPlan {
        &self.faults
    }

    /// Number of documents across all collections.
    pub fn len(&self) -> usize {
        self.collections
            .read()
            .expect("lock poisoned")
            .values()
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Fields,
    ) -> StoreResult<Document> {
        self.faults.check(StoreOp::CreateDocument)?;
        let mut collections = self.collections.write().expect("lock poisoned");
        let docs = collections.entry(key(database_id, collection_id)).or_default();
        if docs.iter().any(|d| d.id == document_id) {
            return Err(StoreError::AlreadyExists(document_id.to_string()));
        }

        let now = Utc::now();
        let doc = Document {
            id: document_id.to_string(),
            database_id: database_id.to_string(),
            collection_id: collection_id.to_string(),
            created_at: now,
            updated_at: now,
            data,
        };
        docs.push(doc.clone());
        tracing::trace!(collection = collection_id, id = document_id, "document created");
        Ok(doc)
    }

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<Option<Document>> {
        self.faults.check(StoreOp::GetDocument)?;
        let collections = self.collections.read().expect("lock poisoned");
        Ok(collections
            .get(&key(database_id, collection_id))
            .and_then(|docs| docs.iter().find(|d| d.id == document_id))
            .cloned())
    }

    async fn update_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Fields,
    ) -> StoreResult<Document> {
        self.faults.check(StoreOp::UpdateDocument)?;
        let mut collections = self.collections.write().expect("lock poisoned");
        let doc = collections
            .get_mut(&key(database_id, collection_id))
            .and_then(|docs| docs.iter_mut().find(|d| d.id == document_id))
            .ok_or_else(|| StoreError::DocumentNotFound {
                collection: collection_id.to_string(),
                id: document_id.to_string(),
            })?;

        doc.data.extend(data);
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }

    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<bool> {
        self.faults.check(StoreOp::DeleteDocument)?;
        let mut collections = self.collections.write().expect("lock poisoned");
        let Some(docs) = collections.get_mut(&key(database_id, collection_id)) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != document_id);
        Ok(docs.len() != before)
    }

    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> StoreResult<DocumentList> {
        self.faults.check(StoreOp::ListDocuments)?;
        let collections = self.collections.read().expect("lock poisoned");
        let docs = collections
            .get(&key(database_id, collection_id))
            .cloned()
            .unwrap_or_default();
        apply_queries(queries, docs)
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDocumentStore")
            .field("document_count", &self.len())
            .finish()
    }
}

/// In-memory file store: one `HashMap` keyed by `(bucket, file)`.
pub struct InMemoryFileStore {
    files: RwLock<HashMap<(BucketId, FileId), StoredFile>>,
    faults: FaultPlan,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            faults: FaultPlan::new(),
        }
    }

    pub fn faults(&self) -> &FaultPlan {
        &self.faults
    }

    /// Number of files across all buckets.
    pub fn len(&self) -> usize {
        self.files.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `file_id` exists in `bucket`. Bypasses the fault plan.
    pub fn contains(&self, bucket: &BucketId, file_id: &FileId) -> bool {
        self.files
            .read()
            .expect("lock poisoned")
            .contains_key(&(bucket.clone(), file_id.clone()))
    }

    /// Sorted ids of every file in `bucket`.
    pub fn file_ids(&self, bucket: &BucketId) -> Vec<FileId> {
        let files = self.files.read().expect("lock poisoned");
        let mut ids: Vec<FileId> = files
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, id)| id.clone())
            .collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn create_file(
        &self,
        bucket: &BucketId,
        file_id: &FileId,
        upload: FileUpload,
    ) -> StoreResult<StoredFile> {
        self.faults.check(StoreOp::CreateFile)?;
        let mut files = self.files.write().expect("lock poisoned");
        let slot = (bucket.clone(), file_id.clone());
        if files.contains_key(&slot) {
            return Err(StoreError::AlreadyExists(file_id.to_string()));
        }
        let stored = StoredFile::from_upload(bucket.clone(), file_id.clone(), upload);
        files.insert(slot, stored.clone());
        tracing::trace!(%bucket, file = %file_id, size = stored.size, "file created");
        Ok(stored)
    }

    async fn get_file(
        &self,
        bucket: &BucketId,
        file_id: &FileId,
    ) -> StoreResult<Option<StoredFile>> {
        self.faults.check(StoreOp::GetFile)?;
        let files = self.files.read().expect("lock poisoned");
        Ok(files.get(&(bucket.clone(), file_id.clone())).cloned())
    }

    async fn delete_file(&self, bucket: &BucketId, file_id: &FileId) -> StoreResult<bool> {
        self.faults.check(StoreOp::DeleteFile)?;
        let mut files = self.files.write().expect("lock poisoned");
        Ok(files.remove(&(bucket.clone(), file_id.clone())).is_some())
    }
}

impl std::fmt::Debug for InMemoryFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryFileStore")
            .field("file_count", &self.len())
            .finish()
    }
}
