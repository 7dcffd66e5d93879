use std::sync::Arc;

use tracing::{debug, error, info, warn};
use tribal_store::{DocumentStore, FileStore, Query, StoreError};
use tribal_types::{
    FileId, FileRef, FileUpload, InstrumentPost, MediaKind, NewPost, PostId, PostUpdate,
    StorageEndpoint,
};

use crate::cleanup::{CleanupQueue, CleanupReport};
use crate::codec;
use crate::config::{CatalogConfig, MediaBuckets};
use crate::error::{CatalogError, CatalogResult};

/// Equality predicate applied when listing posts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostFilter {
    Category(String),
}

impl PostFilter {
    fn to_query(&self) -> Query {
        match self {
            Self::Category(category) => Query::equal(codec::CATEGORY, category.as_str()),
        }
    }
}

/// Instrument catalog backed by a document store and two media buckets.
pub struct CatalogService {
    documents: Arc<dyn DocumentStore>,
    files: Arc<dyn FileStore>,
    config: CatalogConfig,
    storage: StorageEndpoint,
    buckets: MediaBuckets,
    cleanup: CleanupQueue,
}

impl CatalogService {
    /// Build a service over the given stores. Fails if `config` is invalid.
    pub fn new(
        config: CatalogConfig,
        documents: Arc<dyn DocumentStore>,
        files: Arc<dyn FileStore>,
    ) -> CatalogResult<Self> {
        config.validate()?;
        Ok(Self {
            storage: config.storage_endpoint(),
            buckets: config.media_buckets()?,
            documents,
            files,
            config,
            cleanup: CleanupQueue::new(),
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // ---- Posts ----

    /// Upload both files, then create the post document.
    ///
    /// Files uploaded before a failure are deleted again; any that cannot be
    /// deleted are parked for [`retry_cleanup`](Self::retry_cleanup).
    pub async fn create_post(&self, new: NewPost) -> CatalogResult<InstrumentPost> {
        if let Err(err) = new.validate() {
            warn!(title = %new.title, error = %err, "rejected new post");
            return Err(err.into());
        }
        let uploads = MediaKind::ALL.map(|kind| (kind, new.upload(kind)));
        let files = self.upload_all(&uploads).await?;
        let uploaded: Vec<FileRef> = files.into_iter().map(|(_, file)| file).collect();
        // ALL lists the image first
        let (image, audio) = (&uploaded[0], &uploaded[1]);
        let NewPost {
            title,
            description,
            category,
            ..
        } = new;

        let id = PostId::unique();
        let fields = codec::new_post_fields(title, description, category, image, audio);
        let doc = match self
            .documents
            .create_document(
                &self.config.database_id,
                &self.config.collection_id,
                id.as_str(),
                fields,
            )
            .await
        {
            Ok(doc) => doc,
            Err(err) => {
                error!(post = %id, error = %err, "create_post: document creation failed");
                self.release_files(&uploaded).await;
                return Err(CatalogError::document_write(err));
            }
        };

        info!(post = %id, category = ?doc.str_field(codec::CATEGORY), "post created");
        codec::decode_post(&doc, &self.buckets)
    }

    /// Apply a partial update.
    ///
    /// Replacement files are uploaded first and the document is relinked to
    /// them; only then are the replaced files deleted. If the document update
    /// fails, the new uploads are discarded and the post is left unchanged.
    pub async fn update_post(
        &self,
        id: &PostId,
        update: PostUpdate,
    ) -> CatalogResult<InstrumentPost> {
        if let Err(err) = update.validate() {
            warn!(post = %id, error = %err, "rejected post update");
            return Err(err.into());
        }
        let current = self.get_post(id).await?;
        if update.is_empty() {
            debug!(post = %id, "empty update, nothing to do");
            return Ok(current);
        }
        let uploads: Vec<(MediaKind, &FileUpload)> = MediaKind::ALL
            .into_iter()
            .filter_map(|kind| update.upload(kind).map(|upload| (kind, upload)))
            .collect();
        let files = self.upload_all(&uploads).await?;
        let uploaded: Vec<FileRef> = files.iter().map(|(_, file)| file.clone()).collect();
        let replacement = |kind: MediaKind| {
            files
                .iter()
                .find(|(k, _)| *k == kind)
                .map(|(_, file)| file)
        };

        let PostUpdate {
            title,
            description,
            category,
            ..
        } = update;
        let fields = codec::update_fields(
            title,
            description,
            category,
            replacement(MediaKind::Image),
            replacement(MediaKind::Audio),
        );
        let doc = match self
            .documents
            .update_document(
                &self.config.database_id,
                &self.config.collection_id,
                id.as_str(),
                fields,
            )
            .await
        {
            Ok(doc) => doc,
            Err(err) => {
                self.release_files(&uploaded).await;
                if let StoreError::DocumentNotFound { .. } = err {
                    warn!(post = %id, "update_post: post vanished during update");
                    return Err(CatalogError::NotFound(id.clone()));
                }
                error!(post = %id, error = %err, "update_post: document update failed");
                return Err(CatalogError::document_write(err));
            }
        };

        let replaced: Vec<FileRef> = files
            .iter()
            .map(|(kind, _)| current.file(*kind).clone())
            .collect();
        self.release_files(&replaced).await;

        info!(post = %id, replaced_files = replaced.len(), "post updated");
        codec::decode_post(&doc, &self.buckets)
    }

    /// Delete the post document, then both of its files.
    ///
    /// Returns `Ok(true)` when everything was removed and `Ok(false)` when
    /// the document is gone but a file could not be deleted (the file is
    /// parked for cleanup; nothing is rolled back).
    pub async fn delete_post(&self, id: &PostId) -> CatalogResult<bool> {
        let post = self.get_post(id).await?;

        match self
            .documents
            .delete_document(
                &self.config.database_id,
                &self.config.collection_id,
                id.as_str(),
            )
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                warn!(post = %id, "delete_post: post vanished before deletion");
                return Err(CatalogError::NotFound(id.clone()));
            }
            Err(err) => {
                error!(post = %id, error = %err, "delete_post: document deletion failed");
                return Err(CatalogError::document_write(err));
            }
        }

        let complete = self
            .release_files(&[
                post.file(MediaKind::Audio).clone(),
                post.file(MediaKind::Image).clone(),
            ])
            .await;
        if complete {
            info!(post = %id, "post deleted");
        } else {
            warn!(post = %id, pending = self.cleanup.len(), "post deleted, files left for cleanup");
        }
        Ok(complete)
    }

    pub async fn get_post(&self, id: &PostId) -> CatalogResult<InstrumentPost> {
        let doc = self
            .documents
            .get_document(
                &self.config.database_id,
                &self.config.collection_id,
                id.as_str(),
            )
            .await
            .map_err(|err| {
                error!(post = %id, error = %err, "get_post failed");
                CatalogError::document_read(err)
            })?;

        match doc {
            Some(doc) => codec::decode_post(&doc, &self.buckets),
            None => {
                debug!(post = %id, "post not found");
                Err(CatalogError::NotFound(id.clone()))
            }
        }
    }

    /// Every post matching `filter`, in store order.
    ///
    /// Pages through the store `page_size` documents at a time. Documents
    /// that do not decode as posts are logged and skipped.
    pub async fn list_posts(
        &self,
        filter: Option<&PostFilter>,
    ) -> CatalogResult<Vec<InstrumentPost>> {
        let mut posts = Vec::new();
        let mut offset = 0;
        loop {
            let mut queries: Vec<Query> = filter.map(PostFilter::to_query).into_iter().collect();
            queries.push(Query::Limit(self.config.page_size));
            queries.push(Query::Offset(offset));

            let page = self
                .documents
                .list_documents(&self.config.database_id, &self.config.collection_id, &queries)
                .await
                .map_err(|err| {
                    error!(?filter, offset, error = %err, "list_posts failed");
                    CatalogError::document_read(err)
                })?;

            offset += page.documents.len();
            for doc in &page.documents {
                match codec::decode_post(doc, &self.buckets) {
                    Ok(post) => posts.push(post),
                    Err(err) => warn!(document = %doc.id, error = %err, "skipping malformed post"),
                }
            }
            if page.documents.is_empty() || offset >= page.total {
                break;
            }
        }
        debug!(?filter, count = posts.len(), "posts listed");
        Ok(posts)
    }

    pub async fn posts_by_category(&self, category: &str) -> CatalogResult<Vec<InstrumentPost>> {
        self.list_posts(Some(&PostFilter::Category(category.to_string())))
            .await
    }

    // ---- Files ----

    /// Upload a file under a fresh identifier into the bucket for `kind`.
    pub async fn upload_file(
        &self,
        kind: MediaKind,
        upload: FileUpload,
    ) -> CatalogResult<FileRef> {
        let bucket = self.buckets.get(kind);
        let file_id = FileId::unique();
        let size = upload.len();
        self.files
            .create_file(bucket, &file_id, upload)
            .await
            .map_err(|err| {
                error!(%bucket, file = %file_id, error = %err, "upload_file failed");
                CatalogError::file(err)
            })?;
        debug!(%bucket, file = %file_id, size, "file uploaded");
        Ok(self.storage.file_ref(bucket, &file_id))
    }

    /// Delete a file from the bucket for `kind`. Returns `true` if it existed.
    pub async fn delete_file(&self, kind: MediaKind, file_id: &FileId) -> CatalogResult<bool> {
        let bucket = self.buckets.get(kind);
        self.files.delete_file(bucket, file_id).await.map_err(|err| {
            error!(%bucket, file = %file_id, error = %err, "delete_file failed");
            CatalogError::file(err)
        })
    }

    /// Store-rendered preview URL of a file.
    pub fn file_preview_url(&self, kind: MediaKind, file_id: &FileId) -> String {
        self.storage.preview_url(self.buckets.get(kind), file_id)
    }

    // ---- Cleanup ----

    /// Files whose deletion failed and is still outstanding.
    pub fn pending_cleanup(&self) -> Vec<FileRef> {
        self.cleanup.snapshot()
    }

    /// Re-attempt every parked deletion once.
    pub async fn retry_cleanup(&self) -> CleanupReport {
        let mut report = CleanupReport::default();
        for file in self.cleanup.drain() {
            match self.files.delete_file(&file.bucket, &file.file_id).await {
                Ok(_) => report.removed.push(file),
                Err(err) => {
                    warn!(
                        bucket = %file.bucket,
                        file = %file.file_id,
                        error = %err,
                        "cleanup retry failed"
                    );
                    self.cleanup.push(file.clone());
                    report.still_pending.push(file);
                }
            }
        }
        info!(
            removed = report.removed.len(),
            pending = report.still_pending.len(),
            "cleanup pass finished"
        );
        report
    }

    /// Upload each file in turn. A failure deletes the files uploaded so far
    /// before the error is returned.
    async fn upload_all(
        &self,
        uploads: &[(MediaKind, &FileUpload)],
    ) -> CatalogResult<Vec<(MediaKind, FileRef)>> {
        let mut done: Vec<(MediaKind, FileRef)> = Vec::with_capacity(uploads.len());
        for &(kind, upload) in uploads {
            match self.upload_file(kind, upload.clone()).await {
                Ok(file) => done.push((kind, file)),
                Err(err) => {
                    let uploaded: Vec<FileRef> = done.into_iter().map(|(_, file)| file).collect();
                    self.release_files(&uploaded).await;
                    return Err(err);
                }
            }
        }
        Ok(done)
    }

    /// Delete files no post references any more. Returns `true` if every
    /// deletion succeeded; failures are parked in the cleanup queue.
    async fn release_files(&self, files: &[FileRef]) -> bool {
        let mut complete = true;
        for file in files {
            if let Err(err) = self.files.delete_file(&file.bucket, &file.file_id).await {
                warn!(
                    bucket = %file.bucket,
                    file = %file.file_id,
                    error = %err,
                    "file deletion failed, parked for cleanup"
                );
                self.cleanup.push(file.clone());
                complete = false;
            }
        }
        complete
    }
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("database_id", &self.config.database_id)
            .field("collection_id", &self.config.collection_id)
            .field("pending_cleanup", &self.cleanup.len())
            .finish()
    }
}
