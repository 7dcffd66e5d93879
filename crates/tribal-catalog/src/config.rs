use std::path::Path;

use serde::{Deserialize, Serialize};
use tribal_types::{BucketId, MediaKind, StorageEndpoint};

use crate::error::{CatalogError, CatalogResult};

/// Where the catalog lives in the backing store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the store API, used when building file URLs.
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    pub image_bucket_id: String,
    pub audio_bucket_id: String,
    /// Documents requested per listing page.
    pub page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".into(),
            project_id: "tribal-tune".into(),
            database_id: "catalog".into(),
            collection_id: "instruments".into(),
            image_bucket_id: "instrument-images".into(),
            audio_bucket_id: "instrument-audio".into(),
            page_size: 25,
        }
    }
}

impl CatalogConfig {
    pub const ENV_ENDPOINT: &'static str = "TRIBAL_ENDPOINT";
    pub const ENV_PROJECT_ID: &'static str = "TRIBAL_PROJECT_ID";
    pub const ENV_DATABASE_ID: &'static str = "TRIBAL_DATABASE_ID";
    pub const ENV_COLLECTION_ID: &'static str = "TRIBAL_COLLECTION_ID";
    pub const ENV_IMAGE_BUCKET_ID: &'static str = "TRIBAL_IMAGE_BUCKET_ID";
    pub const ENV_AUDIO_BUCKET_ID: &'static str = "TRIBAL_AUDIO_BUCKET_ID";
    pub const ENV_PAGE_SIZE: &'static str = "TRIBAL_PAGE_SIZE";

    /// Parse a TOML document. Missing keys take their default value.
    pub fn from_toml_str(input: &str) -> CatalogResult<Self> {
        toml::from_str(input).map_err(|e| CatalogError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Override fields from environment-style variables.
    ///
    /// `lookup` maps a variable name to its value; pass
    /// `|k| std::env::var(k).ok()` for the process environment.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> CatalogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text_fields = [
            (Self::ENV_ENDPOINT, &mut self.endpoint),
            (Self::ENV_PROJECT_ID, &mut self.project_id),
            (Self::ENV_DATABASE_ID, &mut self.database_id),
            (Self::ENV_COLLECTION_ID, &mut self.collection_id),
            (Self::ENV_IMAGE_BUCKET_ID, &mut self.image_bucket_id),
            (Self::ENV_AUDIO_BUCKET_ID, &mut self.audio_bucket_id),
        ];
        for (var, field) in text_fields {
            if let Some(value) = lookup(var) {
                *field = value;
            }
        }
        if let Some(value) = lookup(Self::ENV_PAGE_SIZE) {
            self.page_size = value.parse().map_err(|e| {
                CatalogError::Config(format!("{}={value:?}: {e}", Self::ENV_PAGE_SIZE))
            })?;
        }
        Ok(self)
    }

    /// Check the values a service cannot run without.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.page_size == 0 {
            return Err(CatalogError::Config("page_size must be at least 1".into()));
        }
        for (name, value) in [
            ("endpoint", &self.endpoint),
            ("project_id", &self.project_id),
            ("database_id", &self.database_id),
            ("collection_id", &self.collection_id),
        ] {
            if value.trim().is_empty() {
                return Err(CatalogError::Config(format!("{name} must not be empty")));
            }
        }
        let buckets = self.media_buckets()?;
        if buckets.image == buckets.audio {
            return Err(CatalogError::Config(
                "image and audio buckets must be distinct".into(),
            ));
        }
        Ok(())
    }

    pub fn storage_endpoint(&self) -> StorageEndpoint {
        StorageEndpoint::new(&self.endpoint, &self.project_id)
    }

    pub fn media_buckets(&self) -> CatalogResult<MediaBuckets> {
        let parse = |name: &str, value: &str| {
            BucketId::parse(value).map_err(|e| CatalogError::Config(format!("{name}: {e}")))
        };
        Ok(MediaBuckets {
            image: parse("image_bucket_id", &self.image_bucket_id)?,
            audio: parse("audio_bucket_id", &self.audio_bucket_id)?,
        })
    }
}

/// The bucket each media kind is stored in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaBuckets {
    pub image: BucketId,
    pub audio: BucketId,
}

impl MediaBuckets {
    pub fn get(&self, kind: MediaKind) -> &BucketId {
        match kind {
            MediaKind::Image => &self.image,
            MediaKind::Audio => &self.audio,
        }
    }
}
