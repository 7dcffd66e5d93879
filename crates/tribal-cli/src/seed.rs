//! Seed manifests: a JSON list of instruments whose image and audio files
//! live next to the manifest on disk.
//!
//! ```json
//! [
//!   { "title": "Dholak", "description": "Two-headed hand drum",
//!     "category": "percussion", "image": "img/dholak.png", "audio": "audio/dholak.mp3" }
//! ]
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info};
use tribal_catalog::CatalogService;
use tribal_types::{FileUpload, NewPost};

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SeedEntry {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// Image path, relative to the manifest.
    pub image: PathBuf,
    /// Audio path, relative to the manifest.
    pub audio: PathBuf,
}

/// Parse a manifest and read every file it references.
pub async fn load_manifest(path: &Path) -> anyhow::Result<Vec<NewPost>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading seed manifest {}", path.display()))?;
    let entries: Vec<SeedEntry> = serde_json::from_str(&text)
        .with_context(|| format!("parsing seed manifest {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let mut posts = Vec::with_capacity(entries.len());
    for entry in entries {
        let image = read_upload(&base.join(&entry.image)).await?;
        let audio = read_upload(&base.join(&entry.audio)).await?;
        posts.push(NewPost::new(entry.title, entry.description, entry.category, image, audio));
    }
    debug!(manifest = %path.display(), posts = posts.len(), "seed manifest loaded");
    Ok(posts)
}

async fn read_upload(path: &Path) -> anyhow::Result<FileUpload> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading seed file {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(FileUpload::new(name, content_type_for(path), data))
}

/// MIME type from the file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

/// Create every post through the catalog service, stopping at the first
/// failure.
pub async fn seed_catalog(service: &CatalogService, posts: Vec<NewPost>) -> anyhow::Result<usize> {
    let count = posts.len();
    for post in posts {
        let title = post.title.clone();
        service
            .create_post(post)
            .await
            .with_context(|| format!("seeding {title:?}"))?;
    }
    info!(count, "catalog seeded");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tribal_catalog::CatalogConfig;
    use tribal_store::{InMemoryDocumentStore, InMemoryFileStore};

    fn write_fixture(dir: &Path, manifest: &str) -> PathBuf {
        std::fs::create_dir_all(dir.join("media")).unwrap();
        std::fs::write(dir.join("media/dholak.png"), b"png-bytes").unwrap();
        std::fs::write(dir.join("media/dholak.mp3"), b"mp3-bytes").unwrap();
        let path = dir.join("seed.json");
        std::fs::write(&path, manifest).unwrap();
        path
    }

    const MANIFEST: &str = r#"[
        {"title": "Dholak", "category": "percussion",
         "image": "media/dholak.png", "audio": "media/dholak.mp3"}
    ]"#;

    #[tokio::test]
    async fn load_reads_relative_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), MANIFEST);

        let posts = load_manifest(&path).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Dholak");
        assert_eq!(posts[0].description, "");
        assert_eq!(posts[0].image.content_type, "image/png");
        assert_eq!(posts[0].image.name, "dholak.png");
        assert_eq!(&posts[0].audio.data[..], b"mp3-bytes");
        assert_eq!(posts[0].audio.content_type, "audio/mpeg");
    }

    #[tokio::test]
    async fn missing_media_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, MANIFEST).unwrap();

        let err = load_manifest(&path).await.unwrap_err();
        assert!(err.to_string().contains("dholak.png"));
    }

    #[tokio::test]
    async fn malformed_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), r#"{"title": "not a list"}"#);
        assert!(load_manifest(&path).await.is_err());
    }

    #[tokio::test]
    async fn seeded_posts_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), MANIFEST);
        let service = CatalogService::new(
            CatalogConfig::default(),
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(InMemoryFileStore::new()),
        )
        .unwrap();

        let posts = load_manifest(&path).await.unwrap();
        assert_eq!(seed_catalog(&service, posts).await.unwrap(), 1);
        let listed = service.list_posts(None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].category, "percussion");
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for(Path::new("a/b.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("song.wav")), "audio/wav");
        assert_eq!(content_type_for(Path::new("noext")), "application/octet-stream");
    }
}
