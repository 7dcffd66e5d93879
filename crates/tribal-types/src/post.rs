use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::file_ref::FileRef;
use crate::ids::PostId;
use crate::media::MediaKind;
use crate::upload::FileUpload;

/// A persisted instrument listing.
///
/// Every post owns exactly one image file and one audio file. Neither file
/// is shared with any other post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentPost {
    pub id: PostId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: FileRef,
    pub audio: FileRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InstrumentPost {
    /// The file of the given kind.
    pub fn file(&self, kind: MediaKind) -> &FileRef {
        match kind {
            MediaKind::Image => &self.image,
            MediaKind::Audio => &self.audio,
        }
    }
}

/// Request to create a post. Both files are mandatory.
#[derive(Clone, Debug)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: FileUpload,
    pub audio: FileUpload,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        image: FileUpload,
        audio: FileUpload,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            image,
            audio,
        }
    }

    pub fn upload(&self, kind: MediaKind) -> &FileUpload {
        match kind {
            MediaKind::Image => &self.image,
            MediaKind::Audio => &self.audio,
        }
    }

    /// Reject requests the catalog must never persist.
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.title.trim().is_empty() {
            return Err(TypeError::EmptyTitle);
        }
        Ok(())
    }
}

/// Partial update of a post.
///
/// `None` means "keep the current value", never "clear it". A supplied file
/// replaces the post's current file of that kind.
#[derive(Clone, Debug, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<FileUpload>,
    pub audio: Option<FileUpload>,
}

impl PostUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_image(mut self, image: FileUpload) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_audio(mut self, audio: FileUpload) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn upload(&self, kind: MediaKind) -> Option<&FileUpload> {
        match kind {
            MediaKind::Image => self.image.as_ref(),
            MediaKind::Audio => self.audio.as_ref(),
        }
    }

    /// `true` if applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.image.is_none()
            && self.audio.is_none()
    }

    pub fn validate(&self) -> Result<(), TypeError> {
        match &self.title {
            Some(title) if title.trim().is_empty() => Err(TypeError::EmptyTitle),
            _ => Ok(()),
        }
    }
}
