use std::fmt;

use serde::{Deserialize, Serialize};

/// The two kinds of binary media attached to every post.
///
/// Each kind lives in its own bucket and is stored in the post document under
/// a URL field and an explicit file-id field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
}

impl MediaKind {
    /// Both kinds, in the order files are uploaded on create.
    pub const ALL: [MediaKind; 2] = [MediaKind::Image, MediaKind::Audio];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
        }
    }

    /// Document field holding the view URL.
    pub fn url_field(&self) -> &'static str {
        self.as_str()
    }

    /// Document field holding the explicit file identifier.
    pub fn file_id_field(&self) -> &'static str {
        match self {
            Self::Image => "image_file_id",
            Self::Audio => "audio_file_id",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names() {
        assert_eq!(MediaKind::Image.url_field(), "image");
        assert_eq!(MediaKind::Audio.url_field(), "audio");
        assert_eq!(MediaKind::Image.file_id_field(), "image_file_id");
        assert_eq!(MediaKind::Audio.file_id_field(), "audio_file_id");
    }

    #[test]
    fn upload_order_is_image_then_audio() {
        assert_eq!(MediaKind::ALL, [MediaKind::Image, MediaKind::Audio]);
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&MediaKind::Audio).unwrap(), "\"audio\"");
    }
}
