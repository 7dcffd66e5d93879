//! Mapping between [`InstrumentPost`] and its stored document.
//!
//! Document layout:
//!
//! | field            | value                                  |
//! |------------------|----------------------------------------|
//! | `title`          | string                                 |
//! | `description`    | string                                 |
//! | `category`       | string                                 |
//! | `image` / `audio`| view URL of the file                   |
//! | `image_file_id` / `audio_file_id` | file identifier       |
//!
//! Records written before the explicit file-id fields existed only carry
//! the URLs; their identifiers are recovered from the URL path.

use serde_json::Value;
use tribal_store::{Document, Fields};
use tribal_types::{FileId, FileRef, InstrumentPost, MediaKind, PostId};

use crate::config::MediaBuckets;
use crate::error::{CatalogError, CatalogResult};

pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const CATEGORY: &str = "category";

/// Fields of a freshly created post document.
pub fn new_post_fields(
    title: String,
    description: String,
    category: String,
    image: &FileRef,
    audio: &FileRef,
) -> Fields {
    let mut fields = Fields::new();
    fields.insert(TITLE.into(), Value::String(title));
    fields.insert(DESCRIPTION.into(), Value::String(description));
    fields.insert(CATEGORY.into(), Value::String(category));
    insert_file(&mut fields, MediaKind::Image, image);
    insert_file(&mut fields, MediaKind::Audio, audio);
    fields
}

/// Only the fields an update actually supplies.
pub fn update_fields(
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    image: Option<&FileRef>,
    audio: Option<&FileRef>,
) -> Fields {
    let mut fields = Fields::new();
    let text = [(TITLE, title), (DESCRIPTION, description), (CATEGORY, category)];
    for (name, value) in text {
        if let Some(value) = value {
            fields.insert(name.into(), Value::String(value));
        }
    }
    if let Some(image) = image {
        insert_file(&mut fields, MediaKind::Image, image);
    }
    if let Some(audio) = audio {
        insert_file(&mut fields, MediaKind::Audio, audio);
    }
    fields
}

fn insert_file(fields: &mut Fields, kind: MediaKind, file: &FileRef) {
    fields.insert(kind.url_field().into(), Value::String(file.url.clone()));
    fields.insert(
        kind.file_id_field().into(),
        Value::String(file.file_id.to_string()),
    );
}

/// Decode a stored document into a post.
pub fn decode_post(doc: &Document, buckets: &MediaBuckets) -> CatalogResult<InstrumentPost> {
    let malformed = |reason: String| CatalogError::Codec {
        id: doc.id.clone(),
        reason,
    };
    let required = |field: &str| {
        doc.str_field(field)
            .map(str::to_string)
            .ok_or_else(|| malformed(format!("missing string field `{field}`")))
    };

    let title = required(TITLE)?;
    if title.trim().is_empty() {
        return Err(malformed("empty title".into()));
    }

    Ok(InstrumentPost {
        id: PostId::parse(doc.id.as_str()).map_err(|e| malformed(e.to_string()))?,
        title,
        description: doc.str_field(DESCRIPTION).unwrap_or_default().to_string(),
        category: required(CATEGORY)?,
        image: decode_file(doc, MediaKind::Image, buckets)?,
        audio: decode_file(doc, MediaKind::Audio, buckets)?,
        created_at: doc.created_at,
        updated_at: doc.updated_at,
    })
}

fn decode_file(
    doc: &Document,
    kind: MediaKind,
    buckets: &MediaBuckets,
) -> CatalogResult<FileRef> {
    let malformed = |reason: String| CatalogError::Codec {
        id: doc.id.clone(),
        reason: format!("{kind}: {reason}"),
    };

    let url = doc
        .str_field(kind.url_field())
        .ok_or_else(|| malformed("missing file URL".into()))?;
    let bucket = buckets.get(kind);

    match doc.str_field(kind.file_id_field()) {
        Some(id) => Ok(FileRef {
            bucket: bucket.clone(),
            file_id: FileId::parse(id).map_err(|e| malformed(e.to_string()))?,
            url: url.to_string(),
        }),
        None => {
            let file = FileRef::from_view_url(url).map_err(|e| malformed(e.to_string()))?;
            if &file.bucket != bucket {
                return Err(malformed(format!(
                    "URL points at bucket `{}`, expected `{bucket}`",
                    file.bucket
                )));
            }
            Ok(file)
        }
    }
}
