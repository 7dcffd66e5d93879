use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Longest identifier the backing store accepts.
pub const MAX_ID_LEN: usize = 36;

/// Check an identifier against the store's id rules: 1..=36 characters of
/// `[A-Za-z0-9._-]`, not starting with a special character.
fn validate_id(value: &str) -> Result<(), TypeError> {
    let invalid = |reason: &str| TypeError::InvalidId {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if value.is_empty() {
        return Err(invalid("identifier is empty"));
    }
    if value.len() > MAX_ID_LEN {
        return Err(invalid("identifier is longer than 36 characters"));
    }
    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')))
    {
        return Err(invalid(&format!("unexpected character {bad:?}")));
    }
    if value.starts_with(['.', '-', '_']) {
        return Err(invalid("identifier must start with a letter or digit"));
    }
    Ok(())
}

/// A fresh store-compatible identifier (UUID v7, 32 hex characters).
fn unique_id() -> String {
    uuid::Uuid::now_v7().simple().to_string()
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse and validate an identifier.
            pub fn parse(value: impl Into<String>) -> Result<Self, TypeError> {
                let value = value.into();
                validate_id(&value)?;
                Ok(Self(value))
            }

            /// Generate a new unique, time-ordered identifier.
            pub fn unique() -> Self {
                Self(unique_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id! {
    /// Identifier of an instrument post document. Assigned once at creation.
    PostId
}

opaque_id! {
    /// Identifier of a file inside a bucket. Distinct from the owning post's id.
    FileId
}

opaque_id! {
    /// Identifier of a file bucket (storage namespace).
    BucketId
}
