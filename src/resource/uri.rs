//! Normalized resource identifier type.
//!
//! Normalization happens once, at construction, never on access.

use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Normalized resource identifier
///
/// Invariants:
/// - No leading/trailing whitespace
/// - Never ends in a single trailing `/` (stripped at construction)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceUri(Arc<str>);

impl ResourceUri {
    /// Create a normalized uri: trim surrounding whitespace, then strip a
    /// single trailing `/` if present.
    ///
    /// Idempotent: normalizing an already-normalized uri is a no-op. A uri
    /// ending in `//` is left alone (only a *single* trailing separator is
    /// considered decoration).
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        let normalized = if trimmed.ends_with('/') && !trimmed.ends_with("//") {
            &trimmed[..trimmed.len() - 1]
        } else {
            trimmed
        };
        Self(Arc::from(normalized))
    }

    /// Get the normalized uri as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the uri is empty after normalization.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// File extension of the uri (text after the last `.` in the last
    /// segment), if any.
    pub fn extension(&self) -> Option<&str> {
        let name = self.0.rsplit('/').next()?;
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() { None } else { Some(ext) }
    }
}

impl std::fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ResourceUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ResourceUri {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceUri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for ResourceUri {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for ResourceUri {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for ResourceUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResourceUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}
