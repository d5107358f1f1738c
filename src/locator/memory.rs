//! In-memory locator for embedded and test content.

use std::io::{Cursor, Read};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{LocateError, UriLocator};

/// Locator backed by an in-memory uri → bytes map.
///
/// Serves the role a classpath/embedded locator plays in servlet bundlers:
/// content shipped with the application rather than read from disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryLocator {
    entries: FxHashMap<String, Arc<[u8]>>,
}

impl MemoryLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register content under a uri. Replaces any previous entry.
    pub fn insert(&mut self, uri: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(uri.into(), Arc::from(bytes));
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, uri: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(uri, bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl UriLocator for MemoryLocator {
    fn name(&self) -> &str {
        "memory"
    }

    fn locate(&self, uri: &str) -> Result<Box<dyn Read + Send>, LocateError> {
        match self.entries.get(uri) {
            Some(bytes) => Ok(Box::new(Cursor::new(Arc::clone(bytes)))),
            None => Err(LocateError::NotFound {
                uri: uri.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_known_uri() {
        let locator = MemoryLocator::new().with("/a.css", b"body{}".to_vec());
        let mut out = String::new();
        locator.locate("/a.css").unwrap().read_to_string(&mut out).unwrap();
        assert_eq!(out, "body{}");
    }

    #[test]
    fn test_locate_unknown_uri() {
        let locator = MemoryLocator::new();
        assert!(matches!(
            locator.locate("/nope.css"),
            Err(LocateError::NotFound { .. })
        ));
    }

    #[test]
    fn test_lookup_is_exact() {
        // The caller passes normalized uris; no fuzzy matching here.
        let locator = MemoryLocator::new().with("/a.css", b"x".to_vec());
        assert!(locator.locate("/a.css/").is_err());
        assert!(locator.locate("a.css").is_err());
    }

    #[test]
    fn test_independent_streams() {
        let locator = MemoryLocator::new().with("/a.css", b"xy".to_vec());
        let mut first = locator.locate("/a.css").unwrap();
        let mut second = locator.locate("/a.css").unwrap();

        let mut buf = [0u8; 1];
        first.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"x");

        // The second stream starts at the beginning regardless
        let mut out = Vec::new();
        second.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"xy");
    }
}
