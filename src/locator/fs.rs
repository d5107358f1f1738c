//! Filesystem locator rooted at a base directory.

use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use super::{LocateError, UriLocator};

/// Locator resolving uris as paths under a fixed root directory.
///
/// `/css/app.css` maps to `<root>/css/app.css`. Uris carrying a scheme
/// (`http://...`) are rejected with `UnsupportedScheme`; uris that would
/// escape the root via `..` resolve to nothing.
#[derive(Debug, Clone)]
pub struct FsLocator {
    root: PathBuf,
}

impl FsLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, uri: &str) -> Option<PathBuf> {
        let rel = Path::new(uri.trim_start_matches('/'));
        // No escaping the root
        if rel
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_) | Component::RootDir))
        {
            return None;
        }
        Some(self.root.join(rel))
    }
}

impl UriLocator for FsLocator {
    fn name(&self) -> &str {
        "fs"
    }

    fn locate(&self, uri: &str) -> Result<Box<dyn Read + Send>, LocateError> {
        if uri.contains("://") {
            return Err(LocateError::UnsupportedScheme {
                uri: uri.to_string(),
            });
        }

        let path = self.resolve(uri).ok_or_else(|| LocateError::NotFound {
            uri: uri.to_string(),
        })?;

        if path.is_dir() {
            return Err(LocateError::NotFound {
                uri: uri.to_string(),
            });
        }

        match File::open(&path) {
            Ok(file) => Ok(Box::new(file)),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(LocateError::NotFound {
                    uri: uri.to_string(),
                })
            }
            Err(source) => Err(LocateError::Io {
                uri: uri.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, FsLocator) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css/app.css"), ".a{color:red;}").unwrap();
        let locator = FsLocator::new(dir.path());
        (dir, locator)
    }

    #[test]
    fn test_locate_existing_file() {
        let (_dir, locator) = fixture();
        let mut out = String::new();
        locator
            .locate("/css/app.css")
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, ".a{color:red;}");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let (_dir, locator) = fixture();
        assert!(matches!(
            locator.locate("/css/missing.css"),
            Err(LocateError::NotFound { .. })
        ));
    }

    #[test]
    fn test_directory_is_not_found() {
        let (_dir, locator) = fixture();
        assert!(matches!(
            locator.locate("/css"),
            Err(LocateError::NotFound { .. })
        ));
    }

    #[test]
    fn test_parent_dir_escape_rejected() {
        let (_dir, locator) = fixture();
        assert!(matches!(
            locator.locate("/../etc/passwd"),
            Err(LocateError::NotFound { .. })
        ));
    }

    #[test]
    fn test_scheme_rejected() {
        let (_dir, locator) = fixture();
        assert!(matches!(
            locator.locate("http://example.com/app.css"),
            Err(LocateError::UnsupportedScheme { .. })
        ));
    }
}
