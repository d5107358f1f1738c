//! Resource: immutable identity + kind + locator, with group membership.
//!
//! A `Resource` is freely shareable across threads: `uri`, `kind` and
//! `locator` never change after construction. The only mutable part is the
//! non-owning back-reference to the owning [`Group`](crate::model::Group),
//! written exclusively by the group adoption/removal protocol.

mod kind;
mod uri;

pub use kind::ResourceKind;
pub use uri::ResourceUri;

use std::fmt;
use std::io::{BufReader, Read};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use thiserror::Error;

use crate::debug;
use crate::locator::{LocateError, UriLocator};
use crate::model::group::GroupInner;
use crate::model::{Group, GroupError};

// ============================================================================
// ResourceError
// ============================================================================

/// Resource construction and content retrieval errors
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The uri was empty after normalization. The remaining construction-time
    /// contract violation: absent kind/locator are unrepresentable here.
    #[error("resource uri must not be empty")]
    EmptyUri,

    /// The locator could not resolve the uri at all.
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// Location nominally succeeded but yielded no usable content
    /// (unreadable stream, invalid utf-8).
    #[error("`{uri}` resolved to no usable content")]
    Retrieval {
        uri: String,
        #[source]
        source: std::io::Error,
    },

    /// A relative insertion was requested on a resource with no owning group.
    #[error("resource `{uri}` does not belong to any group")]
    Detached { uri: String },

    /// A delegated group mutation failed.
    #[error(transparent)]
    Group(#[from] GroupError),
}

// ============================================================================
// Resource
// ============================================================================

/// A single addressable content artifact.
pub struct Resource {
    /// Normalized identifier, fixed at construction.
    uri: ResourceUri,
    /// Resource kind, fixed at construction.
    kind: ResourceKind,
    /// Strategy used to resolve `uri` to a byte stream, fixed at construction.
    locator: Arc<dyn UriLocator>,
    /// Non-owning back-reference to the owning group. Empty while detached.
    /// Written only through [`Group`] adoption/removal.
    group: RwLock<Weak<GroupInner>>,
}

impl Resource {
    /// Create a resource. The uri is normalized once here (trimmed, single
    /// trailing `/` stripped); an empty normalized uri is rejected.
    pub fn new(
        uri: &str,
        kind: ResourceKind,
        locator: Arc<dyn UriLocator>,
    ) -> Result<Arc<Self>, ResourceError> {
        let uri = ResourceUri::new(uri);
        if uri.is_empty() {
            return Err(ResourceError::EmptyUri);
        }
        Ok(Arc::new(Self {
            uri,
            kind,
            locator,
            group: RwLock::new(Weak::new()),
        }))
    }

    /// The normalized uri.
    pub fn uri(&self) -> &ResourceUri {
        &self.uri
    }

    /// The resource kind.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The group currently containing this resource, if any.
    pub fn group(&self) -> Option<Group> {
        self.group.read().upgrade().map(Group::from_inner)
    }

    /// Open a fresh byte stream for this resource's content.
    ///
    /// Each call resolves anew through the locator; nothing is cached. The
    /// stream is released when the returned handle is dropped.
    pub fn open(&self) -> Result<Box<dyn Read + Send>, LocateError> {
        debug!("locate"; "opening `{}` via {}", self.uri, self.locator.name());
        self.locator.locate(self.uri.as_str())
    }

    /// Resolve, buffer and decode this resource's content as UTF-8.
    ///
    /// Distinguishes failures: a [`ResourceError::Locate`] means resolution
    /// failed outright, a [`ResourceError::Retrieval`] means resolution
    /// succeeded but the stream was unusable.
    pub fn read_content(&self) -> Result<String, ResourceError> {
        let stream = self.open()?;
        let mut reader = BufReader::new(stream);
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|source| ResourceError::Retrieval {
                uri: self.uri.to_string(),
                source,
            })?;
        Ok(content)
    }

    /// Insert `resource` immediately before `self` in the owning group.
    ///
    /// Fails with [`ResourceError::Detached`] when `self` has no group.
    pub fn insert_before(self: &Arc<Self>, resource: &Arc<Resource>) -> Result<(), ResourceError> {
        let group = self.group().ok_or_else(|| ResourceError::Detached {
            uri: self.uri.to_string(),
        })?;
        group.insert_before(resource, self)?;
        Ok(())
    }

    /// Adoption protocol only: point the back-reference at `inner`.
    pub(crate) fn set_group(&self, inner: &Arc<GroupInner>) {
        *self.group.write() = Arc::downgrade(inner);
    }

    /// Adoption protocol only: clear the back-reference on removal.
    pub(crate) fn clear_group(&self) {
        *self.group.write() = Weak::new();
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("uri", &self.uri)
            .field("kind", &self.kind)
            .field("locator", &self.locator.name())
            .field("group", &self.group().map(|g| g.name().to_string()))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
