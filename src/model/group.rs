//! Named, ordered sequence of resources.
//!
//! Ordering is the bundling order and is load-bearing. Membership is by
//! reference identity (`Arc::ptr_eq`) — two resources with the same uri are
//! distinct members.
//!
//! # Concurrency
//!
//! Readers take immutable snapshots: [`Group::resources`] hands out the
//! current sequence as a shared `Arc`, and later mutations swap in a new
//! sequence without touching snapshots already taken. Writers are serialized
//! internally, but the intended discipline is still a single writer at a time
//! during model construction.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use thiserror::Error;

use crate::resource::Resource;

// ============================================================================
// GroupError
// ============================================================================

/// Group mutation contract violations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    /// The same resource instance is already a member.
    #[error("resource `{uri}` is already a member of group `{group}`")]
    DuplicateMember { group: String, uri: String },

    /// The resource/anchor instance is not a current member.
    #[error("resource `{uri}` is not a member of group `{group}`")]
    NotFound { group: String, uri: String },
}

// ============================================================================
// Group
// ============================================================================

/// Shared handle to a named, ordered resource sequence.
///
/// Cloning the handle shares the underlying group; equality is handle
/// identity, matching the identity semantics of membership.
#[derive(Clone)]
pub struct Group {
    inner: Arc<GroupInner>,
}

/// Shared state behind a [`Group`] handle. Resources hold a `Weak` to this —
/// the group owns its members, members only navigate back.
pub(crate) struct GroupInner {
    name: Arc<str>,
    resources: ArcSwap<Vec<Arc<Resource>>>,
    /// Serializes mutations; snapshot readers never take it.
    writer: Mutex<()>,
}

impl Group {
    /// Create an empty group.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            inner: Arc::new(GroupInner {
                name: Arc::from(name.as_ref()),
                resources: ArcSwap::from_pointee(Vec::new()),
                writer: Mutex::new(()),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<GroupInner>) -> Self {
        Self { inner }
    }

    /// The group's name, unique within a model.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Immutable snapshot of the current sequence, in bundling order.
    ///
    /// The snapshot is unaffected by subsequent mutations.
    pub fn resources(&self) -> Arc<Vec<Arc<Resource>>> {
        self.inner.resources.load_full()
    }

    pub fn len(&self) -> usize {
        self.inner.resources.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.resources.load().is_empty()
    }

    /// Whether `resource` (this exact instance) is currently a member.
    pub fn contains(&self, resource: &Arc<Resource>) -> bool {
        position(&self.inner.resources.load(), resource).is_some()
    }

    /// Add `resource` at the end of the sequence and adopt it.
    pub fn append(&self, resource: &Arc<Resource>) -> Result<(), GroupError> {
        let _guard = self.inner.writer.lock();
        let current = self.inner.resources.load();
        self.reject_duplicate(&current, resource)?;

        let mut next = current.as_ref().clone();
        next.push(Arc::clone(resource));
        self.commit(next, resource);
        Ok(())
    }

    /// Insert `resource` immediately before `anchor` and adopt it.
    ///
    /// `anchor` must be a current member of *this* group; an anchor owned by
    /// another group (or by nothing) is `NotFound`.
    pub fn insert_before(
        &self,
        resource: &Arc<Resource>,
        anchor: &Arc<Resource>,
    ) -> Result<(), GroupError> {
        self.insert_at(resource, anchor, 0)
    }

    /// Insert `resource` immediately after `anchor` and adopt it.
    pub fn insert_after(
        &self,
        resource: &Arc<Resource>,
        anchor: &Arc<Resource>,
    ) -> Result<(), GroupError> {
        self.insert_at(resource, anchor, 1)
    }

    fn insert_at(
        &self,
        resource: &Arc<Resource>,
        anchor: &Arc<Resource>,
        offset: usize,
    ) -> Result<(), GroupError> {
        let _guard = self.inner.writer.lock();
        let current = self.inner.resources.load();

        let index = position(&current, anchor).ok_or_else(|| GroupError::NotFound {
            group: self.name().to_string(),
            uri: anchor.uri().to_string(),
        })?;
        self.reject_duplicate(&current, resource)?;

        let mut next = current.as_ref().clone();
        next.insert(index + offset, Arc::clone(resource));
        self.commit(next, resource);
        Ok(())
    }

    /// Remove `resource` (by identity) and clear its back-reference.
    pub fn remove(&self, resource: &Arc<Resource>) -> Result<(), GroupError> {
        let _guard = self.inner.writer.lock();
        let current = self.inner.resources.load();

        let index = position(&current, resource).ok_or_else(|| GroupError::NotFound {
            group: self.name().to_string(),
            uri: resource.uri().to_string(),
        })?;

        let mut next = current.as_ref().clone();
        next.remove(index);
        self.inner.resources.store(Arc::new(next));
        resource.clear_group();
        Ok(())
    }

    fn reject_duplicate(
        &self,
        current: &[Arc<Resource>],
        resource: &Arc<Resource>,
    ) -> Result<(), GroupError> {
        if position(current, resource).is_some() {
            return Err(GroupError::DuplicateMember {
                group: self.name().to_string(),
                uri: resource.uri().to_string(),
            });
        }
        Ok(())
    }

    /// Publish the new sequence and set the member's back-reference, as one
    /// adoption step under the writer lock.
    fn commit(&self, next: Vec<Arc<Resource>>, adopted: &Arc<Resource>) {
        adopted.set_group(&self.inner);
        self.inner.resources.store(Arc::new(next));
    }
}

/// Identity-based position lookup.
fn position(seq: &[Arc<Resource>], resource: &Arc<Resource>) -> Option<usize> {
    seq.iter().position(|member| Arc::ptr_eq(member, resource))
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Group {}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name())
            .field("len", &self.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
