//! weft — resource group model and processing pipeline for web asset bundling.
//!
//! The crate models named, ordered collections of content artifacts
//! ([`Resource`]s in [`Group`]s), resolves their content through pluggable
//! [`UriLocator`] strategies, runs it through an ordered [`Pipeline`] of
//! [`TransformUnit`]s, and concatenates the result deterministically
//! ([`write_group`]).
//!
//! ```no_run
//! use std::sync::Arc;
//! use weft::{
//!     FsLocator, Group, OnError, Pipeline, Resource, ResourceKind,
//!     processor::CssMinify, write_group,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let locator: Arc<dyn weft::UriLocator> = Arc::new(FsLocator::new("site"));
//!
//! let group = Group::new("head");
//! group.append(&Resource::new("/css/reset.css", ResourceKind::Style, Arc::clone(&locator))?)?;
//! group.append(&Resource::new("/css/app.css", ResourceKind::Style, locator)?)?;
//!
//! let pipeline = Pipeline::new().with(CssMinify);
//! let mut out = Vec::new();
//! write_group(&group, ResourceKind::Style, &pipeline, OnError::Abort, &mut out)?;
//! # Ok(())
//! # }
//! ```
//!
//! All calls are synchronous; callers parallelize across resources as they
//! see fit (the bundler does so internally with rayon). Group mutation
//! assumes a single writer at a time during model construction; reads are
//! immutable snapshots and always safe.

pub mod bundle;
pub mod locator;
pub mod logger;
pub mod model;
pub mod processor;
pub mod resource;

pub use bundle::{BundleError, BundleReport, OnError, write_group};
pub use locator::{FsLocator, LocateError, LocatorSet, MemoryLocator, UriLocator};
pub use model::{Group, GroupError, GroupSpec, Model, ModelError, ModelSpec, ResourceSpec};
pub use processor::{Pipeline, ProcessError, TransformUnit};
pub use resource::{Resource, ResourceError, ResourceKind, ResourceUri};
