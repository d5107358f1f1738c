//! Resource model: groups, the model container, and its external spec shape.

pub(crate) mod group;
mod spec;
mod store;

pub use group::{Group, GroupError};
pub use spec::{GroupSpec, ModelSpec, ResourceSpec};
pub use store::{Model, ModelError};
