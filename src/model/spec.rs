//! Typed shape of an externally-built model description.
//!
//! The crate parses no configuration format. An external builder deserializes
//! whatever it likes (toml, json, ...) into these structs and hands them to
//! [`Model::from_spec`] together with the locator the resources should share.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Group, Model, ModelError};
use crate::locator::UriLocator;
use crate::resource::{Resource, ResourceError, ResourceKind};

/// Complete model description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSpec {
    pub groups: Vec<GroupSpec>,
}

/// One named group and its ordered members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSpec {
    pub name: String,
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,
}

/// One resource entry: uri plus kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub uri: String,
    pub kind: ResourceKind,
}

impl Model {
    /// Materialize a model from a spec, binding every resource to `locator`.
    ///
    /// Group declaration order and per-group resource order are preserved.
    pub fn from_spec(spec: &ModelSpec, locator: &Arc<dyn UriLocator>) -> Result<Self, ModelError> {
        let mut model = Model::new();
        for group_spec in &spec.groups {
            let group = Group::new(&group_spec.name);
            for entry in &group_spec.resources {
                let resource = Resource::new(&entry.uri, entry.kind, Arc::clone(locator))
                    .map_err(|source| ModelError::InvalidResource {
                        group: group_spec.name.clone(),
                        source,
                    })?;
                group
                    .append(&resource)
                    .map_err(|e| ModelError::InvalidResource {
                        group: group_spec.name.clone(),
                        source: ResourceError::Group(e),
                    })?;
            }
            model.add_group(group)?;
        }
        Ok(model)
    }
}
