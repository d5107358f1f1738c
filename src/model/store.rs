//! Model: the set of groups making up one bundling configuration.

use thiserror::Error;

use super::Group;
use crate::resource::ResourceError;

/// Model-level contract violations
#[derive(Debug, Error)]
pub enum ModelError {
    /// Group names are unique within a model.
    #[error("duplicate group `{name}` in model")]
    DuplicateGroup { name: String },

    /// A spec entry produced an invalid resource.
    #[error("invalid resource in group `{group}`")]
    InvalidResource {
        group: String,
        #[source]
        source: ResourceError,
    },
}

/// Ordered collection of groups, unique by name.
///
/// Declaration order is preserved; it is the order an external writer would
/// emit bundles in.
#[derive(Debug, Default)]
pub struct Model {
    groups: Vec<Group>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group; its name must not already be taken.
    pub fn add_group(&mut self, group: Group) -> Result<(), ModelError> {
        if self.group(group.name()).is_some() {
            return Err(ModelError::DuplicateGroup {
                name: group.name().to_string(),
            });
        }
        self.groups.push(group);
        Ok(())
    }

    /// Look up a group by name.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// All groups in declaration order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_lookup() {
        let mut model = Model::new();
        model.add_group(Group::new("head")).unwrap();
        model.add_group(Group::new("body")).unwrap();

        assert_eq!(model.len(), 2);
        assert!(model.group("head").is_some());
        assert!(model.group("footer").is_none());
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let mut model = Model::new();
        model.add_group(Group::new("head")).unwrap();

        let err = model.add_group(Group::new("head")).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateGroup { name } if name == "head"));
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let mut model = Model::new();
        for name in ["c", "a", "b"] {
            model.add_group(Group::new(name)).unwrap();
        }
        let names: Vec<_> = model.groups().iter().map(Group::name).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }
}
