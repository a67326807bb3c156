use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A person or team that tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

pub(crate) fn name_lookup(resources: &[Resource]) -> HashMap<&str, &str> {
    resources
        .iter()
        .map(|resource| (resource.id.as_str(), resource.name.as_str()))
        .collect()
}
