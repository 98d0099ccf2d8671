//! Explicit relationship descriptors.
//!
//! A descriptor is what a relationship accessor resolves against: the target
//! identifiers, an optional `related` link, and whether every target is
//! already known to the snapshot it was built from.

use serde::Serialize;

use super::{Resource, ResourceIdentifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipKind {
    ToOne,
    ToMany,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipDescriptor {
    pub name: String,
    pub kind: RelationshipKind,
    /// Linked targets, types in camel case.
    pub targets: Vec<ResourceIdentifier>,
    /// Targets the snapshot has never received.
    pub missing: Vec<ResourceIdentifier>,
    /// `links.related` from the wire, if any.
    pub related: Option<String>,
    /// False when the wire carried no `data` member at all.
    pub has_linkage: bool,
    pub loaded: bool,
}

impl RelationshipDescriptor {
    /// Camel-cased type of the first target.
    pub fn target_type(&self) -> Option<&str> {
        self.targets.first().map(|t| t.resource_type.as_str())
    }

    pub fn target_ids(&self) -> Vec<&str> {
        self.targets.iter().map(|t| t.id.as_str()).collect()
    }
}

/// Result of resolving a relationship against a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Related {
    pub data: RelatedData,
    pub loaded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RelatedData {
    One(Option<Resource>),
    Many(Vec<Resource>),
}

impl Related {
    pub fn one(&self) -> Option<&Resource> {
        match &self.data {
            RelatedData::One(resource) => resource.as_ref(),
            RelatedData::Many(resources) => resources.first(),
        }
    }

    pub fn many(&self) -> &[Resource] {
        match &self.data {
            RelatedData::One(Some(resource)) => std::slice::from_ref(resource),
            RelatedData::One(None) => &[],
            RelatedData::Many(resources) => resources,
        }
    }
}
