//! Wire codec.
//!
//! Converts between in-memory resources and `{ "data": ... }` documents, and
//! hydrates resources against a store snapshot. Everything here is a pure
//! function of its inputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::resource::{
    camelize, dasherize, Linkage, Related, RelatedData, Relationship, RelationshipDescriptor,
    RelationshipKind, Resource, ResourceIdentifier,
};
use crate::store::{ApiState, SlotState};

/// A JSON:API top-level document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireDocument {
    #[serde(default)]
    pub data: Option<PrimaryData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Many(Vec<Resource>),
    One(Box<Resource>),
}

impl WireDocument {
    /// Wrap resources as-is: one resource becomes an object, any other
    /// count becomes an array.
    pub fn from_resources(mut resources: Vec<Resource>) -> Self {
        let data = if resources.len() == 1 {
            PrimaryData::One(Box::new(resources.remove(0)))
        } else {
            PrimaryData::Many(resources)
        };
        Self {
            data: Some(data),
            ..Self::default()
        }
    }
}

/// Wire-form copy of a resource: dash-cased type and linkage types.
pub fn prepare(resource: &Resource) -> Resource {
    let mut wire = resource.clone();
    wire.resource_type = dasherize(&resource.resource_type);
    for relationship in wire.relationships.values_mut() {
        map_linkage_types(relationship, dasherize);
    }
    wire
}

/// Wrap a resource under `data`.
pub fn serialize(resource: &Resource) -> WireDocument {
    WireDocument {
        data: Some(PrimaryData::One(Box::new(prepare(resource)))),
        ..WireDocument::default()
    }
}

/// In-memory copy of a wire resource: camel-cased type and linkage types.
pub fn normalize_resource(mut resource: Resource) -> Resource {
    resource.resource_type = camelize(&resource.resource_type);
    for relationship in resource.relationships.values_mut() {
        map_linkage_types(relationship, camelize);
    }
    resource
}

/// Hydrate a resource against a snapshot.
///
/// The snapshot is kept by the result, so relationship lookups never see
/// later store updates.
pub fn deserialize(resource: &Resource, snapshot: &ApiState) -> HydratedResource {
    let resource = normalize_resource(resource.clone());
    let relationships = resource
        .relationships
        .iter()
        .map(|(name, relationship)| (name.clone(), describe(name, relationship, snapshot)))
        .collect();

    HydratedResource {
        resource,
        relationships,
        snapshot: snapshot.clone(),
    }
}

/// Look up a relationship's targets in a snapshot.
///
/// Targets the snapshot does not hold are left out; `loaded` tells whether
/// that means "missing" or "not fetched yet".
pub fn resolve_relationship(descriptor: &RelationshipDescriptor, store: &ApiState) -> Related {
    let lookup = |target: &ResourceIdentifier| store.get(&target.resource_type, &target.id).cloned();

    let data = match descriptor.kind {
        RelationshipKind::ToOne => RelatedData::One(descriptor.targets.first().and_then(lookup)),
        RelationshipKind::ToMany => {
            RelatedData::Many(descriptor.targets.iter().filter_map(lookup).collect())
        }
    };

    let missing = unknown_targets(&descriptor.targets, store);
    Related {
        data,
        loaded: is_loaded(&missing, descriptor.has_linkage, descriptor.related.as_deref()),
    }
}

fn describe(name: &str, relationship: &Relationship, snapshot: &ApiState) -> RelationshipDescriptor {
    let related = relationship
        .links
        .as_ref()
        .and_then(|links| links.related.clone());

    // Without linkage the shape is unknown; a related link usually names a
    // collection, so treat it as to-many.
    let (kind, targets) = match &relationship.data {
        Some(Linkage::One(target)) => (RelationshipKind::ToOne, target.iter().cloned().collect()),
        Some(Linkage::Many(targets)) => (RelationshipKind::ToMany, targets.clone()),
        None => (RelationshipKind::ToMany, Vec::new()),
    };

    let has_linkage = relationship.data.is_some();
    let missing = unknown_targets(&targets, snapshot);
    let loaded = is_loaded(&missing, has_linkage, related.as_deref());

    RelationshipDescriptor {
        name: name.to_string(),
        kind,
        targets,
        missing,
        related,
        has_linkage,
        loaded,
    }
}

// Tombstoned targets count as known: refetching a deleted resource is waste.
fn unknown_targets(targets: &[ResourceIdentifier], store: &ApiState) -> Vec<ResourceIdentifier> {
    targets
        .iter()
        .filter(|t| store.slot_state(&t.resource_type, &t.id) == SlotState::Unknown)
        .cloned()
        .collect()
}

fn is_loaded(missing: &[ResourceIdentifier], has_linkage: bool, related: Option<&str>) -> bool {
    missing.is_empty() && (has_linkage || related.is_none())
}

fn map_linkage_types(relationship: &mut Relationship, convert: fn(&str) -> String) {
    match &mut relationship.data {
        Some(Linkage::One(Some(target))) => {
            target.resource_type = convert(&target.resource_type);
        }
        Some(Linkage::Many(targets)) => {
            for target in targets {
                target.resource_type = convert(&target.resource_type);
            }
        }
        Some(Linkage::One(None)) | None => {}
    }
}

/// A resource whose relationships resolve against a fixed snapshot.
#[derive(Debug, Clone)]
pub struct HydratedResource {
    resource: Resource,
    relationships: BTreeMap<String, RelationshipDescriptor>,
    snapshot: ApiState,
}

impl HydratedResource {
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn into_resource(self) -> Resource {
        self.resource
    }

    pub fn resource_type(&self) -> &str {
        &self.resource.resource_type
    }

    pub fn id(&self) -> Option<&str> {
        self.resource.id.as_deref()
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.resource.attributes.get(name)
    }

    pub fn descriptor(&self, name: &str) -> Option<&RelationshipDescriptor> {
        self.relationships.get(name)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &RelationshipDescriptor> {
        self.relationships.values()
    }

    /// Resolve a relationship by name; `None` if the resource has no such
    /// relationship.
    pub fn relationship(&self, name: &str) -> Option<Related> {
        self.descriptor(name)
            .map(|descriptor| resolve_relationship(descriptor, &self.snapshot))
    }

    /// True when no relationship is waiting on a fetch.
    pub fn is_fully_loaded(&self) -> bool {
        self.relationships.values().all(|d| d.loaded)
    }

    /// JSON view with every relationship resolved.
    pub fn to_json(&self) -> Value {
        let relationships: Map<String, Value> = self
            .relationships
            .keys()
            .filter_map(|name| {
                let related = self.relationship(name)?;
                Some((name.clone(), json!({ "loaded": related.loaded, "data": related.data })))
            })
            .collect();

        json!({
            "type": self.resource.resource_type,
            "id": self.resource.id,
            "attributes": self.resource.attributes,
            "relationships": relationships,
        })
    }
}
