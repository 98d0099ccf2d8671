//! Resource data model.
//!
//! A [`Resource`] is the unit of both the wire protocol and the store. It
//! keeps the JSON:API wire shape so it can be stored exactly as received and
//! sent back without a separate DTO layer.

mod case;
mod relationship;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub use case::{camelize, dasherize};
pub use relationship::{Related, RelatedData, RelationshipDescriptor, RelationshipKind};

/// Key marking a resource as holding local-only modifications.
pub const DIRTY_KEY: &str = "_dirty";

/// A typed, identified record of attributes and relationships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource kind. Camel case in memory, dash case on the wire.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Server-assigned id; `None` until the resource has been created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: None,
            attributes: Map::new(),
            relationships: BTreeMap::new(),
            meta: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_relationship(mut self, name: impl Into<String>, relationship: Relationship) -> Self {
        self.relationships.insert(name.into(), relationship);
        self
    }

    /// Mark the resource as holding local-only modifications.
    pub fn dirty(mut self) -> Self {
        self.meta.insert(DIRTY_KEY.to_string(), Value::Bool(true));
        self
    }

    /// True when either `meta._dirty` or `attributes._dirty` is `true`.
    pub fn is_dirty(&self) -> bool {
        let flagged = |map: &Map<String, Value>| map.get(DIRTY_KEY) == Some(&Value::Bool(true));
        flagged(&self.meta) || flagged(&self.attributes)
    }

    /// Drop the dirty mark from both meta and attributes.
    pub fn clear_dirty(&mut self) {
        self.meta.remove(DIRTY_KEY);
        self.attributes.remove(DIRTY_KEY);
    }

    /// Camel-cased type used as the store key.
    pub fn store_key(&self) -> String {
        camelize(&self.resource_type)
    }

    pub fn identifier(&self) -> Option<ResourceIdentifier> {
        self.id.as_ref().map(|id| ResourceIdentifier {
            resource_type: self.resource_type.clone(),
            id: id.clone(),
        })
    }
}

impl From<&ResourceIdentifier> for Resource {
    fn from(identifier: &ResourceIdentifier) -> Self {
        Resource::new(identifier.resource_type.clone()).with_id(identifier.id.clone())
    }
}

/// `{ "type": ..., "id": ... }` pointer to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

/// Relationship object as it appears on the wire.
///
/// `data` distinguishes three cases: absent (`None`), explicit `null`
/// (`Some(Linkage::One(None))`), and present linkage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_linkage"
    )]
    pub data: Option<Linkage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<RelationshipLinks>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl Relationship {
    pub fn to_one(target: ResourceIdentifier) -> Self {
        Self {
            data: Some(Linkage::One(Some(target))),
            ..Self::default()
        }
    }

    pub fn to_many(targets: Vec<ResourceIdentifier>) -> Self {
        Self {
            data: Some(Linkage::Many(targets)),
            ..Self::default()
        }
    }

    /// Relationship known only through its `related` link.
    pub fn related_link(href: impl Into<String>) -> Self {
        Self {
            links: Some(RelationshipLinks {
                self_link: None,
                related: Some(href.into()),
            }),
            ..Self::default()
        }
    }
}

/// Resource linkage of a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    Many(Vec<ResourceIdentifier>),
    One(Option<ResourceIdentifier>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelationshipLinks {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
}

// Only called when the key is present, so `null` maps to `One(None)`.
fn present_linkage<'de, D>(deserializer: D) -> Result<Option<Linkage>, D::Error>
where
    D: Deserializer<'de>,
{
    Linkage::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dirty_flag_in_meta_or_attributes() {
        assert!(Resource::new("articles").dirty().is_dirty());
        assert!(Resource::new("articles")
            .with_attribute(DIRTY_KEY, true)
            .is_dirty());
        assert!(!Resource::new("articles")
            .with_attribute(DIRTY_KEY, false)
            .is_dirty());
    }

    #[test]
    fn clear_dirty_removes_both_marks() {
        let mut resource = Resource::new("articles")
            .with_attribute(DIRTY_KEY, true)
            .dirty();
        resource.clear_dirty();
        assert!(!resource.is_dirty());
        assert!(resource.meta.is_empty());
    }

    #[test]
    fn relationship_data_absent_null_and_present() {
        let absent: Relationship = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.data, None);

        let null: Relationship = serde_json::from_value(json!({ "data": null })).unwrap();
        assert_eq!(null.data, Some(Linkage::One(None)));

        let one: Relationship =
            serde_json::from_value(json!({ "data": { "type": "people", "id": "9" } })).unwrap();
        assert_eq!(
            one.data,
            Some(Linkage::One(Some(ResourceIdentifier::new("people", "9"))))
        );

        let many: Relationship =
            serde_json::from_value(json!({ "data": [{ "type": "tags", "id": "1" }] })).unwrap();
        assert_eq!(
            many.data,
            Some(Linkage::Many(vec![ResourceIdentifier::new("tags", "1")]))
        );
    }

    #[test]
    fn resource_parses_wire_shape() {
        let resource: Resource = serde_json::from_value(json!({
            "type": "articles",
            "id": "1",
            "attributes": { "title": "A" },
            "relationships": {
                "author": { "links": { "related": "/articles/1/author" } }
            }
        }))
        .unwrap();

        assert_eq!(resource.store_key(), "articles");
        assert_eq!(resource.attributes["title"], json!("A"));
        let links = resource.relationships["author"].links.clone().unwrap();
        assert_eq!(links.related.as_deref(), Some("/articles/1/author"));
    }

    #[test]
    fn new_resource_serializes_without_id() {
        let value = serde_json::to_value(Resource::new("articles").with_attribute("title", "A"))
            .unwrap();
        assert_eq!(value, json!({ "type": "articles", "attributes": { "title": "A" } }));
    }
}
