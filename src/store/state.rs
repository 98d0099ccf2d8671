//! Normalized resource state.
//!
//! Maps are `Arc`-shared and updated copy-on-write, so a snapshot handed to a
//! reader never changes underneath it and reference identity tells whether a
//! reduction changed anything.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::mvi::State;
use crate::resource::{camelize, Resource};

/// A store slot. `None` is a tombstone left by a delete.
pub type Slot = Option<Resource>;

type TypeMap = BTreeMap<String, Slot>;

/// What the store knows about a `(type, id)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Never received.
    Unknown,
    /// Received, then deleted.
    Deleted,
    Present,
}

/// Camel-cased type → id → slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiState {
    types: Arc<BTreeMap<String, Arc<TypeMap>>>,
}

impl State for ApiState {}

impl ApiState {
    /// Look up a live resource. The type may be given in any case form.
    pub fn get(&self, resource_type: &str, id: &str) -> Option<&Resource> {
        self.slot(resource_type, id).and_then(Option::as_ref)
    }

    pub fn slot_state(&self, resource_type: &str, id: &str) -> SlotState {
        match self.slot(resource_type, id) {
            None => SlotState::Unknown,
            Some(None) => SlotState::Deleted,
            Some(Some(_)) => SlotState::Present,
        }
    }

    /// Live resources of one type, ordered by id.
    pub fn resources_of<'a>(&'a self, resource_type: &str) -> impl Iterator<Item = &'a Resource> {
        self.types
            .get(&camelize(resource_type))
            .into_iter()
            .flat_map(|entries| entries.values().filter_map(Option::as_ref))
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Reference identity of the whole state.
    pub fn same_as(&self, other: &ApiState) -> bool {
        Arc::ptr_eq(&self.types, &other.types)
    }

    /// Reference identity of one type's map.
    pub fn shares_type(&self, other: &ApiState, resource_type: &str) -> bool {
        let key = camelize(resource_type);
        match (self.types.get(&key), other.types.get(&key)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn slot(&self, resource_type: &str, id: &str) -> Option<&Slot> {
        self.types.get(&camelize(resource_type))?.get(id)
    }

    /// Write a slot, copying only the maps shared with other snapshots.
    pub(crate) fn put(&mut self, key: String, id: String, slot: Slot) {
        let types = Arc::make_mut(&mut self.types);
        let entries = Arc::make_mut(types.entry(key).or_default());
        entries.insert(id, slot);
    }
}

impl Serialize for ApiState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.types.iter().map(|(key, entries)| (key, entries.as_ref())))
    }
}
