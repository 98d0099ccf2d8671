//! Minimal host state container.
//!
//! Holds the current [`ApiState`], applies actions through [`ApiReducer`] and
//! notifies subscribers. Readers get cheap snapshots; the lock is never held
//! across an await point.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::action::ApiAction;
use crate::mvi::{Intent, Reducer};

use super::reducer::ApiReducer;
use super::state::ApiState;

/// Key under which the API slice lives in an application state tree.
pub const STATE_KEY: &str = "api";

/// Thread-safe store with change notification.
///
/// Cloning shares the same underlying state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<ApiState>>,
    updates: watch::Sender<ApiState>,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(ApiState::default())
    }

    /// Start from existing state, e.g. resources restored from a local mirror.
    pub fn with_state(state: ApiState) -> Self {
        let (updates, _) = watch::channel(state.clone());
        Self {
            inner: Arc::new(RwLock::new(state)),
            updates,
        }
    }

    /// Snapshot of the current state.
    ///
    /// Take a fresh snapshot after every await; the store may have changed.
    pub fn state(&self) -> ApiState {
        self.inner.read().clone()
    }

    /// Run an action through the reducer and return the resulting state.
    pub fn dispatch(&self, action: &ApiAction) -> ApiState {
        self.apply(action.action_type(), |state| ApiReducer::reduce(state, action))
    }

    /// Drop the dirty mark from a stored resource.
    pub fn clear_dirty(&self, resource_type: &str, id: &str) -> ApiState {
        self.apply("clear_dirty", |state| {
            ApiReducer::clear_dirty(state, resource_type, id)
        })
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<ApiState> {
        self.updates.subscribe()
    }

    fn apply(&self, label: &str, reduce: impl FnOnce(ApiState) -> ApiState) -> ApiState {
        let (next, changed) = {
            let mut guard = self.inner.write();
            let next = reduce(guard.clone());
            let changed = !next.same_as(&guard);
            *guard = next.clone();
            (next, changed)
        };

        if changed {
            tracing::trace!(action = label, "Store updated");
            self.updates.send_replace(next.clone());
        }
        next
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{self, RequestOptions};
    use crate::resource::Resource;
    use serde_json::Map;

    fn receive(resources: Vec<Resource>) -> ApiAction {
        action::receive(resources, None, Map::new())
    }

    #[test]
    fn dispatch_updates_state() {
        let store = Store::new();
        store.dispatch(&receive(vec![Resource::new("articles").with_id("1")]));
        assert!(store.state().get("articles", "1").is_some());
    }

    #[test]
    fn snapshots_are_isolated_from_later_dispatches() {
        let store = Store::new();
        let snapshot = store.state();
        store.dispatch(&receive(vec![Resource::new("articles").with_id("1")]));
        assert!(snapshot.get("articles", "1").is_none());
    }

    #[test]
    fn subscribers_see_changes_only() {
        let store = Store::new();
        let mut updates = store.subscribe();

        store.dispatch(&action::read(Resource::new("articles"), RequestOptions::default()));
        assert!(!updates.has_changed().unwrap());

        store.dispatch(&receive(vec![Resource::new("articles").with_id("1")]));
        assert!(updates.has_changed().unwrap());
        assert!(updates.borrow_and_update().get("articles", "1").is_some());
    }

    #[test]
    fn clear_dirty_through_store() {
        let store = Store::new();
        store.dispatch(&receive(vec![Resource::new("articles").with_id("1").dirty()]));
        store.clear_dirty("articles", "1");
        assert!(!store.state().get("articles", "1").unwrap().is_dirty());
    }
}
