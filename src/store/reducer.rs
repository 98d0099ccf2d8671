//! Reducer folding received resources into [`ApiState`].

use crate::action::{ApiAction, Method};
use crate::mvi::Reducer;
use crate::resource::{camelize, Resource};

use super::state::ApiState;

/// Reconciliation reducer.
///
/// Pure function: dirty slots are never overwritten, everything else is
/// replaced whole. Deletes leave a tombstone.
pub struct ApiReducer;

impl ApiReducer {
    /// Fold `resources` into `state` in order; later resources win.
    pub fn reconcile(state: ApiState, method: Option<Method>, resources: &[Resource]) -> ApiState {
        resources.iter().fold(state, |mut next, resource| {
            let Some(id) = resource.id.as_deref() else {
                tracing::trace!(
                    resource_type = %resource.resource_type,
                    "Skipping resource without id"
                );
                return next;
            };

            let key = camelize(&resource.resource_type);
            if next.get(&key, id).is_some_and(Resource::is_dirty) {
                tracing::debug!(
                    resource_type = %key,
                    id = %id,
                    "Keeping dirty resource over received one"
                );
                return next;
            }

            let slot = match method {
                Some(Method::Delete) => None,
                _ => Some(resource.clone()),
            };
            next.put(key, id.to_string(), slot);
            next
        })
    }

    /// Remove the dirty mark from a stored resource.
    ///
    /// This is the only way a dirty slot changes; the state owner calls it
    /// once local edits have been acknowledged.
    pub fn clear_dirty(mut state: ApiState, resource_type: &str, id: &str) -> ApiState {
        let Some(current) = state.get(resource_type, id).filter(|r| r.is_dirty()) else {
            return state;
        };

        let mut clean = current.clone();
        clean.clear_dirty();
        state.put(camelize(resource_type), id.to_string(), Some(clean));
        state
    }
}

impl Reducer for ApiReducer {
    type State = ApiState;
    type Intent = ApiAction;

    fn reduce(state: Self::State, intent: &Self::Intent) -> Self::State {
        match intent {
            ApiAction::Receive(receive) => {
                Self::reconcile(state, receive.method, &receive.resources)
            }
            // Request actions are handled by the middleware.
            ApiAction::Request(_) => state,
        }
    }
}
