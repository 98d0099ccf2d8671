//! Reducer trait for the store.

use super::intent::Intent;
use super::state::State;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, &Action) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: State;

    /// The action type this reducer handles.
    type Intent: Intent;

    /// Process an action and return the new state.
    ///
    /// Actions the reducer does not own must return the state untouched.
    fn reduce(state: Self::State, intent: &Self::Intent) -> Self::State;
}
