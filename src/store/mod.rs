//! Reconciliation store.

mod host;
mod reducer;
mod state;

pub use host::{Store, STATE_KEY};
pub use reducer::ApiReducer;
pub use state::{ApiState, Slot, SlotState};
