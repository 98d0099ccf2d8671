//! Unidirectional data-flow primitives.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Middleware ──→ Reducer ──→ State ──→ Subscribers
//!              │    ↑
//!              ↓    │ RECEIVE
//!            HTTP exchange
//! ```
//!
//! - **State**: Immutable snapshot of the normalized resource store
//! - **Intent**: Request or receive actions
//! - **Reducer**: Pure function folding actions into state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::State;
