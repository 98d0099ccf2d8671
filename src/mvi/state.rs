//! Base trait for store state.

/// Marker trait for state slices.
///
/// States should be:
/// - Immutable (cloning shares structure, updates replace it)
/// - Comparable (PartialEq for detecting changes)
/// - Shareable across tasks (snapshots are handed to readers)
pub trait State: Clone + PartialEq + Default + Send + Sync + 'static {}
