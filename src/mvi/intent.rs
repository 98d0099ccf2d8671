//! Base trait for actions flowing through the store.

/// Marker trait for action objects.
///
/// Actions represent:
/// - Requests the middleware should perform (read, write, remove)
/// - Results that must be folded into state (receive)
///
/// Actions are processed by reducers to produce new states.
pub trait Intent: Send + 'static {
    /// Namespaced action type, unique within a host application.
    fn action_type(&self) -> &'static str;
}
