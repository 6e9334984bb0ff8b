//! Wall-clock boundary.

use deploy_probe_domain::Timestamp;

/// Source of the current UTC time.
///
/// Handlers take the clock as a parameter so report bodies can be compared
/// byte for byte under a fixed clock.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Timestamp;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
