//! Dependency seams for the parking core.
//!
//! The only ambient dependency the state machine has is wall-clock time:
//! "overstay" durations and request/approval timestamps are all read through
//! [`Clock`], so tests can pin time to a fixed instant.

use chrono::{DateTime, Utc};

/// Abstracts time reads for testability.
///
/// # Examples
///
/// ```
/// use parklot_core::environment::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let earlier = clock.now();
/// assert!(clock.now() >= earlier);
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
