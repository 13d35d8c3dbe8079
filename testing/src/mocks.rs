//! Mock implementations of the core environment traits.

use chrono::{DateTime, Utc};
use parklot_core::Clock;

/// Clock pinned to a single instant.
///
/// Request and approval timestamps produced under this clock are exact,
/// so assertions can compare them with `==` instead of a tolerance.
///
/// # Example
///
/// ```
/// use parklot_testing::mocks::FixedClock;
/// use parklot_core::Clock;
/// use chrono::Utc;
///
/// let clock = FixedClock::new(Utc::now());
/// assert_eq!(clock.now(), clock.now());
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Pins the clock to `time`.
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// The instant the test suites run at: 2025-01-01 00:00:00 UTC.
///
/// # Panics
///
/// Panics if the hardcoded timestamp fails to parse, which cannot happen.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_clock() -> FixedClock {
    FixedClock::new(
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc),
    )
}
