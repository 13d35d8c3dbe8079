//! # Parklot Testing
//!
//! Testing utilities and helpers for the parklot state machine.
//!
//! This crate provides:
//! - Mock implementations of the core environment traits
//! - Fixture builders for common facility shapes
//! - A fluent Given/When/Then harness for coordinator operations
//!
//! ## Example
//!
//! ```
//! use parklot_testing::{fixtures, OpTest};
//! use parklot_core::UserRole;
//!
//! let mut coordinator = fixtures::empty_facility(1, 2);
//! let request = coordinator.create_request(fixtures::vehicle_input("XYZ-1"), UserRole::Security);
//!
//! OpTest::new()
//!     .given(coordinator)
//!     .when(move |coordinator| coordinator.approve_request(request.id, "approver-1"))
//!     .then_output(|output| assert!(output.is_ok()))
//!     .then_state(|coordinator| assert!(coordinator.occupancy_consistent()))
//!     .run();
//! ```

pub mod fixtures;
pub mod mocks;

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use op_test::OpTest;
