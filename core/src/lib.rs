//! # Parklot Core
//!
//! In-memory state machine for a role-based parking-management dashboard.
//!
//! The crate tracks three ledgers and a facade over them:
//!
//! - [`SlotLedger`]: parking levels and slot occupancy
//! - [`VehicleRegistry`]: vehicles and their lifecycle status
//! - [`RequestLog`]: entry requests and their approval lifecycle
//! - [`StateCoordinator`]: the only mutation path, enforcing cross-ledger
//!   preconditions atomically
//!
//! Everything is single-process and memory-resident: no persistence, no
//! network, no background work. "Overstay" durations and occupancy counts
//! are computed lazily on read; time is injected through the
//! [`environment::Clock`] seam so tests stay deterministic.
//!
//! ## Example
//!
//! ```
//! use parklot_core::{SlotLedger, StateCoordinator, SystemClock, UserRole, VehicleInput};
//! use std::sync::Arc;
//!
//! let slots = SlotLedger::with_layout(3, 20);
//! let mut coordinator = StateCoordinator::new(slots, Arc::new(SystemClock));
//!
//! let request = coordinator.create_request(
//!     VehicleInput {
//!         license_plate: "XYZ-1".to_string(),
//!         driver_name: "A. Driver".to_string(),
//!         expected_exit_time: None,
//!     },
//!     UserRole::Security,
//! );
//!
//! let approved = coordinator.approve_request(request.id, "admin-1")?;
//! assert!(approved.status.resolution().is_some());
//! assert_eq!(coordinator.empty_slots().len(), 59);
//! # Ok::<(), parklot_core::ParkingError>(())
//! ```

pub mod coordinator;
pub mod environment;
pub mod error;
pub mod requests;
pub mod seed;
pub mod slots;
pub mod types;
pub mod vehicles;

pub use coordinator::{LevelOccupancy, StateCoordinator};
pub use environment::{Clock, SystemClock};
pub use error::{ParkingError, Result};
pub use requests::RequestLog;
pub use seed::{SeedConfig, seed};
pub use slots::SlotLedger;
pub use types::{
    ParkingLevel, ParkingRequest, ParkingSlot, RequestId, RequestStatus, Resolution, SlotId,
    UserRole, Vehicle, VehicleId, VehicleInput, VehicleStatus,
};
pub use vehicles::VehicleRegistry;
