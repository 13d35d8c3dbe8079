//! Fixture builders for common facility shapes.

use crate::mocks::test_clock;
use parklot_core::{RequestId, SlotLedger, StateCoordinator, UserRole, VehicleInput};
use std::sync::Arc;

/// Coordinator over an empty facility with the given layout and a fixed
/// clock.
#[must_use]
pub fn empty_facility(levels: u8, slots_per_level: u8) -> StateCoordinator {
    StateCoordinator::new(
        SlotLedger::with_layout(levels, slots_per_level),
        Arc::new(test_clock()),
    )
}

/// Single level, single slot: one approval or direct entry fills it.
#[must_use]
pub fn tiny_facility() -> StateCoordinator {
    empty_facility(1, 1)
}

/// Vehicle input with a derived driver name and no expected exit time.
#[must_use]
pub fn vehicle_input(plate: &str) -> VehicleInput {
    VehicleInput {
        license_plate: plate.to_owned(),
        driver_name: format!("Driver of {plate}"),
        expected_exit_time: None,
    }
}

/// A facility with one pending request, returned with the request id.
#[must_use]
pub fn facility_with_pending_request(
    levels: u8,
    slots_per_level: u8,
) -> (StateCoordinator, RequestId) {
    let mut coordinator = empty_facility(levels, slots_per_level);
    let request = coordinator.create_request(vehicle_input("XYZ-1"), UserRole::Security);
    (coordinator, request.id)
}
