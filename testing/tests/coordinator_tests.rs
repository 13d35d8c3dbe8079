//! Integration tests for the coordinator's request lifecycle.
//!
//! Each test pins one externally observable property of the state machine:
//! terminal idempotence, the capacity guard, creation/approval/rejection
//! effects, the overstay filter, and unknown-id handling.

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use parklot_core::{
    Clock, ParkingError, RequestId, SlotId, SlotLedger, StateCoordinator, UserRole, Vehicle,
    VehicleId, VehicleRegistry, VehicleStatus,
};
use parklot_testing::{OpTest, fixtures, test_clock};
use std::sync::Arc;

#[test]
fn creation_round_trip() {
    let mut coordinator = fixtures::empty_facility(1, 2);

    let request = coordinator.create_request(fixtures::vehicle_input("XYZ-1"), UserRole::Security);

    assert!(request.status.is_pending());
    assert_eq!(request.requested_by, "Security Staff");
    assert_eq!(request.request_time, test_clock().now());
    assert_eq!(request.vehicle.status, VehicleStatus::Pending);
    assert!(!request.vehicle.is_overstay);
    assert_eq!(request.vehicle.slot_id, None);

    // both the request and the vehicle are visible in subsequent listings
    let pending: Vec<RequestId> = coordinator
        .pending_requests()
        .iter()
        .map(|request| request.id)
        .collect();
    assert_eq!(pending, [request.id]);
    assert!(
        coordinator
            .vehicles()
            .iter()
            .any(|vehicle| vehicle.id == request.vehicle.id)
    );
}

#[test]
fn approval_effect() {
    let (coordinator, request_id) = fixtures::facility_with_pending_request(1, 2);

    OpTest::new()
        .given(coordinator)
        .when(move |coordinator| coordinator.approve_request(request_id, "approver-1"))
        .then_output(move |output| {
            let approved = output.as_ref().unwrap();
            assert_eq!(approved.approved_by(), Some("approver-1"));
            assert_eq!(approved.approval_time(), Some(test_clock().now()));
        })
        .then_state(move |coordinator| {
            let request = coordinator.request(request_id).unwrap();
            let vehicle = coordinator
                .vehicles()
                .iter()
                .find(|vehicle| vehicle.id == request.vehicle.id)
                .unwrap();
            assert_eq!(vehicle.status, VehicleStatus::Parked);
            // the first empty slot in level-then-number order was taken
            assert_eq!(vehicle.slot_id, Some(SlotId::new(1, 1)));
            assert!(coordinator.occupancy_consistent());
        })
        .run();
}

#[test]
fn rejection_leaves_the_vehicle_pending() {
    // the vehicle of a rejected request keeps its pending status forever;
    // this mirrors the system being replaced and is intentional
    let (mut coordinator, request_id) = fixtures::facility_with_pending_request(1, 2);

    let rejected = coordinator.reject_request(request_id, "approver-1").unwrap();
    assert_eq!(rejected.approved_by(), Some("approver-1"));

    let vehicle_id = rejected.vehicle.id;
    assert_eq!(
        coordinator
            .vehicles()
            .iter()
            .find(|vehicle| vehicle.id == vehicle_id)
            .map(|vehicle| vehicle.status),
        Some(VehicleStatus::Pending)
    );
    assert_eq!(coordinator.empty_slots().len(), 2);
}

#[test]
fn terminal_states_are_idempotent() {
    let (mut coordinator, request_id) = fixtures::facility_with_pending_request(1, 4);
    coordinator.approve_request(request_id, "approver-1").unwrap();

    let request_before = coordinator.request(request_id).cloned().unwrap();
    let vehicles_before = coordinator.vehicles().to_vec();

    for result in [
        coordinator.approve_request(request_id, "approver-2"),
        coordinator.reject_request(request_id, "approver-2"),
    ] {
        assert_eq!(
            result,
            Err(ParkingError::AlreadyResolved {
                id: request_id,
                status: "approved",
            })
        );
    }

    assert_eq!(coordinator.request(request_id), Some(&request_before));
    assert_eq!(coordinator.vehicles(), vehicles_before.as_slice());
}

#[test]
fn capacity_guard_blocks_approval_and_mutates_nothing() {
    let mut coordinator = fixtures::tiny_facility();
    coordinator
        .add_vehicle_direct(fixtures::vehicle_input("AAA-1"), 1)
        .unwrap();
    let request = coordinator.create_request(fixtures::vehicle_input("XYZ-1"), UserRole::Security);

    let requests_before = coordinator.requests().to_vec();
    let vehicles_before = coordinator.vehicles().to_vec();
    let levels_before = coordinator.levels().to_vec();

    let err = coordinator
        .approve_request(request.id, "approver-1")
        .unwrap_err();
    assert_eq!(err, ParkingError::NoCapacity { level: None });

    assert_eq!(coordinator.requests(), requests_before.as_slice());
    assert_eq!(coordinator.vehicles(), vehicles_before.as_slice());
    assert_eq!(coordinator.levels(), levels_before.as_slice());
}

#[test]
fn unknown_request_id_mutates_nothing() {
    let (mut coordinator, _) = fixtures::facility_with_pending_request(1, 2);
    let unknown = RequestId::new();

    let requests_before = coordinator.requests().to_vec();
    let vehicles_before = coordinator.vehicles().to_vec();

    assert_eq!(
        coordinator.approve_request(unknown, "x").map(|_| ()),
        Err(ParkingError::RequestNotFound(unknown))
    );
    assert_eq!(
        coordinator.reject_request(unknown, "x").map(|_| ()),
        Err(ParkingError::RequestNotFound(unknown))
    );

    assert_eq!(coordinator.requests(), requests_before.as_slice());
    assert_eq!(coordinator.vehicles(), vehicles_before.as_slice());
}

#[test]
fn overstay_filter_is_parked_and_flagged_only() {
    let now = test_clock().now();
    let mut slots = SlotLedger::with_layout(1, 4);

    let vehicle = |plate: &str, status: VehicleStatus, overstay: bool, slot: Option<SlotId>| Vehicle {
        id: VehicleId::new(),
        license_plate: plate.to_owned(),
        driver_name: format!("Driver of {plate}"),
        entry_time: now,
        expected_exit_time: Some(now),
        exit_time: None,
        is_overstay: overstay,
        slot_id: slot,
        status,
    };

    let parked_overstay = vehicle("AAA-1", VehicleStatus::Parked, true, Some(SlotId::new(1, 1)));
    let parked_ok = vehicle("BBB-2", VehicleStatus::Parked, false, Some(SlotId::new(1, 2)));
    let pending_overstay = vehicle("CCC-3", VehicleStatus::Pending, true, None);
    let exited_overstay = vehicle("DDD-4", VehicleStatus::Exited, true, None);

    slots.occupy(SlotId::new(1, 1), parked_overstay.id).unwrap();
    slots.occupy(SlotId::new(1, 2), parked_ok.id).unwrap();

    let coordinator = StateCoordinator::from_parts(
        slots,
        VehicleRegistry::from_vehicles(vec![
            parked_overstay.clone(),
            parked_ok,
            pending_overstay,
            exited_overstay,
        ]),
        parklot_core::RequestLog::new(),
        Arc::new(test_clock()),
    );

    let overstay: Vec<VehicleId> = coordinator
        .overstay_vehicles()
        .iter()
        .map(|vehicle| vehicle.id)
        .collect();
    assert_eq!(overstay, [parked_overstay.id]);
    assert!(coordinator.occupancy_consistent());
}

#[test]
fn empty_slots_are_listed_in_level_then_number_order() {
    let mut coordinator = fixtures::empty_facility(3, 2);
    coordinator
        .add_vehicle_direct(fixtures::vehicle_input("AAA-1"), 2)
        .unwrap();

    let ids: Vec<SlotId> = coordinator
        .empty_slots()
        .iter()
        .map(|slot| slot.id)
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(ids.len(), 5);
    assert!(!ids.contains(&SlotId::new(2, 1)));
}

#[test]
fn direct_entry_on_full_level_fails_with_that_level() {
    let mut coordinator = fixtures::empty_facility(2, 1);
    coordinator
        .add_vehicle_direct(fixtures::vehicle_input("AAA-1"), 1)
        .unwrap();

    let err = coordinator
        .add_vehicle_direct(fixtures::vehicle_input("BBB-2"), 1)
        .unwrap_err();
    assert_eq!(err, ParkingError::NoCapacity { level: Some(1) });

    // the other level is untouched and still available
    assert_eq!(
        coordinator
            .empty_slots_on(2)
            .iter()
            .map(|slot| slot.id)
            .collect::<Vec<_>>(),
        [SlotId::new(2, 1)]
    );
}
