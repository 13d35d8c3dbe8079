//! The coordinator: the only mutation path over the three ledgers.
//!
//! Every public operation validates all of its preconditions before the
//! first mutation, so an error return always means nothing changed.

use crate::environment::Clock;
use crate::error::{ParkingError, Result};
use crate::requests::RequestLog;
use crate::slots::SlotLedger;
use crate::types::{
    ParkingLevel, ParkingRequest, ParkingSlot, RequestId, UserRole, Vehicle, VehicleInput,
    VehicleStatus,
};
use crate::vehicles::VehicleRegistry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Derived per-level occupancy summary, computed on read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelOccupancy {
    /// Level number.
    pub level: u8,
    /// Total slots on the level.
    pub total_slots: usize,
    /// Occupied slots on the level.
    pub occupied_slots: usize,
    /// Occupancy as a percentage of total slots.
    pub occupancy_percent: f64,
}

/// Facade mutating the slot ledger, vehicle registry, and request log
/// together atomically.
///
/// External callers (the rendering layer) must never bypass the coordinator
/// to mutate ledger internals; it alone preserves the cross-ledger
/// invariant that a slot's occupant is always a parked vehicle referencing
/// that slot back.
#[derive(Clone)]
pub struct StateCoordinator {
    slots: SlotLedger,
    vehicles: VehicleRegistry,
    requests: RequestLog,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for StateCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCoordinator")
            .field("slots", &self.slots)
            .field("vehicles", &self.vehicles)
            .field("requests", &self.requests)
            .finish_non_exhaustive()
    }
}

impl StateCoordinator {
    /// Creates a coordinator over an empty registry and request log.
    #[must_use]
    pub fn new(slots: SlotLedger, clock: Arc<dyn Clock>) -> Self {
        Self {
            slots,
            vehicles: VehicleRegistry::new(),
            requests: RequestLog::new(),
            clock,
        }
    }

    /// Assembles a coordinator from prebuilt ledgers (seed data).
    #[must_use]
    pub fn from_parts(
        slots: SlotLedger,
        vehicles: VehicleRegistry,
        requests: RequestLog,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            slots,
            vehicles,
            requests,
            clock,
        }
    }

    /// All parking levels, in level order.
    #[must_use]
    pub fn levels(&self) -> &[ParkingLevel] {
        self.slots.levels()
    }

    /// Every unoccupied slot, in level-then-slot-number order.
    #[must_use]
    pub fn empty_slots(&self) -> Vec<&ParkingSlot> {
        self.slots.empty_slots()
    }

    /// Unoccupied slots on one level.
    #[must_use]
    pub fn empty_slots_on(&self, level: u8) -> Vec<&ParkingSlot> {
        self.slots.empty_slots_on(level)
    }

    /// Parked vehicles flagged overstay.
    #[must_use]
    pub fn overstay_vehicles(&self) -> Vec<&Vehicle> {
        self.vehicles.overstay()
    }

    /// Pending requests, in insertion order.
    #[must_use]
    pub fn pending_requests(&self) -> Vec<&ParkingRequest> {
        self.requests.pending()
    }

    /// All vehicles, in insertion order.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        self.vehicles.vehicles()
    }

    /// All requests, in insertion order.
    #[must_use]
    pub fn requests(&self) -> &[ParkingRequest] {
        self.requests.requests()
    }

    /// Looks up a request by id.
    #[must_use]
    pub fn request(&self, id: RequestId) -> Option<&ParkingRequest> {
        self.requests.get(id)
    }

    /// Per-level occupancy summary, computed on read.
    #[must_use]
    pub fn occupancy_snapshot(&self) -> Vec<LevelOccupancy> {
        self.slots
            .levels()
            .iter()
            .map(|level| LevelOccupancy {
                level: level.level,
                total_slots: level.total_slots(),
                occupied_slots: level.occupied_slots(),
                occupancy_percent: level.occupancy_percent(),
            })
            .collect()
    }

    /// Submits an entry request on behalf of `requested_by`.
    ///
    /// Creates a new pending vehicle (no slot, overstay flag off) and wraps
    /// a snapshot of it in a new pending request. Never fails.
    pub fn create_request(&mut self, input: VehicleInput, requested_by: UserRole) -> ParkingRequest {
        let now = self.clock.now();
        let vehicle = self
            .vehicles
            .add(input, VehicleStatus::Pending, None, now);
        tracing::info!(
            vehicle = %vehicle.id,
            plate = %vehicle.license_plate,
            requested_by = requested_by.label(),
            "entry request submitted"
        );
        self.requests
            .create(vehicle, requested_by.label(), now)
            .clone()
    }

    /// Approves a pending request and parks its vehicle.
    ///
    /// The vehicle is assigned the first empty slot in level-then-number
    /// order, through the same update path direct entry uses, so the
    /// occupancy invariant holds after every approval.
    ///
    /// # Errors
    ///
    /// `NoCapacity` if the facility has no empty slot (checked first, before
    /// the request is even looked up); `RequestNotFound` for an unknown id;
    /// `AlreadyResolved` for an already approved/rejected request;
    /// `VehicleNotFound` if the requested vehicle is missing from the
    /// registry. No ledger is touched on any error.
    pub fn approve_request(&mut self, id: RequestId, approver: &str) -> Result<ParkingRequest> {
        let now = self.clock.now();

        let Some(slot_id) = self.slots.first_empty_slot() else {
            tracing::warn!(request = %id, "approval refused: no empty slot");
            return Err(ParkingError::NoCapacity { level: None });
        };
        let vehicle_id = {
            let request = self
                .requests
                .get(id)
                .ok_or(ParkingError::RequestNotFound(id))?;
            if !request.status.is_pending() {
                return Err(ParkingError::AlreadyResolved {
                    id,
                    status: request.status.as_str(),
                });
            }
            request.vehicle.id
        };
        if !self.vehicles.contains(vehicle_id) {
            return Err(ParkingError::VehicleNotFound(vehicle_id));
        }

        // all preconditions hold; none of the mutations below can fail
        let approved = self.requests.approve(id, approver, now)?.clone();
        self.vehicles.set_status(vehicle_id, VehicleStatus::Parked)?;
        self.vehicles.assign_slot(vehicle_id, slot_id)?;
        self.slots.occupy(slot_id, vehicle_id)?;

        tracing::info!(
            request = %id,
            vehicle = %vehicle_id,
            slot = %slot_id,
            approver,
            "request approved"
        );
        Ok(approved)
    }

    /// Rejects a pending request.
    ///
    /// The requested vehicle keeps its `Pending` status: the system this
    /// replaces gave rejected vehicles no further lifecycle, and that
    /// behavior is preserved deliberately.
    ///
    /// # Errors
    ///
    /// `RequestNotFound` for an unknown id, `AlreadyResolved` for an already
    /// approved/rejected request.
    pub fn reject_request(&mut self, id: RequestId, approver: &str) -> Result<ParkingRequest> {
        let now = self.clock.now();
        let rejected = self.requests.reject(id, approver, now)?.clone();
        tracing::info!(request = %id, approver, "request rejected");
        Ok(rejected)
    }

    /// Admin direct entry: parks a new vehicle on `level` immediately,
    /// bypassing the request flow.
    ///
    /// # Errors
    ///
    /// `NoCapacity` for that level if it has no empty slot.
    pub fn add_vehicle_direct(&mut self, input: VehicleInput, level: u8) -> Result<Vehicle> {
        let now = self.clock.now();
        let Some(slot_id) = self.slots.first_empty_slot_on(level) else {
            tracing::warn!(level, "direct entry refused: level full");
            return Err(ParkingError::NoCapacity { level: Some(level) });
        };

        let vehicle = self
            .vehicles
            .add(input, VehicleStatus::Parked, Some(slot_id), now);
        self.slots.occupy(slot_id, vehicle.id)?;

        tracing::info!(
            vehicle = %vehicle.id,
            plate = %vehicle.license_plate,
            slot = %slot_id,
            "vehicle parked via direct entry"
        );
        Ok(vehicle)
    }

    /// Cross-ledger occupancy check: every occupied slot's occupant is a
    /// parked vehicle referencing that slot back, and every parked vehicle's
    /// slot names it as occupant.
    #[must_use]
    pub fn occupancy_consistent(&self) -> bool {
        let occupants_ok = self
            .slots
            .levels()
            .iter()
            .flat_map(|level| level.slots.iter())
            .filter_map(|slot| slot.occupant.map(|occupant| (slot.id, occupant)))
            .all(|(slot_id, occupant)| {
                self.vehicles.get(occupant).is_some_and(|vehicle| {
                    vehicle.status == VehicleStatus::Parked && vehicle.slot_id == Some(slot_id)
                })
            });

        let parked_ok = self
            .vehicles
            .vehicles()
            .iter()
            .filter(|vehicle| vehicle.status == VehicleStatus::Parked)
            .all(|vehicle| {
                vehicle.slot_id.is_some_and(|slot_id| {
                    self.slots
                        .get(slot_id)
                        .is_some_and(|slot| slot.occupant == Some(vehicle.id))
                })
            });

        occupants_ok && parked_ok
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Tests can unwrap

    use super::*;
    use crate::environment::SystemClock;

    fn input(plate: &str) -> VehicleInput {
        VehicleInput {
            license_plate: plate.to_string(),
            driver_name: "Driver 1".to_string(),
            expected_exit_time: None,
        }
    }

    fn facility(levels: u8, slots_per_level: u8) -> StateCoordinator {
        StateCoordinator::new(
            SlotLedger::with_layout(levels, slots_per_level),
            Arc::new(SystemClock),
        )
    }

    #[test]
    fn direct_entry_takes_first_empty_slot_on_level() {
        let mut coordinator = facility(2, 2);

        let first = coordinator.add_vehicle_direct(input("AAA-1"), 2).unwrap();
        assert_eq!(first.status, VehicleStatus::Parked);
        assert_eq!(first.slot_id.map(|id| (id.level, id.number)), Some((2, 1)));

        let second = coordinator.add_vehicle_direct(input("BBB-2"), 2).unwrap();
        assert_eq!(second.slot_id.map(|id| (id.level, id.number)), Some((2, 2)));

        let err = coordinator.add_vehicle_direct(input("CCC-3"), 2).unwrap_err();
        assert_eq!(err, ParkingError::NoCapacity { level: Some(2) });
        assert!(coordinator.occupancy_consistent());
    }

    #[test]
    fn approval_parks_the_vehicle_in_a_slot() {
        let mut coordinator = facility(1, 2);
        let request = coordinator.create_request(input("XYZ-1"), UserRole::Security);

        let approved = coordinator.approve_request(request.id, "approver-1").unwrap();
        assert_eq!(approved.approved_by(), Some("approver-1"));

        let vehicle = coordinator
            .vehicles()
            .iter()
            .find(|vehicle| vehicle.id == request.vehicle.id)
            .cloned()
            .unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Parked);
        assert!(vehicle.slot_id.is_some());
        assert!(coordinator.occupancy_consistent());
        assert_eq!(coordinator.empty_slots().len(), 1);
    }

    #[test]
    fn full_facility_refuses_approval_before_lookup() {
        let mut coordinator = facility(1, 1);
        coordinator.add_vehicle_direct(input("AAA-1"), 1).unwrap();
        let request = coordinator.create_request(input("XYZ-1"), UserRole::Security);

        let err = coordinator.approve_request(request.id, "approver-1").unwrap_err();
        assert_eq!(err, ParkingError::NoCapacity { level: None });

        // nothing moved
        let pending = coordinator.pending_requests();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, request.id);
        assert_eq!(
            coordinator
                .vehicles()
                .iter()
                .find(|vehicle| vehicle.id == request.vehicle.id)
                .map(|vehicle| vehicle.status),
            Some(VehicleStatus::Pending)
        );
    }

    #[test]
    fn rejection_keeps_the_vehicle_pending() {
        let mut coordinator = facility(1, 2);
        let request = coordinator.create_request(input("XYZ-1"), UserRole::Security);

        coordinator.reject_request(request.id, "approver-1").unwrap();

        assert!(coordinator.pending_requests().is_empty());
        assert_eq!(
            coordinator
                .vehicles()
                .iter()
                .find(|vehicle| vehicle.id == request.vehicle.id)
                .map(|vehicle| vehicle.status),
            Some(VehicleStatus::Pending)
        );
        assert_eq!(coordinator.empty_slots().len(), 2);
    }
}
