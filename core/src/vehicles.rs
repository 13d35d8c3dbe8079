//! Vehicle registry: the collection of vehicles and their lifecycle status.

use crate::error::{ParkingError, Result};
use crate::types::{SlotId, Vehicle, VehicleId, VehicleInput, VehicleStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owns the collection of vehicles, keyed by id with insertion order
/// preserved for iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRegistry {
    vehicles: Vec<Vehicle>,
}

impl VehicleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vehicles: Vec::new(),
        }
    }

    /// Creates a registry from prebuilt vehicles (seed data); ids must be
    /// unique.
    #[must_use]
    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> Self {
        debug_assert!(
            {
                let mut ids: Vec<VehicleId> = vehicles.iter().map(|vehicle| vehicle.id).collect();
                ids.sort_by_key(|id| *id.as_uuid());
                ids.windows(2).all(|pair| pair[0] != pair[1])
            },
            "duplicate vehicle id in seed data"
        );
        Self { vehicles }
    }

    /// Constructs a new vehicle with a fresh id and appends it.
    ///
    /// The overstay flag starts false; it is a static creation-time flag,
    /// never recomputed afterwards.
    pub fn add(
        &mut self,
        input: VehicleInput,
        status: VehicleStatus,
        slot_id: Option<SlotId>,
        now: DateTime<Utc>,
    ) -> Vehicle {
        let vehicle = Vehicle {
            id: VehicleId::new(),
            license_plate: input.license_plate,
            driver_name: input.driver_name,
            entry_time: now,
            expected_exit_time: input.expected_exit_time,
            exit_time: None,
            is_overstay: false,
            slot_id,
            status,
        };
        self.vehicles.push(vehicle.clone());
        vehicle
    }

    /// Transitions a vehicle's status.
    ///
    /// # Errors
    ///
    /// `VehicleNotFound` for an unknown id. (The system this replaces
    /// dropped the update silently; that was a defect.)
    pub fn set_status(&mut self, id: VehicleId, status: VehicleStatus) -> Result<()> {
        let vehicle = self.get_mut(id).ok_or(ParkingError::VehicleNotFound(id))?;
        vehicle.status = status;
        Ok(())
    }

    /// Records which slot a vehicle occupies.
    ///
    /// # Errors
    ///
    /// `VehicleNotFound` for an unknown id.
    pub fn assign_slot(&mut self, id: VehicleId, slot: SlotId) -> Result<()> {
        let vehicle = self.get_mut(id).ok_or(ParkingError::VehicleNotFound(id))?;
        vehicle.slot_id = Some(slot);
        Ok(())
    }

    /// Looks up a vehicle by id.
    #[must_use]
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    /// Whether a vehicle with this id exists.
    #[must_use]
    pub fn contains(&self, id: VehicleId) -> bool {
        self.get(id).is_some()
    }

    /// All vehicles, in insertion order.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Vehicles flagged overstay that are currently parked.
    ///
    /// A flagged vehicle that is pending or has exited is not an overstay.
    #[must_use]
    pub fn overstay(&self) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|vehicle| vehicle.is_overstay && vehicle.status == VehicleStatus::Parked)
            .collect()
    }

    fn get_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|vehicle| vehicle.id == id)
    }
}
