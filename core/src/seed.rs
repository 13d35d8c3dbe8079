//! Synthetic dataset generation.
//!
//! The dashboard boots against generated data. Unlike the ad-hoc generator
//! it replaces, seeded slots and vehicles are cross-linked, so the occupancy
//! invariant holds before the first operation runs.

use crate::coordinator::StateCoordinator;
use crate::environment::Clock;
use crate::requests::RequestLog;
use crate::slots::SlotLedger;
use crate::types::{
    ParkingLevel, ParkingRequest, RequestId, RequestStatus, Resolution, UserRole, Vehicle,
    VehicleId, VehicleStatus,
};
use crate::vehicles::VehicleRegistry;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::sync::Arc;

/// Shape of the generated dataset.
///
/// The defaults reproduce the reference dataset: 3 levels of 20 slots,
/// roughly 30 vehicles, a handful of pending and resolved requests, and a
/// 30% overstay rate.
#[derive(Clone, Debug, PartialEq)]
pub struct SeedConfig {
    /// Number of parking levels.
    pub levels: u8,
    /// Slots per level.
    pub slots_per_level: u8,
    /// Pending vehicles, each wrapped in a pending request.
    pub pending_vehicles: usize,
    /// Vehicles that have already exited.
    pub exited_vehicles: usize,
    /// Already approved/rejected requests.
    pub resolved_requests: usize,
    /// Probability that a generated vehicle carries the overstay flag.
    /// Values outside `[0.0, 1.0]` are clamped before use.
    pub overstay_ratio: f64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            levels: 3,
            slots_per_level: 20,
            pending_vehicles: 5,
            exited_vehicles: 4,
            resolved_requests: 5,
            overstay_ratio: 0.3,
        }
    }
}

impl SeedConfig {
    /// Loads the dataset shape from `PARKLOT_*` environment variables,
    /// falling back to the defaults for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            levels: env_or("PARKLOT_LEVELS", defaults.levels),
            slots_per_level: env_or("PARKLOT_SLOTS_PER_LEVEL", defaults.slots_per_level),
            pending_vehicles: env_or("PARKLOT_PENDING_VEHICLES", defaults.pending_vehicles),
            exited_vehicles: env_or("PARKLOT_EXITED_VEHICLES", defaults.exited_vehicles),
            resolved_requests: env_or("PARKLOT_RESOLVED_REQUESTS", defaults.resolved_requests),
            overstay_ratio: env_or("PARKLOT_OVERSTAY_RATIO", defaults.overstay_ratio),
        }
    }

    /// The overstay ratio as a valid probability: clamped into `[0.0, 1.0]`,
    /// with non-finite values counting as zero.
    fn overstay_probability(&self) -> f64 {
        if self.overstay_ratio.is_finite() {
            self.overstay_ratio.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Generates a populated coordinator satisfying the occupancy invariant.
///
/// The generator is deterministic for a given `rng`, so tests can pass a
/// seeded [`rand::rngs::StdRng`].
pub fn seed<R: Rng>(
    config: &SeedConfig,
    rng: &mut R,
    clock: Arc<dyn Clock>,
) -> StateCoordinator {
    let now = clock.now();
    let mut builder = SeedBuilder {
        config,
        now,
        vehicles: Vec::new(),
        requests: Vec::new(),
        driver_counter: 0,
    };

    let levels: Vec<ParkingLevel> = (1..=config.levels)
        .map(|level| builder.populated_level(level, rng))
        .collect();
    builder.exited_vehicles(rng);
    builder.pending_requests(rng);
    builder.resolved_requests(rng);

    tracing::info!(
        levels = levels.len(),
        vehicles = builder.vehicles.len(),
        requests = builder.requests.len(),
        "synthetic dataset generated"
    );

    StateCoordinator::from_parts(
        SlotLedger::new(levels),
        VehicleRegistry::from_vehicles(builder.vehicles),
        RequestLog::from_requests(builder.requests),
        clock,
    )
}

struct SeedBuilder<'a> {
    config: &'a SeedConfig,
    now: DateTime<Utc>,
    vehicles: Vec<Vehicle>,
    requests: Vec<ParkingRequest>,
    driver_counter: u32,
}

impl SeedBuilder<'_> {
    /// A level with its first `occupied` slots filled by parked vehicles.
    fn populated_level<R: Rng>(&mut self, level: u8, rng: &mut R) -> ParkingLevel {
        let total = self.config.slots_per_level;
        // capped so the default 3x20 layout lands near the reference
        // dataset's ~30 vehicles, and always leaves a free slot
        let occupied = if total > 5 {
            rng.gen_range(5..total.min(13))
        } else {
            total / 2
        };

        let mut parking_level = ParkingLevel::new(level, total);
        for slot in parking_level.slots.iter_mut().take(usize::from(occupied)) {
            let mut vehicle = self.vehicle(VehicleStatus::Parked, rng);
            vehicle.slot_id = Some(slot.id);
            slot.occupant = Some(vehicle.id);
            self.vehicles.push(vehicle);
        }
        parking_level
    }

    fn exited_vehicles<R: Rng>(&mut self, rng: &mut R) {
        for _ in 0..self.config.exited_vehicles {
            let mut vehicle = self.vehicle(VehicleStatus::Exited, rng);
            vehicle.exit_time = Some(vehicle.entry_time + Duration::hours(2));
            self.vehicles.push(vehicle);
        }
    }

    fn pending_requests<R: Rng>(&mut self, rng: &mut R) {
        for _ in 0..self.config.pending_vehicles {
            let vehicle = self.vehicle(VehicleStatus::Pending, rng);
            self.requests.push(ParkingRequest {
                id: RequestId::new(),
                request_time: self.now - Duration::seconds(rng.gen_range(0..3_600)),
                vehicle: vehicle.clone(),
                requested_by: UserRole::Security.label().to_owned(),
                status: RequestStatus::Pending,
            });
            self.vehicles.push(vehicle);
        }
    }

    /// Already-decided requests. Approved ones reference a parked vehicle;
    /// rejected ones leave their vehicle pending forever, as the live
    /// reject flow does.
    fn resolved_requests<R: Rng>(&mut self, rng: &mut R) {
        let parked: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|vehicle| vehicle.status == VehicleStatus::Parked)
            .cloned()
            .collect();

        for _ in 0..self.config.resolved_requests {
            let resolution = Resolution {
                by: UserRole::Admin.label().to_owned(),
                at: self.now - Duration::seconds(rng.gen_range(0..3_600)),
            };
            let (snapshot, status) = if rng.gen_bool(0.5) && !parked.is_empty() {
                let mut snapshot = parked[rng.gen_range(0..parked.len())].clone();
                // the snapshot predates approval: pending, no slot yet
                snapshot.status = VehicleStatus::Pending;
                snapshot.slot_id = None;
                (snapshot, RequestStatus::Approved(resolution))
            } else {
                let vehicle = self.vehicle(VehicleStatus::Pending, rng);
                self.vehicles.push(vehicle.clone());
                (vehicle, RequestStatus::Rejected(resolution))
            };
            self.requests.push(ParkingRequest {
                id: RequestId::new(),
                request_time: self.now - Duration::seconds(rng.gen_range(3_600..86_400)),
                vehicle: snapshot,
                requested_by: UserRole::Security.label().to_owned(),
                status,
            });
        }
    }

    fn vehicle<R: Rng>(&mut self, status: VehicleStatus, rng: &mut R) -> Vehicle {
        self.driver_counter += 1;
        let entry_time = self.now - Duration::seconds(rng.gen_range(0..86_400));
        Vehicle {
            id: VehicleId::new(),
            license_plate: format!("ABC-{}", rng.gen_range(100..1_000)),
            driver_name: format!("Driver {}", self.driver_counter),
            entry_time,
            expected_exit_time: Some(entry_time + Duration::hours(1)),
            exit_time: None,
            is_overstay: rng.gen_bool(self.config.overstay_probability()),
            slot_id: None,
            status,
        }
    }
}
