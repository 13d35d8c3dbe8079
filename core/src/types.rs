//! Domain types for the parking facility.
//!
//! Status fields are closed enums rather than open string sets, so illegal
//! states (an occupied slot without a vehicle, a resolved request without an
//! approver) are unrepresentable. Derived values such as occupancy counts and
//! overstay durations are computed on read from primary fields, never cached.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(Uuid);

impl VehicleId {
    /// Creates a new random `VehicleId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `VehicleId` from a UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VehicleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an entry request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new random `RequestId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `RequestId` from a UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a parking slot, derived from level and slot number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId {
    /// Level the slot belongs to.
    pub level: u8,
    /// Slot number within the level, starting at 1.
    pub number: u8,
}

impl SlotId {
    /// Creates a `SlotId` for the given level and slot number.
    #[must_use]
    pub const fn new(level: u8, number: u8) -> Self {
        Self { level, number }
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "l{}-s{}", self.level, self.number)
    }
}

/// Lifecycle status of a vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    /// Awaiting approval of its entry request.
    Pending,
    /// Parked in the facility.
    Parked,
    /// Has left the facility.
    Exited,
}

impl VehicleStatus {
    /// Lowercase name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Parked => "parked",
            Self::Exited => "exited",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who resolved a request, and when.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Identity of the approver.
    pub by: String,
    /// When the request was resolved.
    pub at: DateTime<Utc>,
}

/// Lifecycle status of an entry request.
///
/// Approved and rejected states carry their [`Resolution`], so a resolved
/// request without an approver cannot exist. Both are terminal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting an approve/reject decision.
    Pending,
    /// Approved; the vehicle was admitted.
    Approved(Resolution),
    /// Rejected; the vehicle was not admitted.
    Rejected(Resolution),
}

impl RequestStatus {
    /// True while the request awaits a decision.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The resolution, if the request has reached a terminal state.
    #[must_use]
    pub const fn resolution(&self) -> Option<&Resolution> {
        match self {
            Self::Approved(resolution) | Self::Rejected(resolution) => Some(resolution),
            Self::Pending => None,
        }
    }

    /// Lowercase name, matching the serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved(_) => "approved",
            Self::Rejected(_) => "rejected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of the human driving the dashboard.
///
/// Roles are labels only; the core does not enforce authorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Gate staff submitting entry requests.
    Security,
    /// Facility admin: direct entries and approvals.
    Admin,
    /// Full visibility across the facility.
    Superuser,
}

impl UserRole {
    /// Display label recorded on requests submitted under this role.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Security => "Security Staff",
            Self::Admin => "Admin User",
            Self::Superuser => "Superuser",
        }
    }
}

/// A single fixed parking space.
///
/// Occupancy is derived: the slot is occupied iff `occupant` is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSlot {
    /// Identity, derived from level and slot number.
    pub id: SlotId,
    /// Display form, e.g. `2-07`.
    pub label: String,
    /// Vehicle currently parked here, if any. Back-reference, not ownership.
    pub occupant: Option<VehicleId>,
}

impl ParkingSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new(id: SlotId) -> Self {
        Self {
            id,
            label: format!("{}-{:02}", id.level, id.number),
            occupant: None,
        }
    }

    /// Whether a vehicle is parked here.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// A floor of the facility, owning its slots in slot-number order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingLevel {
    /// Level number, starting at 1.
    pub level: u8,
    /// Slots on this level, ordered by slot number.
    pub slots: Vec<ParkingSlot>,
}

impl ParkingLevel {
    /// Creates a level with `slot_count` empty slots numbered from 1.
    #[must_use]
    pub fn new(level: u8, slot_count: u8) -> Self {
        Self {
            level,
            slots: (1..=slot_count)
                .map(|number| ParkingSlot::new(SlotId::new(level, number)))
                .collect(),
        }
    }

    /// Total number of slots on this level.
    #[must_use]
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots, computed on read.
    #[must_use]
    pub fn occupied_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_occupied()).count()
    }

    /// Occupancy as a percentage of total slots; 0 for an empty level.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn occupancy_percent(&self) -> f64 {
        if self.slots.is_empty() {
            return 0.0;
        }
        self.occupied_slots() as f64 / self.slots.len() as f64 * 100.0
    }

    /// Unoccupied slots in slot-number order.
    pub fn empty_slots(&self) -> impl Iterator<Item = &ParkingSlot> {
        self.slots.iter().filter(|slot| !slot.is_occupied())
    }
}

/// Caller-supplied fields for a new vehicle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInput {
    /// License plate as entered; no format validation is applied.
    pub license_plate: String,
    /// Name of the driver.
    pub driver_name: String,
    /// When the vehicle is expected to leave, if known.
    pub expected_exit_time: Option<DateTime<Utc>>,
}

/// A vehicle known to the facility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identity.
    pub id: VehicleId,
    /// License plate as entered.
    pub license_plate: String,
    /// Name of the driver.
    pub driver_name: String,
    /// When the vehicle entered (or was registered).
    pub entry_time: DateTime<Utc>,
    /// When the vehicle is expected to leave, if known.
    pub expected_exit_time: Option<DateTime<Utc>>,
    /// When the vehicle actually left, for exited vehicles.
    pub exit_time: Option<DateTime<Utc>>,
    /// Static overstay flag, set at creation and never recomputed.
    pub is_overstay: bool,
    /// Slot the vehicle occupies, for parked vehicles. Weak reference.
    pub slot_id: Option<SlotId>,
    /// Lifecycle status.
    pub status: VehicleStatus,
}

impl Vehicle {
    /// How long the vehicle has overstayed, computed against `now`.
    ///
    /// Only flagged, parked vehicles with an expected exit time overstay;
    /// everything else returns `None`.
    #[must_use]
    pub fn overstay_duration(&self, now: DateTime<Utc>) -> Option<Duration> {
        if !self.is_overstay || !matches!(self.status, VehicleStatus::Parked) {
            return None;
        }
        self.expected_exit_time.map(|expected| now - expected)
    }
}

/// A security-submitted ask for approval to let a vehicle enter.
///
/// `vehicle` is a snapshot taken at request time; later mutations to the
/// registry's live record with the same id are not reflected here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingRequest {
    /// Unique identity.
    pub id: RequestId,
    /// When the request was submitted.
    pub request_time: DateTime<Utc>,
    /// Snapshot of the vehicle at request time.
    pub vehicle: Vehicle,
    /// Label of the submitter, derived from their role.
    pub requested_by: String,
    /// Lifecycle status; approved/rejected are terminal.
    pub status: RequestStatus,
}

impl ParkingRequest {
    /// Approver identity, for resolved requests.
    #[must_use]
    pub fn approved_by(&self) -> Option<&str> {
        self.status.resolution().map(|resolution| resolution.by.as_str())
    }

    /// Resolution time, for resolved requests.
    #[must_use]
    pub const fn approval_time(&self) -> Option<DateTime<Utc>> {
        match self.status.resolution() {
            Some(resolution) => Some(resolution.at),
            None => None,
        }
    }
}
