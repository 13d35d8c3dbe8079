//! Slot ledger: parking levels and occupancy queries.

use crate::error::{ParkingError, Result};
use crate::types::{ParkingLevel, ParkingSlot, SlotId, VehicleId};
use serde::{Deserialize, Serialize};

/// Holds the set of parking levels and answers occupancy queries.
///
/// Occupancy is mutated only through [`SlotLedger::occupy`], the single
/// update path that keeps slot occupants and parked vehicles in step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLedger {
    levels: Vec<ParkingLevel>,
}

impl SlotLedger {
    /// Creates a ledger from prebuilt levels, sorted into level order.
    #[must_use]
    pub fn new(mut levels: Vec<ParkingLevel>) -> Self {
        levels.sort_by_key(|level| level.level);
        Self { levels }
    }

    /// Creates an empty facility: `levels` levels of `slots_per_level` slots.
    #[must_use]
    pub fn with_layout(levels: u8, slots_per_level: u8) -> Self {
        Self::new(
            (1..=levels)
                .map(|level| ParkingLevel::new(level, slots_per_level))
                .collect(),
        )
    }

    /// All levels, in level order.
    #[must_use]
    pub fn levels(&self) -> &[ParkingLevel] {
        &self.levels
    }

    /// Every unoccupied slot, in level-then-slot-number order.
    #[must_use]
    pub fn empty_slots(&self) -> Vec<&ParkingSlot> {
        self.levels
            .iter()
            .flat_map(ParkingLevel::empty_slots)
            .collect()
    }

    /// Unoccupied slots on one level, in slot-number order.
    #[must_use]
    pub fn empty_slots_on(&self, level: u8) -> Vec<&ParkingSlot> {
        self.levels
            .iter()
            .filter(|parking_level| parking_level.level == level)
            .flat_map(ParkingLevel::empty_slots)
            .collect()
    }

    /// True iff any level has an unoccupied slot.
    #[must_use]
    pub fn has_empty_slot(&self) -> bool {
        self.levels
            .iter()
            .any(|level| level.slots.iter().any(|slot| !slot.is_occupied()))
    }

    /// The first unoccupied slot across the facility, if any.
    #[must_use]
    pub fn first_empty_slot(&self) -> Option<SlotId> {
        self.levels
            .iter()
            .flat_map(ParkingLevel::empty_slots)
            .map(|slot| slot.id)
            .next()
    }

    /// The first unoccupied slot on `level`, if any.
    #[must_use]
    pub fn first_empty_slot_on(&self, level: u8) -> Option<SlotId> {
        self.empty_slots_on(level).first().map(|slot| slot.id)
    }

    /// Looks up a slot by id.
    #[must_use]
    pub fn get(&self, id: SlotId) -> Option<&ParkingSlot> {
        self.levels
            .iter()
            .find(|level| level.level == id.level)?
            .slots
            .iter()
            .find(|slot| slot.id == id)
    }

    /// Marks `slot` as occupied by `vehicle`.
    ///
    /// # Errors
    ///
    /// `SlotNotFound` if the slot does not exist; `NoCapacity` for that
    /// slot's level if it is already occupied (callers are expected to pick
    /// a slot from [`SlotLedger::empty_slots`] first).
    pub fn occupy(&mut self, slot: SlotId, vehicle: VehicleId) -> Result<()> {
        let Some(target) = self.slot_mut(slot) else {
            return Err(ParkingError::SlotNotFound(slot));
        };
        if target.is_occupied() {
            tracing::warn!(slot = %slot, "occupy refused: slot already taken");
            return Err(ParkingError::NoCapacity {
                level: Some(slot.level),
            });
        }
        target.occupant = Some(vehicle);
        Ok(())
    }

    fn slot_mut(&mut self, id: SlotId) -> Option<&mut ParkingSlot> {
        self.levels
            .iter_mut()
            .find(|level| level.level == id.level)?
            .slots
            .iter_mut()
            .find(|slot| slot.id == id)
    }
}
