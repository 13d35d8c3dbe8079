//! Error types for parking-state operations.

use crate::types::{RequestId, SlotId, VehicleId};
use thiserror::Error;

/// Result type alias for parking-state operations.
pub type Result<T> = std::result::Result<T, ParkingError>;

/// Error taxonomy for the parking state machine.
///
/// Every error is returned as a value from the operation that detects it,
/// and an error return always means no ledger was modified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParkingError {
    /// No request with this id exists.
    #[error("request {0} not found")]
    RequestNotFound(RequestId),

    /// No vehicle with this id exists.
    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    /// No slot with this id exists.
    #[error("slot {0} not found")]
    SlotNotFound(SlotId),

    /// The request has already been approved or rejected.
    ///
    /// Terminal states are sticky: re-approving or re-rejecting is refused,
    /// never silently repeated.
    #[error("request {id} is already {status}")]
    AlreadyResolved {
        /// The resolved request.
        id: RequestId,
        /// Its terminal status name.
        status: &'static str,
    },

    /// No empty slot is available for an approval or direct entry.
    #[error("no empty slot available")]
    NoCapacity {
        /// The level that was full, when the operation targeted one.
        level: Option<u8>,
    },
}
