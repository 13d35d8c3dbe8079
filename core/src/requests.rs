//! Request log: entry requests and their approval lifecycle.

use crate::error::{ParkingError, Result};
use crate::types::{ParkingRequest, RequestId, RequestStatus, Resolution, Vehicle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owns the collection of entry requests, in insertion order.
///
/// The log tracks request lifecycle only; the coordinator is responsible for
/// moving the associated vehicle when a request is approved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestLog {
    requests: Vec<ParkingRequest>,
}

impl RequestLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requests: Vec::new(),
        }
    }

    /// Creates a log from prebuilt requests (seed data).
    #[must_use]
    pub const fn from_requests(requests: Vec<ParkingRequest>) -> Self {
        Self { requests }
    }

    /// Records a new pending request embedding `vehicle` as a snapshot.
    pub fn create(
        &mut self,
        vehicle: Vehicle,
        requested_by: &str,
        now: DateTime<Utc>,
    ) -> &ParkingRequest {
        let request = ParkingRequest {
            id: RequestId::new(),
            request_time: now,
            vehicle,
            requested_by: requested_by.to_owned(),
            status: RequestStatus::Pending,
        };
        self.requests.push(request);
        // just pushed, so the last element is the new request
        let index = self.requests.len() - 1;
        &self.requests[index]
    }

    /// Approves a pending request.
    ///
    /// # Errors
    ///
    /// `RequestNotFound` for an unknown id, `AlreadyResolved` if the request
    /// has already been approved or rejected. Checked before any mutation.
    pub fn approve(
        &mut self,
        id: RequestId,
        approver: &str,
        now: DateTime<Utc>,
    ) -> Result<&ParkingRequest> {
        self.resolve(id, approver, now, true)
    }

    /// Rejects a pending request. The associated vehicle is left untouched.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RequestLog::approve`].
    pub fn reject(
        &mut self,
        id: RequestId,
        approver: &str,
        now: DateTime<Utc>,
    ) -> Result<&ParkingRequest> {
        self.resolve(id, approver, now, false)
    }

    /// Pending requests, in insertion order.
    #[must_use]
    pub fn pending(&self) -> Vec<&ParkingRequest> {
        self.requests
            .iter()
            .filter(|request| request.status.is_pending())
            .collect()
    }

    /// Looks up a request by id.
    #[must_use]
    pub fn get(&self, id: RequestId) -> Option<&ParkingRequest> {
        self.requests.iter().find(|request| request.id == id)
    }

    /// All requests, in insertion order.
    #[must_use]
    pub fn requests(&self) -> &[ParkingRequest] {
        &self.requests
    }

    fn resolve(
        &mut self,
        id: RequestId,
        approver: &str,
        now: DateTime<Utc>,
        approved: bool,
    ) -> Result<&ParkingRequest> {
        let Some(request) = self.requests.iter_mut().find(|request| request.id == id) else {
            return Err(ParkingError::RequestNotFound(id));
        };
        if !request.status.is_pending() {
            return Err(ParkingError::AlreadyResolved {
                id,
                status: request.status.as_str(),
            });
        }
        let resolution = Resolution {
            by: approver.to_owned(),
            at: now,
        };
        request.status = if approved {
            RequestStatus::Approved(resolution)
        } else {
            RequestStatus::Rejected(resolution)
        };
        Ok(&*request)
    }
}
