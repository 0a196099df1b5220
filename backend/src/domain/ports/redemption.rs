//! Driving ports for the redemption protocol.
//!
//! Redemption is the act of a student converting a valid session code into
//! an attendance record. It is the only production write path into the
//! ledger.

use async_trait::async_trait;
use uuid::Uuid;

use super::AttendanceRecordPayload;
use crate::domain::Error;

/// Request to redeem a session code.
#[derive(Debug, Clone)]
pub struct MarkAttendanceRequest {
    /// Raw code as entered by the student; normalised before lookup.
    pub code: String,
    pub student_id: Uuid,
    pub school_id: Uuid,
    /// Student display name at this instant, snapshotted onto the record.
    pub student_name: String,
}

/// Response for [`RedemptionCommand::mark_attendance`].
#[derive(Debug, Clone)]
pub struct MarkAttendanceResponse {
    /// The freshly appended record.
    pub record: AttendanceRecordPayload,
}

/// Request for a student's marked state on one session.
#[derive(Debug, Clone)]
pub struct SessionStatusRequest {
    pub session_id: Uuid,
    pub student_id: Uuid,
    pub school_id: Uuid,
}

/// Response for [`RedemptionQuery::session_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatusResponse {
    /// Whether this student already has a record for the session.
    pub marked: bool,
}

/// The student-facing redemption command.
#[async_trait]
pub trait RedemptionCommand: Send + Sync {
    /// Redeem a code: resolve, validate, and append exactly once.
    ///
    /// Fails with `NotFound` for unknown codes, `SessionExpired` for closed
    /// or past-date sessions, and `DuplicateAttendance` when this student
    /// already holds a record for the session, whether that is detected by
    /// the pre-check or by the storage constraint.
    async fn mark_attendance(
        &self,
        request: MarkAttendanceRequest,
    ) -> Result<MarkAttendanceResponse, Error>;
}

/// Read-only redemption queries.
#[async_trait]
pub trait RedemptionQuery: Send + Sync {
    /// Whether the student has already marked the given session.
    async fn session_status(
        &self,
        request: SessionStatusRequest,
    ) -> Result<SessionStatusResponse, Error>;
}

/// Fixture for wiring the HTTP adapter without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRedemption;

#[async_trait]
impl RedemptionCommand for FixtureRedemption {
    async fn mark_attendance(
        &self,
        _request: MarkAttendanceRequest,
    ) -> Result<MarkAttendanceResponse, Error> {
        Err(Error::service_unavailable("redemption not configured"))
    }
}

#[async_trait]
impl RedemptionQuery for FixtureRedemption {
    async fn session_status(
        &self,
        _request: SessionStatusRequest,
    ) -> Result<SessionStatusResponse, Error> {
        Err(Error::service_unavailable("redemption not configured"))
    }
}
