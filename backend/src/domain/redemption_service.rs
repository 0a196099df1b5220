//! Redemption protocol domain service.
//!
//! Orchestrates the student-facing check-then-act sequence: resolve the
//! session by code, validate its state, and append to the ledger. The
//! pre-check read keeps the common double-submit fast and friendly, but the
//! ledger's storage constraint is what actually guarantees exactly-once
//! marking when requests race.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    AttendanceRepository, AttendanceRepositoryError, MarkAttendanceRequest,
    MarkAttendanceResponse, RedemptionCommand, RedemptionQuery, SessionRepository,
    SessionRepositoryError, SessionStatusRequest, SessionStatusResponse,
};
use crate::domain::{AttendanceRecord, AttendanceRecordDraft, Error, SessionCode, STATUS_PRESENT};

fn map_session_error(error: SessionRepositoryError) -> Error {
    match error {
        SessionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("session repository unavailable: {message}"))
        }
        SessionRepositoryError::Query { message }
        | SessionRepositoryError::DuplicateCode { code: message } => {
            Error::internal(format!("session repository error: {message}"))
        }
    }
}

fn map_ledger_error(error: AttendanceRepositoryError) -> Error {
    match error {
        AttendanceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("attendance ledger unavailable: {message}"))
        }
        AttendanceRepositoryError::Query { message } => {
            Error::internal(format!("attendance ledger error: {message}"))
        }
        AttendanceRepositoryError::Duplicate => {
            Error::duplicate_attendance("attendance already marked for this session")
        }
    }
}

/// Redemption service implementing the command and query ports.
#[derive(Clone)]
pub struct RedemptionService<S, A> {
    sessions: Arc<S>,
    ledger: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<S, A> RedemptionService<S, A> {
    /// Create a new service over the session and ledger repositories.
    pub fn new(sessions: Arc<S>, ledger: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions,
            ledger,
            clock,
        }
    }
}

#[async_trait]
impl<S, A> RedemptionCommand for RedemptionService<S, A>
where
    S: SessionRepository,
    A: AttendanceRepository,
{
    async fn mark_attendance(
        &self,
        request: MarkAttendanceRequest,
    ) -> Result<MarkAttendanceResponse, Error> {
        let code = SessionCode::parse(&request.code)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let session = self
            .sessions
            .find_by_code(&code)
            .await
            .map_err(map_session_error)?
            .filter(|session| session.school_id() == request.school_id)
            .ok_or_else(|| Error::not_found("unknown session code"))?;

        let today = self.clock.utc().date_naive();
        if !session.is_active() || session.is_expired(today) {
            return Err(Error::session_expired(
                "this session is closed or its date has passed",
            ));
        }

        // Fast path for double-submits; the insert below is the guarantee.
        let existing = self
            .ledger
            .find_by_student_and_session(&request.student_id, &session.id())
            .await
            .map_err(map_ledger_error)?;
        if existing.is_some() {
            return Err(Error::duplicate_attendance(
                "attendance already marked for this session",
            ));
        }

        let record = AttendanceRecord::new(AttendanceRecordDraft {
            id: Uuid::new_v4(),
            school_id: session.school_id(),
            student_id: request.student_id,
            student_name: request.student_name,
            lecturer_id: session.lecturer_id(),
            lecturer_name: session.lecturer_name().to_owned(),
            session_id: Some(session.id()),
            course_code: session.course_code().to_owned(),
            course_title: session.course_title().to_owned(),
            date: session.date(),
            status: STATUS_PRESENT.to_owned(),
            created_at: self.clock.utc(),
        })
        .map_err(|err| Error::invalid_request(format!("invalid attendance record: {err}")))?;

        // A concurrent winner surfaces here as Duplicate, which
        // map_ledger_error reports exactly like the pre-check hit.
        self.ledger
            .insert(&record)
            .await
            .map_err(map_ledger_error)?;

        info!(
            record_id = %record.id(),
            session_id = %session.id(),
            "attendance marked"
        );
        Ok(MarkAttendanceResponse {
            record: record.into(),
        })
    }
}

#[async_trait]
impl<S, A> RedemptionQuery for RedemptionService<S, A>
where
    S: SessionRepository,
    A: AttendanceRepository,
{
    async fn session_status(
        &self,
        request: SessionStatusRequest,
    ) -> Result<SessionStatusResponse, Error> {
        let record = self
            .ledger
            .find_by_student_and_session(&request.student_id, &request.session_id)
            .await
            .map_err(map_ledger_error)?
            .filter(|record| record.school_id() == request.school_id);

        Ok(SessionStatusResponse {
            marked: record.is_some(),
        })
    }
}

#[cfg(test)]
#[path = "redemption_service_tests.rs"]
mod tests;
