//! Driven port for the attendance ledger.
//!
//! The ledger's composite uniqueness constraint on (student, session) is the
//! source of truth for the exactly-once marking invariant. Adapters must
//! surface a constraint rejection as [`AttendanceRepositoryError::Duplicate`]
//! so the redemption protocol can distinguish it from genuine failures.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::AttendanceRecord;

/// Errors raised by attendance ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttendanceRepositoryError {
    /// Repository connection could not be established.
    #[error("attendance repository connection failed: {message}")]
    Connection {
        /// Adapter-level description, never shown to clients.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("attendance repository query failed: {message}")]
    Query {
        /// Adapter-level description, never shown to clients.
        message: String,
    },
    /// The (student, session) uniqueness constraint rejected an insert.
    #[error("attendance already recorded for this student and session")]
    Duplicate,
}

impl AttendanceRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Optional filters for lecturer record listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LecturerRecordFilter {
    /// Restrict to records for one calendar date.
    pub date: Option<NaiveDate>,
    /// Restrict to records snapshotting one course code.
    pub course_code: Option<String>,
}

/// Port for appending, reading, and deleting attendance records.
///
/// Records are append-then-delete only; there is no update path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Append one record.
    ///
    /// Callers may pre-check existence, but the constraint behind this
    /// insert is what actually guarantees exactly-once marking under
    /// concurrent requests.
    async fn insert(&self, record: &AttendanceRecord) -> Result<(), AttendanceRepositoryError>;

    /// Existence check for the (student, session) pair.
    async fn find_by_student_and_session(
        &self,
        student_id: &Uuid,
        session_id: &Uuid,
    ) -> Result<Option<AttendanceRecord>, AttendanceRepositoryError>;

    /// Find a record by id.
    async fn find_by_id(
        &self,
        record_id: &Uuid,
    ) -> Result<Option<AttendanceRecord>, AttendanceRepositoryError>;

    /// All records for one student within one school, newest first.
    async fn list_for_student(
        &self,
        school_id: &Uuid,
        student_id: &Uuid,
    ) -> Result<Vec<AttendanceRecord>, AttendanceRepositoryError>;

    /// All records owned by one lecturer within one school, newest first.
    async fn list_for_lecturer(
        &self,
        school_id: &Uuid,
        lecturer_id: &Uuid,
        filter: &LecturerRecordFilter,
    ) -> Result<Vec<AttendanceRecord>, AttendanceRepositoryError>;

    /// Hard-delete one record. No-op when the id is unknown.
    async fn delete(&self, record_id: &Uuid) -> Result<(), AttendanceRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the ledger.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAttendanceRepository;

#[async_trait]
impl AttendanceRepository for FixtureAttendanceRepository {
    async fn insert(&self, _record: &AttendanceRecord) -> Result<(), AttendanceRepositoryError> {
        Ok(())
    }

    async fn find_by_student_and_session(
        &self,
        _student_id: &Uuid,
        _session_id: &Uuid,
    ) -> Result<Option<AttendanceRecord>, AttendanceRepositoryError> {
        Ok(None)
    }

    async fn find_by_id(
        &self,
        _record_id: &Uuid,
    ) -> Result<Option<AttendanceRecord>, AttendanceRepositoryError> {
        Ok(None)
    }

    async fn list_for_student(
        &self,
        _school_id: &Uuid,
        _student_id: &Uuid,
    ) -> Result<Vec<AttendanceRecord>, AttendanceRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_lecturer(
        &self,
        _school_id: &Uuid,
        _lecturer_id: &Uuid,
        _filter: &LecturerRecordFilter,
    ) -> Result<Vec<AttendanceRecord>, AttendanceRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _record_id: &Uuid) -> Result<(), AttendanceRepositoryError> {
        Ok(())
    }
}
