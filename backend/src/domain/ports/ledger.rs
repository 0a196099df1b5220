//! Driving ports for attendance ledger reads and deletion.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::AttendanceRecord;
use crate::domain::Error;

/// Transport-friendly projection of an [`AttendanceRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecordPayload {
    pub id: Uuid,
    pub school_id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub lecturer_id: Uuid,
    pub lecturer_name: String,
    pub session_id: Option<Uuid>,
    pub course_code: String,
    pub course_title: String,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<AttendanceRecord> for AttendanceRecordPayload {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            id: record.id(),
            school_id: record.school_id(),
            student_id: record.student_id(),
            student_name: record.student_name().to_owned(),
            lecturer_id: record.lecturer_id(),
            lecturer_name: record.lecturer_name().to_owned(),
            session_id: record.session_id(),
            course_code: record.course_code().to_owned(),
            course_title: record.course_title().to_owned(),
            date: record.date(),
            status: record.status().to_owned(),
            created_at: record.created_at(),
        }
    }
}

/// Request for a student's own attendance history.
#[derive(Debug, Clone)]
pub struct ListStudentRecordsRequest {
    pub student_id: Uuid,
    pub school_id: Uuid,
}

/// Request for the records owned by a lecturer, optionally filtered.
#[derive(Debug, Clone)]
pub struct ListLecturerRecordsRequest {
    pub lecturer_id: Uuid,
    pub school_id: Uuid,
    /// Restrict to one calendar date.
    pub date: Option<NaiveDate>,
    /// Restrict to one snapshotted course code.
    pub course_code: Option<String>,
}

/// Response for ledger listings.
#[derive(Debug, Clone)]
pub struct ListRecordsResponse {
    /// Matching records, newest first.
    pub records: Vec<AttendanceRecordPayload>,
}

/// Request to hard-delete one record.
#[derive(Debug, Clone)]
pub struct DeleteRecordRequest {
    pub record_id: Uuid,
    /// The caller; must own the record.
    pub lecturer_id: Uuid,
    pub school_id: Uuid,
}

/// Queries over the attendance ledger.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// A student's own records.
    async fn list_for_student(
        &self,
        request: ListStudentRecordsRequest,
    ) -> Result<ListRecordsResponse, Error>;

    /// Records owned by a lecturer, optionally filtered by date and course.
    async fn list_for_lecturer(
        &self,
        request: ListLecturerRecordsRequest,
    ) -> Result<ListRecordsResponse, Error>;
}

/// Commands mutating the attendance ledger outside redemption.
#[async_trait]
pub trait LedgerCommand: Send + Sync {
    /// Hard-delete a record owned by the calling lecturer.
    ///
    /// There is no recovery path; the row is gone.
    async fn delete_record(&self, request: DeleteRecordRequest) -> Result<(), Error>;
}

/// Fixture for wiring the HTTP adapter without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLedger;

#[async_trait]
impl LedgerQuery for FixtureLedger {
    async fn list_for_student(
        &self,
        _request: ListStudentRecordsRequest,
    ) -> Result<ListRecordsResponse, Error> {
        Err(Error::service_unavailable("attendance ledger not configured"))
    }

    async fn list_for_lecturer(
        &self,
        _request: ListLecturerRecordsRequest,
    ) -> Result<ListRecordsResponse, Error> {
        Err(Error::service_unavailable("attendance ledger not configured"))
    }
}

#[async_trait]
impl LedgerCommand for FixtureLedger {
    async fn delete_record(&self, _request: DeleteRecordRequest) -> Result<(), Error> {
        Err(Error::service_unavailable("attendance ledger not configured"))
    }
}
