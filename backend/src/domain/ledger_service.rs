//! Attendance ledger domain service.
//!
//! Read and deletion paths over the ledger. Appending stays with the
//! redemption protocol; this service never creates records.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AttendanceRepository, AttendanceRepositoryError, DeleteRecordRequest, LecturerRecordFilter,
    LedgerCommand, LedgerQuery, ListLecturerRecordsRequest, ListRecordsResponse,
    ListStudentRecordsRequest,
};
use crate::domain::Error;

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

/// Ledger service implementing the query and command ports.
#[derive(Clone)]
pub struct LedgerService<A> {
    ledger: Arc<A>,
}

impl<A> LedgerService<A> {
    /// Create a new service over the attendance repository.
    pub fn new(ledger: Arc<A>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl<A> LedgerQuery for LedgerService<A>
where
    A: AttendanceRepository,
{
    async fn list_for_student(
        &self,
        request: ListStudentRecordsRequest,
    ) -> Result<ListRecordsResponse, Error> {
        let records = self
            .ledger
            .list_for_student(&request.school_id, &request.student_id)
            .await
            .map_err(map_ledger_error)?;

        Ok(ListRecordsResponse {
            records: records.into_iter().map(Into::into).collect(),
        })
    }

    async fn list_for_lecturer(
        &self,
        request: ListLecturerRecordsRequest,
    ) -> Result<ListRecordsResponse, Error> {
        let filter = LecturerRecordFilter {
            date: request.date,
            course_code: request.course_code,
        };
        let records = self
            .ledger
            .list_for_lecturer(&request.school_id, &request.lecturer_id, &filter)
            .await
            .map_err(map_ledger_error)?;

        Ok(ListRecordsResponse {
            records: records.into_iter().map(Into::into).collect(),
        })
    }
}

#[async_trait]
impl<A> LedgerCommand for LedgerService<A>
where
    A: AttendanceRepository,
{
    async fn delete_record(&self, request: DeleteRecordRequest) -> Result<(), Error> {
        let record = self
            .ledger
            .find_by_id(&request.record_id)
            .await
            .map_err(map_ledger_error)?
            .filter(|record| record.school_id() == request.school_id)
            .ok_or_else(|| Error::not_found("attendance record not found"))?;

        if record.lecturer_id() != request.lecturer_id {
            return Err(Error::forbidden(
                "only the owning lecturer may delete a record",
            ));
        }

        self.ledger
            .delete(&request.record_id)
            .await
            .map_err(map_ledger_error)?;

        info!(record_id = %request.record_id, "attendance record deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "ledger_service_tests.rs"]
mod tests;
