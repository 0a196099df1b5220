//! PostgreSQL-backed `AttendanceRepository` implementation using Diesel ORM.
//!
//! The insert path is where the exactly-once invariant is enforced: the
//! composite UNIQUE (student_id, session_id) constraint rejects the loser of
//! a concurrent double-mark and this adapter reports that rejection as
//! [`AttendanceRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    AttendanceRepository, AttendanceRepositoryError, LecturerRecordFilter,
};
use crate::domain::{AttendanceRecord, AttendanceRecordDraft};

use super::error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewRecordRow, RecordRow};
use super::pool::{DbPool, PoolError};
use super::schema::attendance_records;

/// Diesel-backed implementation of the attendance repository port.
#[derive(Clone)]
pub struct DieselAttendanceRepository {
    pool: DbPool,
}

impl DieselAttendanceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> AttendanceRepositoryError {
    map_pool_error(error, AttendanceRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> AttendanceRepositoryError {
    map_diesel_error(
        error,
        AttendanceRepositoryError::query,
        AttendanceRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain record.
fn row_to_record(row: RecordRow) -> Result<AttendanceRecord, AttendanceRepositoryError> {
    let RecordRow {
        id,
        school_id,
        student_id,
        student_name,
        lecturer_id,
        lecturer_name,
        session_id,
        course_code,
        course_title,
        date,
        status,
        created_at,
    } = row;

    AttendanceRecord::new(AttendanceRecordDraft {
        id,
        school_id,
        student_id,
        student_name,
        lecturer_id,
        lecturer_name,
        session_id,
        course_code,
        course_title,
        date,
        status,
        created_at,
    })
    .map_err(|err| AttendanceRepositoryError::query(err.to_string()))
}

#[async_trait]
impl AttendanceRepository for DieselAttendanceRepository {
    async fn insert(&self, record: &AttendanceRecord) -> Result<(), AttendanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewRecordRow {
            id: record.id(),
            school_id: record.school_id(),
            student_id: record.student_id(),
            student_name: record.student_name(),
            lecturer_id: record.lecturer_id(),
            lecturer_name: record.lecturer_name(),
            session_id: record.session_id(),
            course_code: record.course_code(),
            course_title: record.course_title(),
            date: record.date(),
            status: record.status(),
            created_at: record.created_at(),
        };

        diesel::insert_into(attendance_records::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    AttendanceRepositoryError::Duplicate
                } else {
                    map_diesel(err)
                }
            })
    }

    async fn find_by_student_and_session(
        &self,
        student_id: &Uuid,
        session_id: &Uuid,
    ) -> Result<Option<AttendanceRecord>, AttendanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = attendance_records::table
            .filter(attendance_records::student_id.eq(student_id))
            .filter(attendance_records::session_id.eq(session_id))
            .select(RecordRow::as_select())
            .first::<RecordRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_record).transpose()
    }

    async fn find_by_id(
        &self,
        record_id: &Uuid,
    ) -> Result<Option<AttendanceRecord>, AttendanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = attendance_records::table
            .filter(attendance_records::id.eq(record_id))
            .select(RecordRow::as_select())
            .first::<RecordRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_record).transpose()
    }

    async fn list_for_student(
        &self,
        school_id: &Uuid,
        student_id: &Uuid,
    ) -> Result<Vec<AttendanceRecord>, AttendanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<RecordRow> = attendance_records::table
            .filter(attendance_records::school_id.eq(school_id))
            .filter(attendance_records::student_id.eq(student_id))
            .order((
                attendance_records::created_at.desc(),
                attendance_records::id.desc(),
            ))
            .select(RecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn list_for_lecturer(
        &self,
        school_id: &Uuid,
        lecturer_id: &Uuid,
        filter: &LecturerRecordFilter,
    ) -> Result<Vec<AttendanceRecord>, AttendanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let mut query = attendance_records::table
            .filter(attendance_records::school_id.eq(school_id))
            .filter(attendance_records::lecturer_id.eq(lecturer_id))
            .select(RecordRow::as_select())
            .into_boxed();

        if let Some(date) = filter.date {
            query = query.filter(attendance_records::date.eq(date));
        }
        if let Some(course_code) = filter.course_code.clone() {
            query = query.filter(attendance_records::course_code.eq(course_code));
        }

        let rows: Vec<RecordRow> = query
            .order((
                attendance_records::created_at.desc(),
                attendance_records::id.desc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn delete(&self, record_id: &Uuid) -> Result<(), AttendanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::delete(attendance_records::table.filter(attendance_records::id.eq(record_id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }
}
