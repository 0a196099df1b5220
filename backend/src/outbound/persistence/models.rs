//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{attendance_records, attendance_sessions};

/// Row struct for reading from the attendance_sessions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = attendance_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub id: Uuid,
    pub school_id: Uuid,
    pub lecturer_id: Uuid,
    pub lecturer_name: String,
    pub course_code: String,
    pub course_title: String,
    pub date: NaiveDate,
    pub session_code: String,
    pub is_active: bool,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new session rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attendance_sessions)]
pub(crate) struct NewSessionRow<'a> {
    pub id: Uuid,
    pub school_id: Uuid,
    pub lecturer_id: Uuid,
    pub lecturer_name: &'a str,
    pub course_code: &'a str,
    pub course_title: &'a str,
    pub date: NaiveDate,
    pub session_code: &'a str,
    pub is_active: bool,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the attendance_records table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = attendance_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecordRow {
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

/// Insertable struct for creating new record rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attendance_records)]
pub(crate) struct NewRecordRow<'a> {
    pub id: Uuid,
    pub school_id: Uuid,
    pub student_id: Uuid,
    pub student_name: &'a str,
    pub lecturer_id: Uuid,
    pub lecturer_name: &'a str,
    pub session_id: Option<Uuid>,
    pub course_code: &'a str,
    pub course_title: &'a str,
    pub date: NaiveDate,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}
