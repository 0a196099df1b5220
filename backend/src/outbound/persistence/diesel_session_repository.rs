//! PostgreSQL-backed `SessionRepository` implementation using Diesel ORM.
//!
//! Loads rows back through the validated domain constructors so invalid
//! database state surfaces as a repository error instead of a bad entity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{SessionRepository, SessionRepositoryError};
use crate::domain::{AttendanceSession, AttendanceSessionDraft, SessionCode};

use super::error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewSessionRow, SessionRow};
use super::pool::{DbPool, PoolError};
use super::schema::attendance_sessions;

/// Diesel-backed implementation of the session repository port.
#[derive(Clone)]
pub struct DieselSessionRepository {
    pool: DbPool,
}

impl DieselSessionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> SessionRepositoryError {
    map_pool_error(error, SessionRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> SessionRepositoryError {
    map_diesel_error(
        error,
        SessionRepositoryError::query,
        SessionRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain session.
fn row_to_session(row: SessionRow) -> Result<AttendanceSession, SessionRepositoryError> {
    let SessionRow {
        id,
        school_id,
        lecturer_id,
        lecturer_name,
        course_code,
        course_title,
        date,
        session_code,
        is_active,
        closed_at,
        created_at,
    } = row;

    let code = SessionCode::parse(&session_code)
        .map_err(|err| SessionRepositoryError::query(format!("decode session_code: {err}")))?;

    AttendanceSession::new(AttendanceSessionDraft {
        id,
        school_id,
        lecturer_id,
        lecturer_name,
        course_code,
        course_title,
        date,
        code,
        is_active,
        closed_at,
        created_at,
    })
    .map_err(|err| SessionRepositoryError::query(err.to_string()))
}

#[async_trait]
impl SessionRepository for DieselSessionRepository {
    async fn insert(&self, session: &AttendanceSession) -> Result<(), SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewSessionRow {
            id: session.id(),
            school_id: session.school_id(),
            lecturer_id: session.lecturer_id(),
            lecturer_name: session.lecturer_name(),
            course_code: session.course_code(),
            course_title: session.course_title(),
            date: session.date(),
            session_code: session.code().as_str(),
            is_active: session.is_active(),
            closed_at: session.closed_at(),
            created_at: session.created_at(),
        };

        diesel::insert_into(attendance_sessions::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    // The id is a fresh v4, so the only unique column that
                    // can reject here is session_code.
                    SessionRepositoryError::duplicate_code(session.code().as_str())
                } else {
                    map_diesel(err)
                }
            })
    }

    async fn mark_closed(
        &self,
        session_id: &Uuid,
        closed_at: DateTime<Utc>,
    ) -> Result<(), SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::update(attendance_sessions::table.filter(attendance_sessions::id.eq(session_id)))
            .set((
                attendance_sessions::is_active.eq(false),
                attendance_sessions::closed_at.eq(Some(closed_at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn find_by_id(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<AttendanceSession>, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = attendance_sessions::table
            .filter(attendance_sessions::id.eq(session_id))
            .select(SessionRow::as_select())
            .first::<SessionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_session).transpose()
    }

    async fn find_by_code(
        &self,
        code: &SessionCode,
    ) -> Result<Option<AttendanceSession>, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = attendance_sessions::table
            .filter(attendance_sessions::session_code.eq(code.as_str()))
            .select(SessionRow::as_select())
            .first::<SessionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_session).transpose()
    }
}
