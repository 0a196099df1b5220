//! Shared test doubles for integration tests.
//!
//! The in-memory repositories enforce the same uniqueness constraints as
//! the PostgreSQL schema, atomically under a mutex, so concurrency
//! properties can be exercised without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use uuid::Uuid;

use backend::domain::ports::{
    AttendanceRepository, AttendanceRepositoryError, LecturerRecordFilter, SessionRepository,
    SessionRepositoryError,
};
use backend::domain::{AttendanceRecord, AttendanceSession, SessionCode};

/// Clock double with a controllable current instant.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// In-memory session store enforcing code uniqueness atomically.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<Uuid, AttendanceSession>>,
}

impl InMemorySessionRepository {
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, AttendanceSession>> {
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("session store mutex"),
        }
    }

    /// Direct read for assertions.
    pub fn stored(&self, session_id: &Uuid) -> Option<AttendanceSession> {
        self.lock().get(session_id).cloned()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, session: &AttendanceSession) -> Result<(), SessionRepositoryError> {
        let mut sessions = self.lock();
        if sessions
            .values()
            .any(|existing| existing.code() == session.code())
        {
            return Err(SessionRepositoryError::duplicate_code(
                session.code().as_str(),
            ));
        }
        sessions.insert(session.id(), session.clone());
        Ok(())
    }

    async fn mark_closed(
        &self,
        session_id: &Uuid,
        closed_at: DateTime<Utc>,
    ) -> Result<(), SessionRepositoryError> {
        let mut sessions = self.lock();
        if let Some(session) = sessions.get(session_id) {
            let closed = session.close(closed_at);
            sessions.insert(*session_id, closed);
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<AttendanceSession>, SessionRepositoryError> {
        Ok(self.lock().get(session_id).cloned())
    }

    async fn find_by_code(
        &self,
        code: &SessionCode,
    ) -> Result<Option<AttendanceSession>, SessionRepositoryError> {
        Ok(self
            .lock()
            .values()
            .find(|session| session.code() == code)
            .cloned())
    }
}

/// In-memory ledger enforcing the (student, session) constraint atomically.
///
/// The check and the append happen under one lock acquisition, mirroring
/// the atomicity the composite UNIQUE constraint provides in PostgreSQL.
#[derive(Default)]
pub struct InMemoryAttendanceRepository {
    records: Mutex<Vec<AttendanceRecord>>,
}

impl InMemoryAttendanceRepository {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<AttendanceRecord>> {
        match self.records.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("ledger mutex"),
        }
    }

    /// Direct read for assertions.
    pub fn stored(&self) -> Vec<AttendanceRecord> {
        self.lock().clone()
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn insert(&self, record: &AttendanceRecord) -> Result<(), AttendanceRepositoryError> {
        let mut records = self.lock();
        let duplicate = record.session_id().is_some()
            && records.iter().any(|existing| {
                existing.student_id() == record.student_id()
                    && existing.session_id() == record.session_id()
            });
        if duplicate {
            return Err(AttendanceRepositoryError::Duplicate);
        }
        records.push(record.clone());
        Ok(())
    }

    async fn find_by_student_and_session(
        &self,
        student_id: &Uuid,
        session_id: &Uuid,
    ) -> Result<Option<AttendanceRecord>, AttendanceRepositoryError> {
        Ok(self
            .lock()
            .iter()
            .find(|record| {
                record.student_id() == *student_id && record.session_id() == Some(*session_id)
            })
            .cloned())
    }

    async fn find_by_id(
        &self,
        record_id: &Uuid,
    ) -> Result<Option<AttendanceRecord>, AttendanceRepositoryError> {
        Ok(self
            .lock()
            .iter()
            .find(|record| record.id() == *record_id)
            .cloned())
    }

    async fn list_for_student(
        &self,
        school_id: &Uuid,
        student_id: &Uuid,
    ) -> Result<Vec<AttendanceRecord>, AttendanceRepositoryError> {
        let mut records: Vec<AttendanceRecord> = self
            .lock()
            .iter()
            .filter(|record| {
                record.school_id() == *school_id && record.student_id() == *student_id
            })
            .cloned()
            .collect();
        records.sort_by_key(|record| std::cmp::Reverse(record.created_at()));
        Ok(records)
    }

    async fn list_for_lecturer(
        &self,
        school_id: &Uuid,
        lecturer_id: &Uuid,
        filter: &LecturerRecordFilter,
    ) -> Result<Vec<AttendanceRecord>, AttendanceRepositoryError> {
        let mut records: Vec<AttendanceRecord> = self
            .lock()
            .iter()
            .filter(|record| {
                record.school_id() == *school_id
                    && record.lecturer_id() == *lecturer_id
                    && filter.date.is_none_or(|date| record.date() == date)
                    && filter
                        .course_code
                        .as_deref()
                        .is_none_or(|code| record.course_code() == code)
            })
            .cloned()
            .collect();
        records.sort_by_key(|record| std::cmp::Reverse(record.created_at()));
        Ok(records)
    }

    async fn delete(&self, record_id: &Uuid) -> Result<(), AttendanceRepositoryError> {
        self.lock().retain(|record| record.id() != *record_id);
        Ok(())
    }
}
