//! Driven port for attendance session persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{AttendanceSession, SessionCode};

/// Errors raised by session repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionRepositoryError {
    /// Repository connection could not be established.
    #[error("session repository connection failed: {message}")]
    Connection {
        /// Adapter-level description, never shown to clients.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("session repository query failed: {message}")]
    Query {
        /// Adapter-level description, never shown to clients.
        message: String,
    },
    /// The `session_code` uniqueness constraint rejected an insert.
    ///
    /// Codes are never reused, even after closure, so the constraint spans
    /// the whole history of the table. Callers regenerate and retry.
    #[error("session code {code} is already allocated")]
    DuplicateCode {
        /// The colliding code.
        code: String,
    },
}

impl SessionRepositoryError {
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

    /// Create a duplicate-code error for the given code.
    pub fn duplicate_code(code: impl Into<String>) -> Self {
        Self::DuplicateCode { code: code.into() }
    }
}

/// Port for writing and resolving attendance sessions.
///
/// Sessions are never deleted; the only mutation after insert is the
/// Active → Closed transition.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a freshly opened session.
    ///
    /// Fails with [`SessionRepositoryError::DuplicateCode`] when the code
    /// collides with any session ever persisted.
    async fn insert(&self, session: &AttendanceSession) -> Result<(), SessionRepositoryError>;

    /// Persist the closure of a session (sets `is_active` and `closed_at`).
    async fn mark_closed(
        &self,
        session_id: &Uuid,
        closed_at: DateTime<Utc>,
    ) -> Result<(), SessionRepositoryError>;

    /// Find a session by id.
    async fn find_by_id(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<AttendanceSession>, SessionRepositoryError>;

    /// Find a session by its unique code, regardless of state.
    ///
    /// Callers own validity checks; historical and closed sessions resolve
    /// too so that admin tooling can inspect them.
    async fn find_by_code(
        &self,
        code: &SessionCode,
    ) -> Result<Option<AttendanceSession>, SessionRepositoryError>;
}

/// Fixture implementation for tests that do not exercise session persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSessionRepository;

#[async_trait]
impl SessionRepository for FixtureSessionRepository {
    async fn insert(&self, _session: &AttendanceSession) -> Result<(), SessionRepositoryError> {
        Ok(())
    }

    async fn mark_closed(
        &self,
        _session_id: &Uuid,
        _closed_at: DateTime<Utc>,
    ) -> Result<(), SessionRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _session_id: &Uuid,
    ) -> Result<Option<AttendanceSession>, SessionRepositoryError> {
        Ok(None)
    }

    async fn find_by_code(
        &self,
        _code: &SessionCode,
    ) -> Result<Option<AttendanceSession>, SessionRepositoryError> {
        Ok(None)
    }
}
