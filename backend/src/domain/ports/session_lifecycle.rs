//! Driving ports for the session lifecycle manager.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{AttendanceSession, Error, SessionCode};

/// Transport-friendly projection of an [`AttendanceSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPayload {
    pub id: Uuid,
    pub school_id: Uuid,
    pub lecturer_id: Uuid,
    pub lecturer_name: String,
    pub course_code: String,
    pub course_title: String,
    pub date: NaiveDate,
    pub code: SessionCode,
    pub is_active: bool,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<AttendanceSession> for SessionPayload {
    fn from(session: AttendanceSession) -> Self {
        Self {
            id: session.id(),
            school_id: session.school_id(),
            lecturer_id: session.lecturer_id(),
            lecturer_name: session.lecturer_name().to_owned(),
            course_code: session.course_code().to_owned(),
            course_title: session.course_title().to_owned(),
            date: session.date(),
            code: session.code().clone(),
            is_active: session.is_active(),
            closed_at: session.closed_at(),
            created_at: session.created_at(),
        }
    }
}

/// Request to open a new attendance session.
#[derive(Debug, Clone)]
pub struct OpenSessionRequest {
    /// The lecturer opening the window.
    pub lecturer_id: Uuid,
    /// Tenant the session belongs to.
    pub school_id: Uuid,
    /// Lecturer display name, snapshotted onto the session.
    pub lecturer_name: String,
    pub course_code: String,
    pub course_title: String,
    /// Calendar date the window covers; immutable afterwards.
    pub date: NaiveDate,
}

/// Response for [`SessionLifecycleCommand::open_session`].
#[derive(Debug, Clone)]
pub struct OpenSessionResponse {
    /// The freshly persisted session, including its generated code.
    pub session: SessionPayload,
}

/// Request to close an attendance session.
#[derive(Debug, Clone)]
pub struct CloseSessionRequest {
    pub session_id: Uuid,
    /// The caller; must own the session.
    pub lecturer_id: Uuid,
    pub school_id: Uuid,
}

/// Response for [`SessionLifecycleCommand::close_session`].
#[derive(Debug, Clone)]
pub struct CloseSessionResponse {
    /// The session after closure.
    pub session: SessionPayload,
    /// True when the session was already closed and the call was a no-op.
    pub already_closed: bool,
}

/// Request to resolve a session by its code.
#[derive(Debug, Clone)]
pub struct ResolveSessionRequest {
    /// Raw code as entered by the caller; normalised before lookup.
    pub code: String,
    pub school_id: Uuid,
}

/// Response for [`SessionLifecycleQuery::resolve_by_code`].
#[derive(Debug, Clone)]
pub struct ResolveSessionResponse {
    pub session: SessionPayload,
}

/// Commands mutating session lifecycle state.
#[async_trait]
pub trait SessionLifecycleCommand: Send + Sync {
    /// Open a new session with a freshly generated unique code.
    async fn open_session(&self, request: OpenSessionRequest)
    -> Result<OpenSessionResponse, Error>;

    /// Close a session; terminal, idempotent for the owning lecturer.
    async fn close_session(
        &self,
        request: CloseSessionRequest,
    ) -> Result<CloseSessionResponse, Error>;
}

/// Queries over session lifecycle state.
///
/// Resolution deliberately ignores active/expired status: validity checks
/// belong to the redemption protocol, and other callers (admin tooling)
/// need to fetch historical sessions by code.
#[async_trait]
pub trait SessionLifecycleQuery: Send + Sync {
    /// Resolve a session by code, regardless of its state.
    async fn resolve_by_code(
        &self,
        request: ResolveSessionRequest,
    ) -> Result<ResolveSessionResponse, Error>;
}

/// Fixture for wiring the HTTP adapter without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSessionLifecycle;

#[async_trait]
impl SessionLifecycleCommand for FixtureSessionLifecycle {
    async fn open_session(
        &self,
        _request: OpenSessionRequest,
    ) -> Result<OpenSessionResponse, Error> {
        Err(Error::service_unavailable("session lifecycle not configured"))
    }

    async fn close_session(
        &self,
        _request: CloseSessionRequest,
    ) -> Result<CloseSessionResponse, Error> {
        Err(Error::service_unavailable("session lifecycle not configured"))
    }
}

#[async_trait]
impl SessionLifecycleQuery for FixtureSessionLifecycle {
    async fn resolve_by_code(
        &self,
        _request: ResolveSessionRequest,
    ) -> Result<ResolveSessionResponse, Error> {
        Err(Error::service_unavailable("session lifecycle not configured"))
    }
}
