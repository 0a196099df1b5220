//! Session lifecycle domain service.
//!
//! Owns the Active → Closed state machine and code allocation. Expiration is
//! not managed here: it is derived from the session date at read time by the
//! redemption protocol.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    CloseSessionRequest, CloseSessionResponse, OpenSessionRequest, OpenSessionResponse,
    ResolveSessionRequest, ResolveSessionResponse, SessionLifecycleCommand, SessionLifecycleQuery,
    SessionRepository, SessionRepositoryError,
};
use crate::domain::{
    AttendanceSession, AttendanceSessionDraft, Error, SessionCode,
};

/// Bounded retries when a generated code collides at persistence time.
///
/// The six-hex-digit space makes collisions rare but not impossible; the
/// storage constraint detects them and a fresh draw almost certainly
/// resolves them.
const MAX_CODE_ATTEMPTS: u32 = 5;

fn map_repository_error(error: SessionRepositoryError) -> Error {
    match error {
        SessionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("session repository unavailable: {message}"))
        }
        SessionRepositoryError::Query { message } => {
            Error::internal(format!("session repository error: {message}"))
        }
        SessionRepositoryError::DuplicateCode { code } => {
            // Collisions are retried inside open_session; reaching here means
            // the retry budget is spent.
            Error::internal(format!("session code allocation exhausted at {code}"))
        }
    }
}

/// Session lifecycle service implementing the command and query ports.
#[derive(Clone)]
pub struct SessionLifecycleService<R> {
    sessions: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> SessionLifecycleService<R> {
    /// Create a new service over the session repository.
    pub fn new(sessions: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { sessions, clock }
    }
}

impl<R> SessionLifecycleService<R>
where
    R: SessionRepository,
{
    fn draft_session(&self, request: &OpenSessionRequest) -> AttendanceSessionDraft {
        AttendanceSessionDraft {
            id: Uuid::new_v4(),
            school_id: request.school_id,
            lecturer_id: request.lecturer_id,
            lecturer_name: request.lecturer_name.clone(),
            course_code: request.course_code.clone(),
            course_title: request.course_title.clone(),
            date: request.date,
            code: SessionCode::generate(),
            is_active: true,
            closed_at: None,
            created_at: self.clock.utc(),
        }
    }
}

#[async_trait]
impl<R> SessionLifecycleCommand for SessionLifecycleService<R>
where
    R: SessionRepository,
{
    async fn open_session(
        &self,
        request: OpenSessionRequest,
    ) -> Result<OpenSessionResponse, Error> {
        let mut last_collision: Option<SessionRepositoryError> = None;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let session = AttendanceSession::new(self.draft_session(&request))
                .map_err(|err| Error::invalid_request(format!("invalid session: {err}")))?;

            match self.sessions.insert(&session).await {
                Ok(()) => {
                    info!(
                        session_id = %session.id(),
                        code = %session.code(),
                        course = session.course_code(),
                        "attendance session opened"
                    );
                    return Ok(OpenSessionResponse {
                        session: session.into(),
                    });
                }
                Err(SessionRepositoryError::DuplicateCode { code }) => {
                    warn!(%code, attempt, "session code collision, regenerating");
                    last_collision = Some(SessionRepositoryError::DuplicateCode { code });
                }
                Err(other) => return Err(map_repository_error(other)),
            }
        }

        Err(map_repository_error(last_collision.unwrap_or_else(|| {
            SessionRepositoryError::query("code allocation failed without a collision")
        })))
    }

    async fn close_session(
        &self,
        request: CloseSessionRequest,
    ) -> Result<CloseSessionResponse, Error> {
        let session = self
            .sessions
            .find_by_id(&request.session_id)
            .await
            .map_err(map_repository_error)?
            .filter(|session| session.school_id() == request.school_id)
            .ok_or_else(|| Error::not_found("attendance session not found"))?;

        if session.lecturer_id() != request.lecturer_id {
            return Err(Error::forbidden("only the owning lecturer may close a session"));
        }

        if !session.is_active() {
            // Terminal state already reached; report success without
            // rewriting closed_at so the original closure time survives.
            return Ok(CloseSessionResponse {
                session: session.into(),
                already_closed: true,
            });
        }

        let closed_at = self.clock.utc();
        let closed = session.close(closed_at);
        self.sessions
            .mark_closed(&closed.id(), closed_at)
            .await
            .map_err(map_repository_error)?;

        info!(session_id = %closed.id(), "attendance session closed");
        Ok(CloseSessionResponse {
            session: closed.into(),
            already_closed: false,
        })
    }
}

#[async_trait]
impl<R> SessionLifecycleQuery for SessionLifecycleService<R>
where
    R: SessionRepository,
{
    async fn resolve_by_code(
        &self,
        request: ResolveSessionRequest,
    ) -> Result<ResolveSessionResponse, Error> {
        let code = SessionCode::parse(&request.code)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let session = self
            .sessions
            .find_by_code(&code)
            .await
            .map_err(map_repository_error)?
            // A code from another school resolves as unknown rather than
            // leaking the session's existence across tenants.
            .filter(|session| session.school_id() == request.school_id)
            .ok_or_else(|| Error::not_found("unknown session code"))?;

        Ok(ResolveSessionResponse {
            session: session.into(),
        })
    }
}

#[cfg(test)]
#[path = "session_lifecycle_service_tests.rs"]
mod tests;
