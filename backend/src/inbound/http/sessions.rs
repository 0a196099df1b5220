//! Session lifecycle HTTP handlers.
//!
//! ```text
//! POST /api/v1/sessions
//! POST /api/v1/sessions/{session_id}/close
//! GET  /api/v1/sessions/by-code/{code}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    CloseSessionRequest, OpenSessionRequest, ResolveSessionRequest, SessionPayload,
};
use crate::domain::Role;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date, parse_uuid, require_text};

/// Request payload for opening an attendance session.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionRequestBody {
    #[schema(example = "CS101")]
    pub course_code: String,
    #[schema(example = "Intro to CS")]
    pub course_title: String,
    /// Calendar date the window covers.
    #[schema(format = "date", example = "2025-01-10")]
    pub date: String,
}

/// Response payload describing one attendance session.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    /// The code students enter to mark presence.
    #[schema(example = "S-7F3A2B")]
    pub session_code: String,
    pub course_code: String,
    pub course_title: String,
    #[schema(format = "date")]
    pub date: String,
    pub is_active: bool,
    #[schema(format = "date-time")]
    pub closed_at: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<SessionPayload> for SessionResponseBody {
    fn from(session: SessionPayload) -> Self {
        Self {
            id: session.id.to_string(),
            session_code: session.code.to_string(),
            course_code: session.course_code,
            course_title: session.course_title,
            date: session.date.to_string(),
            is_active: session.is_active,
            closed_at: session.closed_at.map(|at| at.to_rfc3339()),
            created_at: session.created_at.to_rfc3339(),
        }
    }
}

/// Response payload for closing a session.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloseSessionResponseBody {
    #[schema(example = "Session closed")]
    pub message: String,
}

/// Open a new attendance session for the authenticated lecturer.
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    request_body = OpenSessionRequestBody,
    responses(
        (status = 200, description = "Session opened", body = SessionResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "openSession",
    security(("SessionCookie" = []))
)]
#[post("/sessions")]
pub async fn open_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<OpenSessionRequestBody>,
) -> ApiResult<web::Json<SessionResponseBody>> {
    let lecturer = session.require_lecturer()?;
    let body = payload.into_inner();

    let response = state
        .session_lifecycle
        .open_session(OpenSessionRequest {
            lecturer_id: lecturer.id,
            school_id: lecturer.school_id,
            lecturer_name: lecturer.display_name,
            course_code: require_text(body.course_code, FieldName::new("courseCode"))?,
            course_title: require_text(body.course_title, FieldName::new("courseTitle"))?,
            date: parse_date(&body.date, FieldName::new("date"))?,
        })
        .await?;

    Ok(web::Json(SessionResponseBody::from(response.session)))
}

/// Close an attendance session owned by the authenticated lecturer.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{session_id}/close",
    params(
        ("session_id" = String, Path, description = "Session to close", format = "uuid")
    ),
    responses(
        (status = 200, description = "Session closed", body = CloseSessionResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown session", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "closeSession",
    security(("SessionCookie" = []))
)]
#[post("/sessions/{session_id}/close")]
pub async fn close_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CloseSessionResponseBody>> {
    let lecturer = session.require_lecturer()?;
    let session_id = parse_uuid(&path.into_inner(), FieldName::new("sessionId"))?;

    let response = state
        .session_lifecycle
        .close_session(CloseSessionRequest {
            session_id,
            lecturer_id: lecturer.id,
            school_id: lecturer.school_id,
        })
        .await?;

    let message = if response.already_closed {
        "Session was already closed".to_owned()
    } else {
        "Session closed".to_owned()
    };
    Ok(web::Json(CloseSessionResponseBody { message }))
}

/// Resolve a session by code, regardless of lifecycle state.
///
/// Serves lecturer and admin tooling that inspects historical sessions;
/// students go through the redemption endpoint instead.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/by-code/{code}",
    params(
        ("code" = String, Path, description = "Session code, case-insensitive", example = "S-7F3A2B")
    ),
    responses(
        (status = 200, description = "Session found", body = SessionResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown code", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "resolveSessionByCode",
    security(("SessionCookie" = []))
)]
#[get("/sessions/by-code/{code}")]
pub async fn resolve_session_by_code(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SessionResponseBody>> {
    let principal = session.require_principal()?;
    if principal.role == Role::Student {
        return Err(crate::domain::Error::forbidden(
            "students redeem codes through attendance marking",
        ));
    }

    let response = state
        .session_lookup
        .resolve_by_code(ResolveSessionRequest {
            code: path.into_inner(),
            school_id: principal.school_id,
        })
        .await?;

    Ok(web::Json(SessionResponseBody::from(response.session)))
}

#[cfg(test)]
#[path = "sessions_tests.rs"]
mod tests;
