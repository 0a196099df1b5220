//! Attendance marking and ledger HTTP handlers.
//!
//! ```text
//! POST   /api/v1/attendance/mark
//! GET    /api/v1/sessions/{session_id}/status
//! GET    /api/v1/attendance/records
//! DELETE /api/v1/attendance/records/{record_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    AttendanceRecordPayload, DeleteRecordRequest, ListLecturerRecordsRequest,
    ListStudentRecordsRequest, MarkAttendanceRequest, SessionStatusRequest,
};
use crate::domain::{Error, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_optional_date, parse_uuid, require_text,
};

/// Request payload for redeeming a session code.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequestBody {
    /// The code shown by the lecturer; case-insensitive.
    #[schema(example = "S-7F3A2B")]
    pub code: String,
}

/// Response payload describing one attendance record.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub session_id: Option<String>,
    #[schema(format = "uuid")]
    pub student_id: String,
    pub student_name: String,
    pub lecturer_name: String,
    pub course_code: String,
    pub course_title: String,
    #[schema(format = "date")]
    pub date: String,
    #[schema(example = "present")]
    pub status: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<AttendanceRecordPayload> for AttendanceRecordResponseBody {
    fn from(record: AttendanceRecordPayload) -> Self {
        Self {
            id: record.id.to_string(),
            session_id: record.session_id.map(|id| id.to_string()),
            student_id: record.student_id.to_string(),
            student_name: record.student_name,
            lecturer_name: record.lecturer_name,
            course_code: record.course_code,
            course_title: record.course_title,
            date: record.date.to_string(),
            status: record.status,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Response payload for a student's marked state on one session.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponseBody {
    pub marked: bool,
}

/// Response payload for record listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListRecordsResponseBody {
    pub records: Vec<AttendanceRecordResponseBody>,
}

/// Query filters for record listings; lecturers only.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RecordsQuery {
    /// Restrict to one calendar date (`YYYY-MM-DD`).
    pub date: Option<String>,
    /// Restrict to one snapshotted course code.
    pub course_code: Option<String>,
}

/// Redeem a session code as the authenticated student.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/mark",
    request_body = MarkAttendanceRequestBody,
    responses(
        (status = 200, description = "Attendance marked", body = AttendanceRecordResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Unknown code", body = ErrorSchema),
        (status = 409, description = "Already marked", body = ErrorSchema),
        (status = 410, description = "Session expired", body = ErrorSchema)
    ),
    tags = ["attendance"],
    operation_id = "markAttendance",
    security(("SessionCookie" = []))
)]
#[post("/attendance/mark")]
pub async fn mark_attendance(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MarkAttendanceRequestBody>,
) -> ApiResult<web::Json<AttendanceRecordResponseBody>> {
    let student = session.require_student()?;
    let code = require_text(payload.into_inner().code, FieldName::new("code"))?;

    let response = state
        .redemption
        .mark_attendance(MarkAttendanceRequest {
            code,
            student_id: student.id,
            school_id: student.school_id,
            student_name: student.display_name,
        })
        .await?;

    Ok(web::Json(AttendanceRecordResponseBody::from(
        response.record,
    )))
}

/// Whether the authenticated student has marked the given session.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{session_id}/status",
    params(
        ("session_id" = String, Path, description = "Session to check", format = "uuid")
    ),
    responses(
        (status = 200, description = "Marked state", body = SessionStatusResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["attendance"],
    operation_id = "sessionStatus",
    security(("SessionCookie" = []))
)]
#[get("/sessions/{session_id}/status")]
pub async fn session_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SessionStatusResponseBody>> {
    let student = session.require_student()?;
    let session_id = parse_uuid(&path.into_inner(), FieldName::new("sessionId"))?;

    let response = state
        .redemption_status
        .session_status(SessionStatusRequest {
            session_id,
            student_id: student.id,
            school_id: student.school_id,
        })
        .await?;

    Ok(web::Json(SessionStatusResponseBody {
        marked: response.marked,
    }))
}

/// List attendance records scoped to the caller.
///
/// Lecturers see the records they own, optionally filtered by date and
/// course; students see their own history and the filters are ignored.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/records",
    params(RecordsQuery),
    responses(
        (status = 200, description = "Matching records", body = ListRecordsResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["attendance"],
    operation_id = "listAttendanceRecords",
    security(("SessionCookie" = []))
)]
#[get("/attendance/records")]
pub async fn list_records(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RecordsQuery>,
) -> ApiResult<web::Json<ListRecordsResponseBody>> {
    let principal = session.require_principal()?;
    let filters = query.into_inner();

    let response = match principal.role {
        Role::Student => {
            state
                .ledger
                .list_for_student(ListStudentRecordsRequest {
                    student_id: principal.id,
                    school_id: principal.school_id,
                })
                .await?
        }
        Role::Lecturer => {
            state
                .ledger
                .list_for_lecturer(ListLecturerRecordsRequest {
                    lecturer_id: principal.id,
                    school_id: principal.school_id,
                    date: parse_optional_date(filters.date, FieldName::new("date"))?,
                    course_code: filters.course_code,
                })
                .await?
        }
        Role::Admin => {
            return Err(Error::forbidden(
                "record listings are scoped to students and lecturers",
            ));
        }
    };

    Ok(web::Json(ListRecordsResponseBody {
        records: response.records.into_iter().map(Into::into).collect(),
    }))
}

/// Hard-delete one attendance record owned by the authenticated lecturer.
#[utoipa::path(
    delete,
    path = "/api/v1/attendance/records/{record_id}",
    params(
        ("record_id" = String, Path, description = "Record to delete", format = "uuid")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown record", body = ErrorSchema)
    ),
    tags = ["attendance"],
    operation_id = "deleteAttendanceRecord",
    security(("SessionCookie" = []))
)]
#[delete("/attendance/records/{record_id}")]
pub async fn delete_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let lecturer = session.require_lecturer()?;
    let record_id = parse_uuid(&path.into_inner(), FieldName::new("recordId"))?;

    state
        .ledger_admin
        .delete_record(DeleteRecordRequest {
            record_id,
            lecturer_id: lecturer.id,
            school_id: lecturer.school_id,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "attendance_tests.rs"]
mod tests;
