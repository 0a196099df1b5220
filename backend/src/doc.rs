//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: session lifecycle and attendance endpoints from the inbound
//!   layer
//! - **Schemas**: request/response DTOs plus the domain error wrappers
//! - **Security**: session cookie authentication scheme
//!
//! The generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::attendance::{
    AttendanceRecordResponseBody, ListRecordsResponseBody, MarkAttendanceRequestBody,
    SessionStatusResponseBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::sessions::{
    CloseSessionResponseBody, OpenSessionRequestBody, SessionResponseBody,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by the identity service at login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Attendance backend API",
        description = "Session-code attendance marking for multi-tenant schools."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::sessions::open_session,
        crate::inbound::http::sessions::close_session,
        crate::inbound::http::sessions::resolve_session_by_code,
        crate::inbound::http::attendance::mark_attendance,
        crate::inbound::http::attendance::session_status,
        crate::inbound::http::attendance::list_records,
        crate::inbound::http::attendance::delete_record,
    ),
    components(schemas(
        OpenSessionRequestBody,
        SessionResponseBody,
        CloseSessionResponseBody,
        MarkAttendanceRequestBody,
        AttendanceRecordResponseBody,
        SessionStatusResponseBody,
        ListRecordsResponseBody,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "sessions", description = "Lecturer session lifecycle"),
        (name = "attendance", description = "Student redemption and ledger access")
    )
)]
pub struct ApiDoc;
