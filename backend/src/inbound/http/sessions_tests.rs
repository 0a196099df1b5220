//! Tests for session lifecycle HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test, web};
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    CloseSessionResponse, OpenSessionResponse, ResolveSessionResponse, SessionLifecycleCommand,
    SessionLifecycleQuery,
};
use crate::domain::{Error, Principal, SessionCode};
use crate::inbound::http::state::HttpStatePorts;

fn sample_payload(request: &OpenSessionRequest) -> SessionPayload {
    SessionPayload {
        id: Uuid::new_v4(),
        school_id: request.school_id,
        lecturer_id: request.lecturer_id,
        lecturer_name: request.lecturer_name.clone(),
        course_code: request.course_code.clone(),
        course_title: request.course_title.clone(),
        date: request.date,
        code: SessionCode::parse("S-7F3A2B").expect("valid code"),
        is_active: true,
        closed_at: None,
        created_at: Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).single().expect("valid instant"),
    }
}

/// Stub lifecycle ports returning canned data.
struct StubLifecycle {
    known_session: Uuid,
}

#[async_trait]
impl SessionLifecycleCommand for StubLifecycle {
    async fn open_session(
        &self,
        request: OpenSessionRequest,
    ) -> Result<OpenSessionResponse, Error> {
        Ok(OpenSessionResponse {
            session: sample_payload(&request),
        })
    }

    async fn close_session(
        &self,
        request: CloseSessionRequest,
    ) -> Result<CloseSessionResponse, Error> {
        if request.session_id != self.known_session {
            return Err(Error::not_found("attendance session not found"));
        }
        let mut session = sample_payload(&OpenSessionRequest {
            lecturer_id: request.lecturer_id,
            school_id: request.school_id,
            lecturer_name: "Dr. Amina Sall".to_owned(),
            course_code: "CS101".to_owned(),
            course_title: "Intro to CS".to_owned(),
            date: NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date"),
        });
        session.is_active = false;
        session.closed_at = Utc.with_ymd_and_hms(2025, 1, 10, 11, 0, 0).single();
        Ok(CloseSessionResponse {
            session,
            already_closed: false,
        })
    }
}

#[async_trait]
impl SessionLifecycleQuery for StubLifecycle {
    async fn resolve_by_code(
        &self,
        request: ResolveSessionRequest,
    ) -> Result<ResolveSessionResponse, Error> {
        if request.code.to_uppercase() != "S-7F3A2B" {
            return Err(Error::not_found("unknown session code"));
        }
        Ok(ResolveSessionResponse {
            session: sample_payload(&OpenSessionRequest {
                lecturer_id: Uuid::new_v4(),
                school_id: request.school_id,
                lecturer_name: "Dr. Amina Sall".to_owned(),
                course_code: "CS101".to_owned(),
                course_title: "Intro to CS".to_owned(),
                date: NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date"),
            }),
        })
    }
}

fn test_state(known_session: Uuid) -> HttpState {
    let lifecycle = Arc::new(StubLifecycle { known_session });
    HttpState::new(HttpStatePorts {
        session_lifecycle: lifecycle.clone(),
        session_lookup: lifecycle,
        ..HttpStatePorts::default()
    })
}

async fn login_cookie<S>(app: &S) -> actix_web::cookie::Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let res = test::call_service(app, test::TestRequest::get().uri("/login").to_request()).await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

fn test_app(
    state: HttpState,
    principal: Principal,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(crate::inbound::http::test_utils::test_session_middleware())
        .app_data(web::Data::new(state))
        .route(
            "/login",
            web::get().to(move |session: SessionContext| {
                let principal = principal.clone();
                async move {
                    session.persist_principal(&principal)?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }
            }),
        )
        .service(open_session)
        .service(close_session)
        .service(resolve_session_by_code)
}

fn lecturer() -> Principal {
    Principal {
        id: Uuid::new_v4(),
        role: crate::domain::Role::Lecturer,
        school_id: Uuid::new_v4(),
        display_name: "Dr. Amina Sall".to_owned(),
    }
}

fn student() -> Principal {
    Principal {
        id: Uuid::new_v4(),
        role: crate::domain::Role::Student,
        school_id: Uuid::new_v4(),
        display_name: "Kofi Mensah".to_owned(),
    }
}

#[actix_web::test]
async fn open_session_returns_the_generated_code() {
    let principal = lecturer();
    let app =
        test::init_service(test_app(test_state(Uuid::new_v4()), principal.clone())).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/sessions")
            .cookie(cookie)
            .set_json(serde_json::json!({
                "courseCode": "CS101",
                "courseTitle": "Intro to CS",
                "date": "2025-01-10",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["sessionCode"], "S-7F3A2B");
    assert_eq!(body["courseCode"], "CS101");
    assert_eq!(body["isActive"], true);
}

#[actix_web::test]
async fn open_session_rejects_students() {
    let principal = student();
    let app =
        test::init_service(test_app(test_state(Uuid::new_v4()), principal.clone())).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/sessions")
            .cookie(cookie)
            .set_json(serde_json::json!({
                "courseCode": "CS101",
                "courseTitle": "Intro to CS",
                "date": "2025-01-10",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn open_session_rejects_malformed_dates() {
    let principal = lecturer();
    let app =
        test::init_service(test_app(test_state(Uuid::new_v4()), principal.clone())).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/sessions")
            .cookie(cookie)
            .set_json(serde_json::json!({
                "courseCode": "CS101",
                "courseTitle": "Intro to CS",
                "date": "tomorrow",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "date");
}

#[actix_web::test]
async fn close_session_reports_success_message() {
    let known_session = Uuid::new_v4();
    let principal = lecturer();
    let app = test::init_service(test_app(test_state(known_session), principal.clone())).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/sessions/{known_session}/close"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Session closed");
}

#[actix_web::test]
async fn close_session_maps_unknown_sessions_to_404() {
    let principal = lecturer();
    let app =
        test::init_service(test_app(test_state(Uuid::new_v4()), principal.clone())).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/sessions/{}/close", Uuid::new_v4()))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn resolve_by_code_is_not_for_students() {
    let principal = student();
    let app =
        test::init_service(test_app(test_state(Uuid::new_v4()), principal.clone())).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/sessions/by-code/S-7F3A2B")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn resolve_by_code_returns_closed_sessions_too() {
    let principal = lecturer();
    let app =
        test::init_service(test_app(test_state(Uuid::new_v4()), principal.clone())).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/sessions/by-code/s-7f3a2b")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["sessionCode"], "S-7F3A2B");
}
