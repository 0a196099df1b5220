//! Tests for the session lifecycle service.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use mockable::MockClock;
use mockall::predicate;
use uuid::Uuid;

use super::*;
use crate::domain::ports::MockSessionRepository;
use crate::domain::ErrorCode;

fn fixed_clock() -> Arc<MockClock> {
    let mut clock = MockClock::new();
    clock
        .expect_utc()
        .returning(|| Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).single().expect("valid instant"));
    Arc::new(clock)
}

fn open_request() -> OpenSessionRequest {
    OpenSessionRequest {
        lecturer_id: Uuid::new_v4(),
        school_id: Uuid::new_v4(),
        lecturer_name: "Dr. Amina Sall".to_owned(),
        course_code: "CS101".to_owned(),
        course_title: "Intro to CS".to_owned(),
        date: NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date"),
    }
}

fn stored_session(lecturer_id: Uuid, school_id: Uuid, is_active: bool) -> AttendanceSession {
    let closed_at = (!is_active)
        .then(|| Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).single())
        .flatten();
    AttendanceSession::new(AttendanceSessionDraft {
        id: Uuid::new_v4(),
        school_id,
        lecturer_id,
        lecturer_name: "Dr. Amina Sall".to_owned(),
        course_code: "CS101".to_owned(),
        course_title: "Intro to CS".to_owned(),
        date: NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date"),
        code: SessionCode::generate(),
        is_active,
        closed_at,
        created_at: Utc.with_ymd_and_hms(2025, 1, 10, 7, 0, 0).single().expect("valid instant"),
    })
    .expect("valid session")
}

#[tokio::test]
async fn open_session_persists_and_returns_a_code() {
    let request = open_request();
    let lecturer_id = request.lecturer_id;

    let mut repo = MockSessionRepository::new();
    repo.expect_insert().times(1).returning(|_| Ok(()));

    let service = SessionLifecycleService::new(Arc::new(repo), fixed_clock());
    let response = service
        .open_session(request)
        .await
        .expect("open session succeeds");

    assert!(response.session.is_active);
    assert_eq!(response.session.lecturer_id, lecturer_id);
    assert!(response.session.code.as_str().starts_with("S-"));
    assert_eq!(response.session.closed_at, None);
}

#[tokio::test]
async fn open_session_rejects_blank_course_fields() {
    let mut request = open_request();
    request.course_code = "   ".to_owned();

    let mut repo = MockSessionRepository::new();
    repo.expect_insert().times(0);

    let service = SessionLifecycleService::new(Arc::new(repo), fixed_clock());
    let error = service
        .open_session(request)
        .await
        .expect_err("blank course code is invalid");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn open_session_retries_on_code_collision() {
    let mut repo = MockSessionRepository::new();
    let mut collisions = 2;
    repo.expect_insert().times(3).returning(move |session| {
        if collisions > 0 {
            collisions -= 1;
            Err(SessionRepositoryError::duplicate_code(
                session.code().as_str(),
            ))
        } else {
            Ok(())
        }
    });

    let service = SessionLifecycleService::new(Arc::new(repo), fixed_clock());
    let response = service
        .open_session(open_request())
        .await
        .expect("third attempt succeeds");

    assert!(response.session.is_active);
}

#[tokio::test]
async fn open_session_gives_up_after_the_retry_budget() {
    let mut repo = MockSessionRepository::new();
    repo.expect_insert().times(5).returning(|session| {
        Err(SessionRepositoryError::duplicate_code(
            session.code().as_str(),
        ))
    });

    let service = SessionLifecycleService::new(Arc::new(repo), fixed_clock());
    let error = service
        .open_session(open_request())
        .await
        .expect_err("budget exhausted");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn close_session_marks_active_session_closed() {
    let lecturer_id = Uuid::new_v4();
    let school_id = Uuid::new_v4();
    let session = stored_session(lecturer_id, school_id, true);
    let session_id = session.id();

    let mut repo = MockSessionRepository::new();
    repo.expect_find_by_id()
        .with(predicate::eq(session_id))
        .times(1)
        .return_once(move |_| Ok(Some(session)));
    repo.expect_mark_closed()
        .with(predicate::eq(session_id), predicate::always())
        .times(1)
        .returning(|_, _| Ok(()));

    let service = SessionLifecycleService::new(Arc::new(repo), fixed_clock());
    let response = service
        .close_session(CloseSessionRequest {
            session_id,
            lecturer_id,
            school_id,
        })
        .await
        .expect("close succeeds");

    assert!(!response.session.is_active);
    assert!(response.session.closed_at.is_some());
    assert!(!response.already_closed);
}

#[tokio::test]
async fn close_session_is_idempotent_for_closed_sessions() {
    let lecturer_id = Uuid::new_v4();
    let school_id = Uuid::new_v4();
    let session = stored_session(lecturer_id, school_id, false);
    let session_id = session.id();
    let original_closed_at = session.closed_at();

    let mut repo = MockSessionRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(session)));
    // The terminal state is not rewritten.
    repo.expect_mark_closed().times(0);

    let service = SessionLifecycleService::new(Arc::new(repo), fixed_clock());
    let response = service
        .close_session(CloseSessionRequest {
            session_id,
            lecturer_id,
            school_id,
        })
        .await
        .expect("idempotent close succeeds");

    assert!(response.already_closed);
    assert_eq!(response.session.closed_at, original_closed_at);
}

#[tokio::test]
async fn close_session_requires_the_owning_lecturer() {
    let school_id = Uuid::new_v4();
    let session = stored_session(Uuid::new_v4(), school_id, true);
    let session_id = session.id();

    let mut repo = MockSessionRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(session)));
    repo.expect_mark_closed().times(0);

    let service = SessionLifecycleService::new(Arc::new(repo), fixed_clock());
    let error = service
        .close_session(CloseSessionRequest {
            session_id,
            lecturer_id: Uuid::new_v4(),
            school_id,
        })
        .await
        .expect_err("foreign lecturer is rejected");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn close_session_hides_sessions_from_other_schools() {
    let lecturer_id = Uuid::new_v4();
    let session = stored_session(lecturer_id, Uuid::new_v4(), true);
    let session_id = session.id();

    let mut repo = MockSessionRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(session)));

    let service = SessionLifecycleService::new(Arc::new(repo), fixed_clock());
    let error = service
        .close_session(CloseSessionRequest {
            session_id,
            lecturer_id,
            school_id: Uuid::new_v4(),
        })
        .await
        .expect_err("cross-tenant close is rejected");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn resolve_by_code_ignores_lifecycle_state() {
    let school_id = Uuid::new_v4();
    let session = stored_session(Uuid::new_v4(), school_id, false);
    let code = session.code().clone();

    let mut repo = MockSessionRepository::new();
    repo.expect_find_by_code()
        .with(predicate::eq(code.clone()))
        .times(1)
        .return_once(move |_| Ok(Some(session)));

    let service = SessionLifecycleService::new(Arc::new(repo), fixed_clock());
    let response = service
        .resolve_by_code(ResolveSessionRequest {
            code: code.as_str().to_lowercase(),
            school_id,
        })
        .await
        .expect("closed sessions still resolve");

    assert!(!response.session.is_active);
}

#[tokio::test]
async fn resolve_by_code_reports_unknown_codes() {
    let mut repo = MockSessionRepository::new();
    repo.expect_find_by_code().times(1).return_once(|_| Ok(None));

    let service = SessionLifecycleService::new(Arc::new(repo), fixed_clock());
    let error = service
        .resolve_by_code(ResolveSessionRequest {
            code: "S-000000".to_owned(),
            school_id: Uuid::new_v4(),
        })
        .await
        .expect_err("unknown code");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn resolve_by_code_maps_connection_failures() {
    let mut repo = MockSessionRepository::new();
    repo.expect_find_by_code()
        .times(1)
        .return_once(|_| Err(SessionRepositoryError::connection("pool unavailable")));

    let service = SessionLifecycleService::new(Arc::new(repo), fixed_clock());
    let error = service
        .resolve_by_code(ResolveSessionRequest {
            code: "S-7F3A2B".to_owned(),
            school_id: Uuid::new_v4(),
        })
        .await
        .expect_err("service unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
