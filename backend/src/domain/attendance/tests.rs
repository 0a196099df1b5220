//! Regression coverage for attendance entities.

use chrono::{NaiveDate, Utc};
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::SessionCode;

fn session_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date")
}

#[fixture]
fn session_draft() -> AttendanceSessionDraft {
    AttendanceSessionDraft {
        id: Uuid::new_v4(),
        school_id: Uuid::new_v4(),
        lecturer_id: Uuid::new_v4(),
        lecturer_name: "Dr. Amina Sall".to_owned(),
        course_code: "CS101".to_owned(),
        course_title: "Intro to CS".to_owned(),
        date: session_date(),
        code: SessionCode::generate(),
        is_active: true,
        closed_at: None,
        created_at: Utc::now(),
    }
}

#[fixture]
fn record_draft() -> AttendanceRecordDraft {
    AttendanceRecordDraft {
        id: Uuid::new_v4(),
        school_id: Uuid::new_v4(),
        student_id: Uuid::new_v4(),
        student_name: "Kofi Mensah".to_owned(),
        lecturer_id: Uuid::new_v4(),
        lecturer_name: "Dr. Amina Sall".to_owned(),
        session_id: Some(Uuid::new_v4()),
        course_code: "CS101".to_owned(),
        course_title: "Intro to CS".to_owned(),
        date: session_date(),
        status: "present".to_owned(),
        created_at: Utc::now(),
    }
}

#[rstest]
fn session_constructor_trims_snapshot_fields(mut session_draft: AttendanceSessionDraft) {
    session_draft.course_code = "  CS101 ".to_owned();
    session_draft.lecturer_name = " Dr. Amina Sall ".to_owned();

    let session = AttendanceSession::new(session_draft).expect("valid draft");
    assert_eq!(session.course_code(), "CS101");
    assert_eq!(session.lecturer_name(), "Dr. Amina Sall");
}

#[rstest]
#[case("", AttendanceValidationError::InvalidCourseCode)]
#[case("   ", AttendanceValidationError::InvalidCourseCode)]
fn session_constructor_rejects_blank_course_code(
    mut session_draft: AttendanceSessionDraft,
    #[case] code: &str,
    #[case] expected: AttendanceValidationError,
) {
    session_draft.course_code = code.to_owned();
    assert_eq!(AttendanceSession::new(session_draft), Err(expected));
}

#[rstest]
fn session_constructor_rejects_blank_title(mut session_draft: AttendanceSessionDraft) {
    session_draft.course_title = String::new();
    assert_eq!(
        AttendanceSession::new(session_draft),
        Err(AttendanceValidationError::InvalidCourseTitle)
    );
}

#[rstest]
fn session_constructor_rejects_closed_at_on_active_session(
    mut session_draft: AttendanceSessionDraft,
) {
    session_draft.closed_at = Some(Utc::now());
    assert_eq!(
        AttendanceSession::new(session_draft),
        Err(AttendanceValidationError::ClosureMismatch)
    );
}

#[rstest]
fn session_constructor_rejects_closed_session_without_timestamp(
    mut session_draft: AttendanceSessionDraft,
) {
    session_draft.is_active = false;
    assert_eq!(
        AttendanceSession::new(session_draft),
        Err(AttendanceValidationError::ClosureMismatch)
    );
}

#[rstest]
fn expiry_is_whole_day_granular(session_draft: AttendanceSessionDraft) {
    let session = AttendanceSession::new(session_draft).expect("valid draft");

    assert!(!session.is_expired(session_date()));
    assert!(!session.is_expired(session_date().pred_opt().expect("previous day")));
    assert!(session.is_expired(session_date().succ_opt().expect("next day")));
}

#[rstest]
fn close_produces_a_terminal_copy(session_draft: AttendanceSessionDraft) {
    let session = AttendanceSession::new(session_draft).expect("valid draft");
    let closed_at = Utc::now();

    let closed = session.close(closed_at);

    assert!(!closed.is_active());
    assert_eq!(closed.closed_at(), Some(closed_at));
    // The original is untouched; entities are values.
    assert!(session.is_active());
    assert_eq!(closed.code(), session.code());
    assert_eq!(closed.date(), session.date());
}

#[rstest]
fn record_constructor_defaults_empty_status_to_present(mut record_draft: AttendanceRecordDraft) {
    record_draft.status = String::new();
    let record = AttendanceRecord::new(record_draft).expect("valid draft");
    assert_eq!(record.status(), "present");
}

#[rstest]
fn record_constructor_keeps_custom_status(mut record_draft: AttendanceRecordDraft) {
    record_draft.status = "excused".to_owned();
    let record = AttendanceRecord::new(record_draft).expect("valid draft");
    assert_eq!(record.status(), "excused");
}

#[rstest]
fn record_constructor_rejects_blank_student_name(mut record_draft: AttendanceRecordDraft) {
    record_draft.student_name = "  ".to_owned();
    assert_eq!(
        AttendanceRecord::new(record_draft),
        Err(AttendanceValidationError::InvalidName {
            field: "student name"
        })
    );
}

#[rstest]
fn record_allows_legacy_rows_without_session(mut record_draft: AttendanceRecordDraft) {
    record_draft.session_id = None;
    let record = AttendanceRecord::new(record_draft).expect("valid draft");
    assert_eq!(record.session_id(), None);
}
