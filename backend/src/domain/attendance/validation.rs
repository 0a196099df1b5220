//! Attendance validation and conversion helpers.

use super::record::STATUS_PRESENT;
use super::{
    AttendanceRecord, AttendanceRecordDraft, AttendanceSession, AttendanceSessionDraft,
};

/// Longest accepted course code, e.g. `CS101` or `MATH-2201`.
const MAX_COURSE_CODE_LEN: usize = 32;
/// Longest accepted course title.
const MAX_COURSE_TITLE_LEN: usize = 256;
/// Longest accepted display name or status string.
const MAX_TEXT_LEN: usize = 128;

/// Validation failures raised by attendance constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttendanceValidationError {
    /// Course code was empty or longer than the column allows.
    #[error("course code must be 1..={MAX_COURSE_CODE_LEN} characters")]
    InvalidCourseCode,
    /// Course title was empty or longer than the column allows.
    #[error("course title must be 1..={MAX_COURSE_TITLE_LEN} characters")]
    InvalidCourseTitle,
    /// A display name was empty or overlong.
    #[error("{field} must be 1..={MAX_TEXT_LEN} characters")]
    InvalidName {
        /// Which name field failed.
        field: &'static str,
    },
    /// Record status was empty or overlong.
    #[error("status must be 1..={MAX_TEXT_LEN} characters")]
    InvalidStatus,
    /// `closed_at` and `is_active` disagree.
    #[error("closed_at must be present exactly when the session is closed")]
    ClosureMismatch,
}

fn checked_text(
    value: String,
    max: usize,
    error: AttendanceValidationError,
) -> Result<String, AttendanceValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > max {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}

impl TryFrom<AttendanceSessionDraft> for AttendanceSession {
    type Error = AttendanceValidationError;

    fn try_from(value: AttendanceSessionDraft) -> Result<Self, Self::Error> {
        if value.is_active == value.closed_at.is_some() {
            return Err(AttendanceValidationError::ClosureMismatch);
        }

        Ok(Self {
            id: value.id,
            school_id: value.school_id,
            lecturer_id: value.lecturer_id,
            lecturer_name: checked_text(
                value.lecturer_name,
                MAX_TEXT_LEN,
                AttendanceValidationError::InvalidName {
                    field: "lecturer name",
                },
            )?,
            course_code: checked_text(
                value.course_code,
                MAX_COURSE_CODE_LEN,
                AttendanceValidationError::InvalidCourseCode,
            )?,
            course_title: checked_text(
                value.course_title,
                MAX_COURSE_TITLE_LEN,
                AttendanceValidationError::InvalidCourseTitle,
            )?,
            date: value.date,
            code: value.code,
            is_active: value.is_active,
            closed_at: value.closed_at,
            created_at: value.created_at,
        })
    }
}

impl TryFrom<AttendanceRecordDraft> for AttendanceRecord {
    type Error = AttendanceValidationError;

    fn try_from(value: AttendanceRecordDraft) -> Result<Self, Self::Error> {
        let status = if value.status.is_empty() {
            STATUS_PRESENT.to_owned()
        } else {
            checked_text(
                value.status,
                MAX_TEXT_LEN,
                AttendanceValidationError::InvalidStatus,
            )?
        };

        Ok(Self {
            id: value.id,
            school_id: value.school_id,
            student_id: value.student_id,
            student_name: checked_text(
                value.student_name,
                MAX_TEXT_LEN,
                AttendanceValidationError::InvalidName {
                    field: "student name",
                },
            )?,
            lecturer_id: value.lecturer_id,
            lecturer_name: checked_text(
                value.lecturer_name,
                MAX_TEXT_LEN,
                AttendanceValidationError::InvalidName {
                    field: "lecturer name",
                },
            )?,
            session_id: value.session_id,
            course_code: checked_text(
                value.course_code,
                MAX_COURSE_CODE_LEN,
                AttendanceValidationError::InvalidCourseCode,
            )?,
            course_title: checked_text(
                value.course_title,
                MAX_COURSE_TITLE_LEN,
                AttendanceValidationError::InvalidCourseTitle,
            )?,
            date: value.date,
            status,
            created_at: value.created_at,
        })
    }
}
