//! Attendance record entity and its draft.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::AttendanceValidationError;

/// Default status written when a student redeems a code.
pub(crate) const STATUS_PRESENT: &str = "present";

/// Input payload for [`AttendanceRecord::new`].
#[derive(Debug, Clone)]
pub struct AttendanceRecordDraft {
    pub id: Uuid,
    pub school_id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub lecturer_id: Uuid,
    pub lecturer_name: String,
    pub session_id: Option<Uuid>,
    pub course_code: String,
    pub course_title: String,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// One student's presence fact for one session.
///
/// ## Invariants
/// - At most one record exists per (student, session) pair; the storage
///   layer enforces this with a composite uniqueness constraint.
/// - Name and course fields are snapshots taken at mark-time and never
///   change afterwards, so historical attendance reflects what was true
///   when it was recorded.
/// - `session_id` is `None` only for legacy rows back-filled before
///   sessions existed.
///
/// Records are deleted whole by the owning lecturer or not at all; there is
/// no in-place update path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub(super) id: Uuid,
    pub(super) school_id: Uuid,
    pub(super) student_id: Uuid,
    pub(super) student_name: String,
    pub(super) lecturer_id: Uuid,
    pub(super) lecturer_name: String,
    pub(super) session_id: Option<Uuid>,
    pub(super) course_code: String,
    pub(super) course_title: String,
    pub(super) date: NaiveDate,
    pub(super) status: String,
    pub(super) created_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Creates a validated attendance record.
    pub fn new(draft: AttendanceRecordDraft) -> Result<Self, AttendanceValidationError> {
        Self::try_from(draft)
    }

    /// Returns the record id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the owning tenant (school) id.
    pub fn school_id(&self) -> Uuid {
        self.school_id
    }

    /// Returns the student this record belongs to.
    pub fn student_id(&self) -> Uuid {
        self.student_id
    }

    /// Returns the student display name snapshotted at mark-time.
    pub fn student_name(&self) -> &str {
        self.student_name.as_str()
    }

    /// Returns the lecturer owning the session this record came from.
    pub fn lecturer_id(&self) -> Uuid {
        self.lecturer_id
    }

    /// Returns the lecturer display name snapshotted at mark-time.
    pub fn lecturer_name(&self) -> &str {
        self.lecturer_name.as_str()
    }

    /// Returns the originating session, absent only on legacy rows.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// Returns the course code copied from the session at mark-time.
    pub fn course_code(&self) -> &str {
        self.course_code.as_str()
    }

    /// Returns the course title copied from the session at mark-time.
    pub fn course_title(&self) -> &str {
        self.course_title.as_str()
    }

    /// Returns the session date this record covers.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the free-form status, `"present"` for code redemptions.
    pub fn status(&self) -> &str {
        self.status.as_str()
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
