//! Attendance aggregates: sessions and the records they produce.
//!
//! An [`AttendanceSession`] is a lecturer-defined, date-bound window
//! identified by a unique [`SessionCode`](crate::domain::SessionCode). An
//! [`AttendanceRecord`] is one student's presence fact for one session.
//! Both are immutable once constructed; state transitions produce new
//! values through validated constructors.

mod record;
mod validation;

pub use self::record::{AttendanceRecord, AttendanceRecordDraft};
pub(crate) use self::record::STATUS_PRESENT;
pub use self::validation::AttendanceValidationError;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::SessionCode;

/// Input payload for [`AttendanceSession::new`].
#[derive(Debug, Clone)]
pub struct AttendanceSessionDraft {
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

/// A lecturer-initiated attendance window.
///
/// ## Invariants
/// - `closed_at` is set if and only if `is_active` is false.
/// - `course_code`, `course_title`, and `lecturer_name` are non-empty.
/// - `date` never changes after creation; expiry derives from it at read
///   time rather than being stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceSession {
    pub(super) id: Uuid,
    pub(super) school_id: Uuid,
    pub(super) lecturer_id: Uuid,
    pub(super) lecturer_name: String,
    pub(super) course_code: String,
    pub(super) course_title: String,
    pub(super) date: NaiveDate,
    pub(super) code: SessionCode,
    pub(super) is_active: bool,
    pub(super) closed_at: Option<DateTime<Utc>>,
    pub(super) created_at: DateTime<Utc>,
}

impl AttendanceSession {
    /// Creates a validated attendance session.
    pub fn new(draft: AttendanceSessionDraft) -> Result<Self, AttendanceValidationError> {
        Self::try_from(draft)
    }

    /// Returns the session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the owning tenant (school) id.
    pub fn school_id(&self) -> Uuid {
        self.school_id
    }

    /// Returns the owning lecturer id.
    pub fn lecturer_id(&self) -> Uuid {
        self.lecturer_id
    }

    /// Returns the lecturer display name snapshotted at creation.
    pub fn lecturer_name(&self) -> &str {
        self.lecturer_name.as_str()
    }

    /// Returns the course code snapshotted at creation.
    pub fn course_code(&self) -> &str {
        self.course_code.as_str()
    }

    /// Returns the course title snapshotted at creation.
    pub fn course_title(&self) -> &str {
        self.course_title.as_str()
    }

    /// Returns the calendar date this window covers.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the unique human-enterable code.
    pub fn code(&self) -> &SessionCode {
        &self.code
    }

    /// Whether the lecturer has explicitly closed the session.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// When the session was closed, if it has been.
    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Date-based expiry, independent of the stored `is_active` flag.
    ///
    /// Expiry has whole-day granularity: a session stays redeemable all day
    /// on its own date regardless of the time it was opened, and expires at
    /// the next midnight. Both signals must be checked when redeeming; an
    /// expired session may still read as active.
    ///
    /// # Examples
    /// ```
    /// # use backend::domain::{AttendanceSession, AttendanceSessionDraft, SessionCode};
    /// # use chrono::{NaiveDate, Utc};
    /// # use uuid::Uuid;
    /// # let session = AttendanceSession::new(AttendanceSessionDraft {
    /// #     id: Uuid::new_v4(),
    /// #     school_id: Uuid::new_v4(),
    /// #     lecturer_id: Uuid::new_v4(),
    /// #     lecturer_name: "Dr. Sall".into(),
    /// #     course_code: "CS101".into(),
    /// #     course_title: "Intro to CS".into(),
    /// #     date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
    /// #     code: SessionCode::generate(),
    /// #     is_active: true,
    /// #     closed_at: None,
    /// #     created_at: Utc::now(),
    /// # }).unwrap();
    /// let same_day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
    /// let next_day = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap();
    /// assert!(!session.is_expired(same_day));
    /// assert!(session.is_expired(next_day));
    /// ```
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.date < today
    }

    /// Returns a closed copy of this session.
    ///
    /// The Active → Closed transition is terminal; callers must check
    /// [`AttendanceSession::is_active`] first, since closing an
    /// already-closed session would overwrite its original `closed_at`.
    pub fn close(&self, closed_at: DateTime<Utc>) -> Self {
        Self {
            is_active: false,
            closed_at: Some(closed_at),
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
