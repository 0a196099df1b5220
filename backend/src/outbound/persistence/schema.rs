//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly; Diesel uses them for compile-time query validation and type-safe
//! SQL generation.

diesel::table! {
    /// Lecturer-initiated attendance windows.
    ///
    /// `session_code` carries a table-wide uniqueness constraint that holds
    /// forever, not just while the session is active. Sessions are never
    /// deleted.
    attendance_sessions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Tenant (school) owning the session.
        school_id -> Uuid,
        /// Lecturer owning the session.
        lecturer_id -> Uuid,
        /// Lecturer display name snapshotted at creation.
        lecturer_name -> Varchar,
        /// Course code snapshotted at creation.
        course_code -> Varchar,
        /// Course title snapshotted at creation.
        course_title -> Varchar,
        /// Calendar date the window covers.
        date -> Date,
        /// Unique human-enterable code, e.g. `S-7F3A2B`.
        session_code -> Varchar,
        /// Cleared exactly once by explicit closure.
        is_active -> Bool,
        /// Set exactly when `is_active` is cleared.
        closed_at -> Nullable<Timestamptz>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One presence fact per (student, session) pair.
    ///
    /// The composite uniqueness constraint on (student_id, session_id) is
    /// the source of truth for exactly-once marking; concurrent inserts for
    /// the same pair lose deterministically. `session_id` is nullable only
    /// for legacy rows back-filled before sessions existed, and PostgreSQL
    /// exempts those NULLs from the constraint.
    attendance_records (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Tenant (school) owning the record.
        school_id -> Uuid,
        /// Student the record belongs to.
        student_id -> Uuid,
        /// Student display name snapshotted at mark-time.
        student_name -> Varchar,
        /// Lecturer owning the originating session.
        lecturer_id -> Uuid,
        /// Lecturer display name snapshotted at mark-time.
        lecturer_name -> Varchar,
        /// Originating session; null only on legacy rows.
        session_id -> Nullable<Uuid>,
        /// Course code copied from the session at mark-time.
        course_code -> Varchar,
        /// Course title copied from the session at mark-time.
        course_title -> Varchar,
        /// Session date this record covers.
        date -> Date,
        /// Free-form status, `present` for code redemptions.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(attendance_records -> attendance_sessions (session_id));
diesel::allow_tables_to_appear_in_same_query!(attendance_records, attendance_sessions);
