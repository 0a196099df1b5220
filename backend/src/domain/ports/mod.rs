//! Domain ports: the seams between the core and its adapters.
//!
//! Driving ports ([`SessionLifecycleCommand`], [`RedemptionCommand`], the
//! ledger traits) are consumed by inbound adapters; driven ports
//! ([`SessionRepository`], [`AttendanceRepository`]) are implemented by the
//! persistence layer. Fixture implementations let the HTTP surface boot
//! without a database in tests.

mod attendance_repository;
mod ledger;
mod redemption;
mod session_lifecycle;
mod session_repository;

pub use self::attendance_repository::{
    AttendanceRepository, AttendanceRepositoryError, FixtureAttendanceRepository,
    LecturerRecordFilter,
};
pub use self::ledger::{
    AttendanceRecordPayload, DeleteRecordRequest, FixtureLedger, LedgerCommand, LedgerQuery,
    ListLecturerRecordsRequest, ListRecordsResponse, ListStudentRecordsRequest,
};
pub use self::redemption::{
    FixtureRedemption, MarkAttendanceRequest, MarkAttendanceResponse, RedemptionCommand,
    RedemptionQuery, SessionStatusRequest, SessionStatusResponse,
};
pub use self::session_lifecycle::{
    CloseSessionRequest, CloseSessionResponse, FixtureSessionLifecycle, OpenSessionRequest,
    OpenSessionResponse, ResolveSessionRequest, ResolveSessionResponse, SessionLifecycleCommand,
    SessionLifecycleQuery, SessionPayload,
};
pub use self::session_repository::{
    FixtureSessionRepository, SessionRepository, SessionRepositoryError,
};

#[cfg(test)]
pub use self::attendance_repository::MockAttendanceRepository;
#[cfg(test)]
pub use self::session_repository::MockSessionRepository;
