//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed attendance entities and the services that
//! implement the session-code protocol. Types are immutable; invariants and
//! serialisation contracts live in each type's Rustdoc. Adapters reach the
//! domain only through the traits in [`ports`].

pub mod attendance;
pub mod error;
pub mod ledger_service;
pub mod ports;
pub mod principal;
pub mod redemption_service;
pub mod session_code;
pub mod session_lifecycle_service;

pub use self::attendance::{
    AttendanceRecord, AttendanceRecordDraft, AttendanceSession, AttendanceSessionDraft,
    AttendanceValidationError,
};
pub(crate) use self::attendance::STATUS_PRESENT;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ledger_service::LedgerService;
pub use self::principal::{Principal, Role};
pub use self::redemption_service::RedemptionService;
pub use self::session_code::{SessionCode, SessionCodeError};
pub use self::session_lifecycle_service::SessionLifecycleService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn check() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
