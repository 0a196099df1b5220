//! PostgreSQL persistence adapters for the attendance domain.
//!
//! Repositories implement the driven ports in
//! [`crate::domain::ports`] on top of a shared async connection pool.

mod diesel_attendance_repository;
mod diesel_session_repository;
mod error_mapping;
mod models;
pub mod pool;
pub mod schema;

pub use self::diesel_attendance_repository::DieselAttendanceRepository;
pub use self::diesel_session_repository::DieselSessionRepository;
pub use self::pool::{DbPool, PoolConfig, PoolError};
