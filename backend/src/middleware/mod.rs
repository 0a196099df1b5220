//! Application-level Actix middleware.

pub mod request_trace;

pub use request_trace::RequestTrace;
