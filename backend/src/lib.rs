//! Multi-tenant attendance tracking backend.
//!
//! Lecturers open time-boxed attendance sessions identified by a short
//! code; students redeem that code exactly once per session. The crate is
//! organised hexagonally: [`domain`] holds entities, services, and ports,
//! [`inbound`] adapts HTTP requests onto driving ports, and [`outbound`]
//! implements the driven ports against PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
