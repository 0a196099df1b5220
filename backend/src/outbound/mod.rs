//! Outbound adapters implementing driven ports against real infrastructure.

pub mod persistence;
