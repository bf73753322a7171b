//! Shared domain types for the portfolio backend.
//!
//! Everything here is storage- and transport-agnostic so both the data
//! access layer (`folio-db`) and the HTTP layer (`folio-api`) can depend on it.

pub mod config;
pub mod password;
pub mod types;
