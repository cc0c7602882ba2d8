//! Domain layer shared by the database and API crates.
//!
//! Holds the pieces that have no I/O: ID and timestamp aliases, the domain
//! error enum, the sprint lifecycle state machine, and the audit-trail
//! vocabulary.

pub mod error;
pub mod sprint;
pub mod trail;
pub mod types;
