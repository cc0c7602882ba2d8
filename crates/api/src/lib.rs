//! Retroflect API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! sessions, permissions) so integration tests and the binary entrypoint
//! can both access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod permissions;
pub mod queue;
pub mod router;
pub mod routes;
pub mod sessions;
pub mod state;
pub mod trail;
