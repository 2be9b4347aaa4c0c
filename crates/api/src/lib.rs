//! HTTP layer: configuration, auth, error mapping, handlers, and routing.
//!
//! Everything is public so integration tests under `tests/` can build the
//! exact router the production binary serves.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
