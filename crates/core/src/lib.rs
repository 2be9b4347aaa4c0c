//! Domain layer shared by the persistence and HTTP crates.
//!
//! Contains only pure logic: type aliases, the domain error enum, pagination
//! parameter validation, and search filter parsing. No I/O lives here.

pub mod error;
pub mod filters;
pub mod pagination;
pub mod types;
