//! Authentication primitives: JWT issuance/validation and password hashing.

pub mod jwt;
pub mod password;
