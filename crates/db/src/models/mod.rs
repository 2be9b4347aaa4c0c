//! Entity model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Validated payload structs consumed by the repositories
//! - For products, the child-collection change entries used by the
//!   image/option reconciliation

pub mod category;
pub mod product;
pub mod user;
