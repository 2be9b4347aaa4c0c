//! Category entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A category row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub use_in_menu: bool,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// Validated payload for creating or wholesale-updating a category.
#[derive(Debug, Clone)]
pub struct CategoryData {
    pub name: String,
    pub slug: String,
    pub use_in_menu: bool,
}
