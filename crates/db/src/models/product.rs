//! Product entity models, child-collection types, and search filter.

use std::collections::BTreeMap;

use catalog_core::pagination::PageParams;
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub enabled: bool,
    pub name: String,
    pub slug: String,
    pub stock: i32,
    pub description: String,
    pub price: f64,
    pub price_with_discount: f64,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// A product image, serialized as `{id, path}` in responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductImage {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub product_id: DbId,
    pub path: String,
}

/// A product option row. `values` is the raw comma-joined value list, which
/// is also the shape returned over HTTP.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductOption {
    pub id: DbId,
    pub product_id: DbId,
    pub title: String,
    pub shape: String,
    pub radius: i32,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub option_type: String,
    pub values: String,
}

/// Validated scalar payload for creating or wholesale-updating a product.
#[derive(Debug, Clone)]
pub struct ProductData {
    pub enabled: bool,
    pub name: String,
    pub slug: String,
    pub stock: i32,
    pub description: String,
    pub price: f64,
    pub price_with_discount: f64,
}

/// Option shape attribute, defaulting to a square swatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionShape {
    #[default]
    Square,
    Circle,
}

impl OptionShape {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionShape::Square => "square",
            OptionShape::Circle => "circle",
        }
    }
}

/// Option rendering type, defaulting to plain text values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    #[default]
    Text,
    Color,
}

impl OptionType {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionType::Text => "text",
            OptionType::Color => "color",
        }
    }
}

/// One entry of a submitted `images` array.
///
/// Classified by the reconciliation rules: no id + content inserts, id +
/// `deleted` removes, id + content updates the stored path.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageChange {
    pub id: Option<DbId>,
    #[serde(default)]
    pub deleted: bool,
    pub content: Option<String>,
}

/// One entry of a submitted `options` array.
///
/// Same classification as [`ImageChange`]. `values` accepts the legacy
/// `value` alias; both are comma-joined for storage.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionChange {
    pub id: Option<DbId>,
    #[serde(default)]
    pub deleted: bool,
    pub title: Option<String>,
    pub shape: Option<OptionShape>,
    pub radius: Option<i32>,
    #[serde(rename = "type")]
    pub option_type: Option<OptionType>,
    #[serde(default, alias = "value")]
    pub values: Option<Vec<String>>,
}

impl OptionChange {
    /// The comma-joined value list to store; absent values become `""`.
    pub fn joined_values(&self) -> String {
        self.values
            .as_deref()
            .map(|values| values.join(","))
            .unwrap_or_default()
    }
}

/// All filters accepted by the product search, already validated.
#[derive(Debug, Clone, Default)]
pub struct ProductSearchFilter {
    /// Case-insensitive substring matched against name OR description.
    pub matches: Option<String>,
    /// Inclusive price bounds; only applied when both were supplied.
    pub price_range: Option<(f64, f64)>,
    /// Product must belong to at least one of these categories.
    pub category_ids: Vec<DbId>,
    /// Option id -> accepted values; distinct ids combine with OR.
    pub option_filters: BTreeMap<DbId, Vec<String>>,
}

/// Search filter plus pagination, as passed to the repository.
#[derive(Debug, Clone)]
pub struct ProductSearch {
    pub filter: ProductSearchFilter,
    pub page: PageParams,
}
