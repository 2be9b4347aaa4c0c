//! Search filter parsing for the product and category search endpoints.
//!
//! Everything here operates on raw query-string values and produces either a
//! typed filter structure or a [`CoreError::Validation`] describing the bad
//! input. No SQL is built here; the repository layer consumes these types.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::types::DbId;

/// Product columns that may be requested via `fields` and projected directly.
pub const PRODUCT_COLUMNS: &[&str] = &[
    "id",
    "enabled",
    "name",
    "slug",
    "stock",
    "description",
    "price",
    "price_with_discount",
];

/// Category columns that may be requested via `fields`.
pub const CATEGORY_COLUMNS: &[&str] = &["id", "name", "slug", "use_in_menu"];

/// Pseudo-fields that select child collections rather than columns.
const IMAGES_FIELD: &str = "images";
const OPTIONS_FIELD: &str = "options";
/// Never a projectable column; `category_ids` is always derived per row.
const CATEGORIES_FIELD: &str = "categories";

/// The outcome of parsing a product `fields` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    /// Scalar columns to project, `id` always first.
    pub columns: Vec<String>,
    /// Whether the `images` child collection was requested.
    pub include_images: bool,
    /// Whether the `options` child collection was requested.
    pub include_options: bool,
}

/// Parse the product `fields` parameter.
///
/// Entries are trimmed and empties dropped; `id` is force-included at the
/// front. `images` and `options` are stripped from the projection and flip
/// the eager-loading flags instead; `categories` is stripped outright
/// (category ids are always attached post-query). Any remaining entry not in
/// [`PRODUCT_COLUMNS`] is a validation error.
pub fn parse_product_fields(raw: &str) -> Result<ProductFields, CoreError> {
    let mut columns = vec!["id".to_string()];
    let mut include_images = false;
    let mut include_options = false;

    for field in split_fields(raw) {
        match field {
            "id" => {}
            IMAGES_FIELD => include_images = true,
            OPTIONS_FIELD => include_options = true,
            CATEGORIES_FIELD => {}
            other if PRODUCT_COLUMNS.contains(&other) => {
                if !columns.iter().any(|c| c == other) {
                    columns.push(other.to_string());
                }
            }
            other => {
                return Err(CoreError::Validation(format!("Unknown field: {other}")));
            }
        }
    }

    Ok(ProductFields {
        columns,
        include_images,
        include_options,
    })
}

/// Parse the category `fields` parameter against [`CATEGORY_COLUMNS`].
///
/// Same normalization as the product variant: trim, drop empties, force `id`
/// first, reject unknown entries.
pub fn parse_category_fields(raw: &str) -> Result<Vec<String>, CoreError> {
    let mut columns = vec!["id".to_string()];

    for field in split_fields(raw) {
        if field == "id" {
            continue;
        }
        if !CATEGORY_COLUMNS.contains(&field) {
            return Err(CoreError::Validation(format!("Unknown field: {field}")));
        }
        if !columns.iter().any(|c| c == field) {
            columns.push(field.to_string());
        }
    }

    Ok(columns)
}

/// Parse a `price-range` value of the form `min-max` (inclusive bounds).
pub fn parse_price_range(raw: &str) -> Result<(f64, f64), CoreError> {
    let invalid = || CoreError::Validation("Invalid price range. Use the format min-max.".into());

    let (min, max) = raw.split_once('-').ok_or_else(invalid)?;
    let min: f64 = min.trim().parse().map_err(|_| invalid())?;
    let max: f64 = max.trim().parse().map_err(|_| invalid())?;

    Ok((min, max))
}

/// Parse a comma-separated `category_ids` list, silently dropping entries
/// that are not integers.
pub fn parse_category_ids(raw: &str) -> Vec<DbId> {
    raw.split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}

/// Strictly parse a `"true"` / `"false"` query value (e.g. `use_in_menu`).
pub fn parse_bool_param(name: &str, raw: &str) -> Result<bool, CoreError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CoreError::Validation(format!(
            "{name} must be true or false"
        ))),
    }
}

/// Extract `option[<id>]=v1,v2` filters from raw query pairs.
///
/// Keys that do not match the `option[<numeric id>]` shape are ignored.
/// Values are split on commas and trimmed. The result maps option id to its
/// accepted-value set; filters for distinct ids combine with OR downstream.
pub fn parse_option_filters<'a, I>(params: I) -> BTreeMap<DbId, Vec<String>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut filters = BTreeMap::new();

    for (key, value) in params {
        let Some(id) = option_filter_id(key) else {
            continue;
        };
        let values: Vec<String> = value
            .split(',')
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        filters.insert(id, values);
    }

    filters
}

/// Parse the option id out of an `option[<id>]` key, if it has that shape.
fn option_filter_id(key: &str) -> Option<DbId> {
    key.strip_prefix("option[")?
        .strip_suffix(']')?
        .parse()
        .ok()
}

fn split_fields(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|f| !f.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn product_fields_force_include_id() {
        let fields = parse_product_fields("name,price").unwrap();
        assert_eq!(fields.columns, vec!["id", "name", "price"]);
        assert!(!fields.include_images);
        assert!(!fields.include_options);
    }

    #[test]
    fn product_fields_empty_input_projects_only_id() {
        let fields = parse_product_fields("").unwrap();
        assert_eq!(fields.columns, vec!["id"]);
    }

    #[test]
    fn images_and_options_become_eager_load_flags() {
        let fields = parse_product_fields("name, images ,options").unwrap();
        assert_eq!(fields.columns, vec!["id", "name"]);
        assert!(fields.include_images);
        assert!(fields.include_options);
    }

    #[test]
    fn categories_is_stripped_not_projected() {
        let fields = parse_product_fields("categories,name").unwrap();
        assert_eq!(fields.columns, vec!["id", "name"]);
    }

    #[test]
    fn unknown_product_field_is_rejected() {
        assert_matches!(
            parse_product_fields("name,password"),
            Err(CoreError::Validation(msg)) if msg == "Unknown field: password"
        );
    }

    #[test]
    fn duplicate_fields_are_deduplicated() {
        let fields = parse_product_fields("name,name,id").unwrap();
        assert_eq!(fields.columns, vec!["id", "name"]);
    }

    #[test]
    fn category_fields_default_shape() {
        let columns = parse_category_fields("name,slug").unwrap();
        assert_eq!(columns, vec!["id", "name", "slug"]);
    }

    #[test]
    fn category_fields_reject_unknown() {
        assert_matches!(parse_category_fields("name,images"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn price_range_parses_inclusive_bounds() {
        assert_eq!(parse_price_range("10-20").unwrap(), (10.0, 20.0));
        assert_eq!(parse_price_range("0.5-99.99").unwrap(), (0.5, 99.99));
    }

    #[test]
    fn price_range_rejects_malformed_input() {
        assert_matches!(parse_price_range("10"), Err(CoreError::Validation(_)));
        assert_matches!(parse_price_range("abc-20"), Err(CoreError::Validation(_)));
        assert_matches!(parse_price_range("10-xyz"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn category_ids_drop_non_numeric_entries() {
        assert_eq!(parse_category_ids("1, 2,abc, 3"), vec![1, 2, 3]);
        assert!(parse_category_ids("abc").is_empty());
    }

    #[test]
    fn bool_param_is_strict() {
        assert!(parse_bool_param("use_in_menu", "true").unwrap());
        assert!(!parse_bool_param("use_in_menu", "false").unwrap());
        assert_matches!(
            parse_bool_param("use_in_menu", "1"),
            Err(CoreError::Validation(msg)) if msg == "use_in_menu must be true or false"
        );
    }

    #[test]
    fn option_filters_parse_ids_and_value_sets() {
        let pairs = vec![
            ("option[45]", "PP,M,G"),
            ("option[2]", "red"),
            ("option[x]", "ignored"),
            ("limit", "12"),
        ];
        let filters = parse_option_filters(pairs);
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[&45], vec!["PP", "M", "G"]);
        assert_eq!(filters[&2], vec!["red"]);
    }
}
