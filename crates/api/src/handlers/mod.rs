//! Request handlers, one module per resource.

pub mod auth;
pub mod category;
pub mod product;
pub mod user;

use catalog_core::error::CoreError;

/// Build the "missing required fields" validation error from a list of
/// `(field name, present?)` pairs, or `None` when everything is present.
///
/// Mirrors the request contract: a field is missing when absent, null, or
/// (for strings) empty.
pub(crate) fn missing_fields(fields: &[(&str, bool)]) -> Option<CoreError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        None
    } else {
        Some(CoreError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Presence check for required string fields: set and non-empty.
pub(crate) fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}
