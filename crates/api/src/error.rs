use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent `{"message": ...}`
/// JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `catalog_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => core_status_and_message(core),

            AppError::Database(err) => match classify_sqlx_error(err) {
                Some(core) => core_status_and_message(&core),
                None => internal(),
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        (status, axum::Json(json!({ "message": message }))).into_response()
    }
}

fn core_status_and_message(core: &CoreError) -> (StatusCode, String) {
    match core {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, core.to_string()),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        // Duplicates are client errors on this API's surface (400, not 409).
        CoreError::Duplicate { .. } => (StatusCode::BAD_REQUEST, core.to_string()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

/// Classify a sqlx error into a domain error where possible.
///
/// - `RowNotFound` maps to a generic not-found.
/// - Unique violations (PostgreSQL 23505) on `uq_*` constraints map to the
///   typed duplicate error; the constraint name determines the field. This
///   is the only place duplicate detection happens -- handlers never
///   pre-check and never match on message text.
/// - Everything else is logged and masked as a 500.
fn classify_sqlx_error(err: &sqlx::Error) -> Option<CoreError> {
    match err {
        sqlx::Error::RowNotFound => Some(CoreError::NotFound {
            entity: "Resource",
            id: 0,
        }),
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some("23505") {
                let field = match db_err.constraint() {
                    Some("uq_users_email") => "Email",
                    Some("uq_products_name") | Some("uq_categories_name") => "Name",
                    Some("uq_categories_slug") => "Slug",
                    Some(c) if c.starts_with("uq_") => "Value",
                    _ => {
                        tracing::error!(error = %db_err, "Unique violation on unknown constraint");
                        return None;
                    }
                };
                return Some(CoreError::Duplicate { field });
            }
            tracing::error!(error = %db_err, "Database error");
            None
        }
        other => {
            tracing::error!(error = %other, "Database error");
            None
        }
    }
}
