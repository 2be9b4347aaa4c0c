//! Token issuance handler.

use axum::extract::State;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::present;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `POST /v1/user/token` -- exchange credentials for a JWT.
///
/// Unknown email and wrong password both produce the same 400 response so
/// the endpoint cannot be used to probe which emails are registered.
pub async fn generate(
    State(state): State<AppState>,
    Json(input): Json<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    if !present(&input.email) || !present(&input.password) {
        return Err(CoreError::Validation("Email and password are required".into()).into());
    }
    // Presence was just checked.
    let (email, password) = (input.email.unwrap_or_default(), input.password.unwrap_or_default());

    let Some(user) = UserRepo::find_by_email(&state.pool, &email).await? else {
        return Err(invalid_credentials());
    };

    let valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        return Err(invalid_credentials());
    }

    let token = generate_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok(Json(TokenResponse { token }))
}

fn invalid_credentials() -> AppError {
    CoreError::Validation("Invalid credentials".into()).into()
}
