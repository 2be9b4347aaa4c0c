//! User CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::user::{CreateUser, PublicUser, UpdateUser};
use catalog_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::{missing_fields, present};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub firstname: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub firstname: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
}

/// `GET /v1/user/{id}` -- public profile, no password hash.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PublicUser>> {
    let user = UserRepo::find_public_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    Ok(Json(user))
}

/// `POST /v1/user` -- register a user. Requires authentication.
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    if let Some(error) = missing_fields(&[
        ("firstname", present(&input.firstname)),
        ("surname", present(&input.surname)),
        ("email", present(&input.email)),
        ("password", present(&input.password)),
        ("confirmPassword", present(&input.confirm_password)),
    ]) {
        return Err(error.into());
    }
    if input.password != input.confirm_password {
        return Err(CoreError::Validation("Passwords do not match".into()).into());
    }

    let password = input.password.unwrap_or_default();
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    // A duplicate email trips uq_users_email and is classified to a 400.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            firstname: input.firstname.unwrap_or_default(),
            surname: input.surname.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            password_hash,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// `PUT /v1/user/{id}` -- wholesale update of the profile fields.
/// Requires authentication. Passwords are not changed here.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<StatusCode> {
    if let Some(error) = missing_fields(&[
        ("firstname", present(&input.firstname)),
        ("surname", present(&input.surname)),
        ("email", present(&input.email)),
    ]) {
        return Err(error.into());
    }

    let updated = UserRepo::update(
        &state.pool,
        id,
        &UpdateUser {
            firstname: input.firstname.unwrap_or_default(),
            surname: input.surname.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
        },
    )
    .await?;

    if !updated {
        return Err(CoreError::NotFound { entity: "User", id }.into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /v1/user/{id}`. Requires authentication.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound { entity: "User", id }.into());
    }
    Ok(StatusCode::NO_CONTENT)
}
