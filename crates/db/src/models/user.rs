//! User entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A user row from the `users` table.
///
/// The password hash is never serialized; endpoints return [`PublicUser`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub firstname: String,
    pub surname: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The user shape exposed over HTTP.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicUser {
    pub id: DbId,
    pub firstname: String,
    pub surname: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname,
            surname: user.surname,
            email: user.email,
        }
    }
}

/// Validated payload for inserting a user. The password arrives here
/// already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub firstname: String,
    pub surname: String,
    pub email: String,
    pub password_hash: String,
}

/// Validated payload for a wholesale user update.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub firstname: String,
    pub surname: String,
    pub email: String,
}
