//! Repository for the `users` table.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, PublicUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, firstname, surname, email, password_hash, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Relies on the `uq_users_email` constraint for email uniqueness; a
    /// violation surfaces as a database error classified upstream.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (firstname, surname, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.firstname)
            .bind(&input.surname)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by id, projected to the public shape (no hash).
    pub async fn find_public_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PublicUser>, sqlx::Error> {
        sqlx::query_as::<_, PublicUser>(
            "SELECT id, firstname, surname, email FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a full user row by email. Used by token issuance.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Replace a user's scalar fields. Returns `false` if no row matched.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateUser) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users
             SET firstname = $2, surname = $3, email = $4, updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.firstname)
        .bind(&input.surname)
        .bind(&input.email)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a user by id. Returns `false` if no row matched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
