//! Repository for the `product_options` table.
//!
//! Mirrors the image repository structurally: listing plus the per-item
//! reconciliation used by product create/update.

use catalog_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::product::{OptionChange, ProductOption};

const COLUMNS: &str = r#"id, product_id, title, shape, radius, type, "values""#;

/// Provides listing and reconciliation for product options.
pub struct ProductOptionRepo;

impl ProductOptionRepo {
    /// List options for a set of products, ordered by id.
    pub async fn list_for_products(
        pool: &PgPool,
        product_ids: &[DbId],
    ) -> Result<Vec<ProductOption>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_options
             WHERE product_id = ANY($1)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, ProductOption>(&query)
            .bind(product_ids)
            .fetch_all(pool)
            .await
    }

    /// Apply a submitted option array to a product's children, one statement
    /// per entry, inside the caller's transaction.
    ///
    /// - no id: insert a new row (defaults: square shape, radius 0, text type)
    /// - id + deleted: delete the row scoped to (id, product_id); silently a
    ///   no-op when the id belongs to another product
    /// - id: update the row's fields in place; absent fields keep their
    ///   stored value
    pub async fn apply_changes(
        conn: &mut PgConnection,
        product_id: DbId,
        changes: &[OptionChange],
    ) -> Result<(), sqlx::Error> {
        for change in changes {
            match change.id {
                Some(id) if change.deleted => {
                    sqlx::query("DELETE FROM product_options WHERE id = $1 AND product_id = $2")
                        .bind(id)
                        .bind(product_id)
                        .execute(&mut *conn)
                        .await?;
                }
                Some(id) => {
                    sqlx::query(
                        r#"UPDATE product_options
                           SET title = COALESCE($3, title),
                               shape = COALESCE($4, shape),
                               radius = COALESCE($5, radius),
                               type = COALESCE($6, type),
                               "values" = COALESCE($7, "values"),
                               updated_at = now()
                           WHERE id = $1 AND product_id = $2"#,
                    )
                    .bind(id)
                    .bind(product_id)
                    .bind(change.title.as_deref())
                    .bind(change.shape.map(|s| s.as_str()))
                    .bind(change.radius)
                    .bind(change.option_type.map(|t| t.as_str()))
                    .bind(change.values.as_deref().map(|v| v.join(",")))
                    .execute(&mut *conn)
                    .await?;
                }
                None => {
                    Self::insert(conn, product_id, change).await?;
                }
            }
        }
        Ok(())
    }

    /// Insert one option row, applying the documented defaults.
    pub async fn insert(
        conn: &mut PgConnection,
        product_id: DbId,
        change: &OptionChange,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"INSERT INTO product_options (product_id, title, shape, radius, type, "values")
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(product_id)
        .bind(change.title.as_deref().unwrap_or_default())
        .bind(change.shape.unwrap_or_default().as_str())
        .bind(change.radius.unwrap_or(0))
        .bind(change.option_type.unwrap_or_default().as_str())
        .bind(change.joined_values())
        .execute(conn)
        .await?;
        Ok(())
    }
}
