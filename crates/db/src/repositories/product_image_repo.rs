//! Repository for the `product_images` table.
//!
//! Besides plain listing, this hosts the per-item reconciliation applied
//! when a product is created or updated: each submitted entry either
//! inserts, updates, or deletes one child row scoped to its product.

use catalog_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::product::{ImageChange, ProductImage};

/// Provides listing and reconciliation for product images.
pub struct ProductImageRepo;

impl ProductImageRepo {
    /// List images for a set of products, ordered by id.
    pub async fn list_for_products(
        pool: &PgPool,
        product_ids: &[DbId],
    ) -> Result<Vec<ProductImage>, sqlx::Error> {
        sqlx::query_as::<_, ProductImage>(
            "SELECT id, product_id, path FROM product_images
             WHERE product_id = ANY($1)
             ORDER BY id ASC",
        )
        .bind(product_ids)
        .fetch_all(pool)
        .await
    }

    /// Apply a submitted image array to a product's children, one statement
    /// per entry, inside the caller's transaction.
    ///
    /// - no id + content: insert a new row with a generated stored path
    /// - id + deleted: delete the row scoped to (id, product_id); silently
    ///   a no-op when the id belongs to another product
    /// - id + content: replace the stored path in place
    pub async fn apply_changes(
        conn: &mut PgConnection,
        product_id: DbId,
        changes: &[ImageChange],
    ) -> Result<(), sqlx::Error> {
        for change in changes {
            match change.id {
                Some(id) if change.deleted => {
                    sqlx::query("DELETE FROM product_images WHERE id = $1 AND product_id = $2")
                        .bind(id)
                        .bind(product_id)
                        .execute(&mut *conn)
                        .await?;
                }
                Some(id) => {
                    if let Some(content) = &change.content {
                        sqlx::query(
                            "UPDATE product_images
                             SET path = $3, updated_at = now()
                             WHERE id = $1 AND product_id = $2",
                        )
                        .bind(id)
                        .bind(product_id)
                        .bind(content)
                        .execute(&mut *conn)
                        .await?;
                    }
                }
                None => {
                    if change.content.is_some() {
                        Self::insert_generated(conn, product_id).await?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Insert one image row with a generated stored path.
    ///
    /// The submitted content stands in for an upload; the stored path is
    /// where the CDN copy would land, keyed by product id and timestamp.
    pub async fn insert_generated(
        conn: &mut PgConnection,
        product_id: DbId,
    ) -> Result<(), sqlx::Error> {
        let path = generated_path(product_id);
        sqlx::query("INSERT INTO product_images (product_id, path) VALUES ($1, $2)")
            .bind(product_id)
            .bind(path)
            .execute(conn)
            .await?;
        Ok(())
    }
}

fn generated_path(product_id: DbId) -> String {
    let stamp = chrono::Utc::now().timestamp_millis();
    format!("https://cdn.example.com/products/{product_id}/{stamp}.jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_path_is_scoped_to_product() {
        let path = generated_path(42);
        assert!(path.starts_with("https://cdn.example.com/products/42/"));
        assert!(path.ends_with(".jpg"));
    }
}
