//! Repository for the `categories` table.

use catalog_core::pagination::PageParams;
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryData};

const COLUMNS: &str = "id, name, slug, use_in_menu, created_at, updated_at";

/// Provides CRUD and paginated search for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    ///
    /// Name and slug uniqueness come from the `uq_categories_*` constraints.
    pub async fn create(pool: &PgPool, input: &CategoryData) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, slug, use_in_menu)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.use_in_menu)
            .fetch_one(pool)
            .await
    }

    /// Find a category by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a category's fields. Returns `false` if no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CategoryData,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE categories
             SET name = $2, slug = $3, use_in_menu = $4, updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(input.use_in_menu)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a category by id. Join rows cascade. Returns `false` if no
    /// row matched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Paginated search with an optional `use_in_menu` filter.
    ///
    /// Returns the page of rows (ordered by ascending id) and the total
    /// count of rows matching the filter regardless of pagination.
    pub async fn search(
        pool: &PgPool,
        use_in_menu: Option<bool>,
        page: &PageParams,
    ) -> Result<(Vec<Category>, i64), sqlx::Error> {
        let total: i64 = match use_in_menu {
            Some(flag) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE use_in_menu = $1")
                    .bind(flag)
                    .fetch_one(pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM categories")
                    .fetch_one(pool)
                    .await?
            }
        };

        let mut builder = sqlx::QueryBuilder::new(format!("SELECT {COLUMNS} FROM categories"));
        if let Some(flag) = use_in_menu {
            builder.push(" WHERE use_in_menu = ").push_bind(flag);
        }
        builder.push(" ORDER BY id ASC");
        if let Some(offset) = page.offset() {
            builder.push(" LIMIT ").push_bind(page.limit);
            builder.push(" OFFSET ").push_bind(offset);
        }

        let rows = builder.build_query_as::<Category>().fetch_all(pool).await?;
        Ok((rows, total))
    }
}
