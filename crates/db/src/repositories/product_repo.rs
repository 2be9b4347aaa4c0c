//! Repository for the `products` table, its category links, and the
//! composite search query.
//!
//! Create and update are multi-statement operations (scalars, category
//! links, image/option reconciliation); both run inside a single
//! transaction so a failure partway through leaves no partial writes.

use catalog_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::models::product::{
    ImageChange, OptionChange, Product, ProductData, ProductSearch, ProductSearchFilter,
};
use crate::repositories::{ProductImageRepo, ProductOptionRepo};

const COLUMNS: &str = "id, enabled, name, slug, stock, description, price, price_with_discount, \
     created_at, updated_at";

/// Provides CRUD, category linking, and filtered search for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a product together with its category links, images, and
    /// options, atomically.
    ///
    /// Every submitted image entry yields one stored image with a generated
    /// path; options are inserted with their documented defaults. Name
    /// uniqueness comes from `uq_products_name`.
    pub async fn create(
        pool: &PgPool,
        data: &ProductData,
        category_ids: &[DbId],
        images: &[ImageChange],
        options: &[OptionChange],
    ) -> Result<Product, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO products
                 (enabled, name, slug, stock, description, price, price_with_discount)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(data.enabled)
            .bind(&data.name)
            .bind(&data.slug)
            .bind(data.stock)
            .bind(&data.description)
            .bind(data.price)
            .bind(data.price_with_discount)
            .fetch_one(&mut *tx)
            .await?;

        Self::replace_categories(&mut tx, product.id, category_ids).await?;

        for _ in images {
            ProductImageRepo::insert_generated(&mut tx, product.id).await?;
        }
        for option in options {
            ProductOptionRepo::insert(&mut tx, product.id, option).await?;
        }

        tx.commit().await?;
        Ok(product)
    }

    /// Find a product by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a product's scalar fields, category set, and reconcile its
    /// image/option children, atomically.
    ///
    /// Returns `false` (and writes nothing) when no product with the given
    /// id exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        data: &ProductData,
        category_ids: &[DbId],
        images: &[ImageChange],
        options: &[OptionChange],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE products
             SET enabled = $2, name = $3, slug = $4, stock = $5, description = $6,
                 price = $7, price_with_discount = $8, updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(data.enabled)
        .bind(&data.name)
        .bind(&data.slug)
        .bind(data.stock)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.price_with_discount)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back.
            return Ok(false);
        }

        Self::replace_categories(&mut tx, id, category_ids).await?;
        ProductImageRepo::apply_changes(&mut tx, id, images).await?;
        ProductOptionRepo::apply_changes(&mut tx, id, options).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Delete a product by id. Images, options, and category links cascade.
    /// Returns `false` if no row matched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Filtered, paginated search.
    ///
    /// Returns the page of full product rows (ordered by ascending id) and
    /// the total matching count ignoring pagination. Field projection
    /// happens in the handler; both queries share one filter builder so the
    /// count always agrees with the rows.
    pub async fn search(
        pool: &PgPool,
        search: &ProductSearch,
    ) -> Result<(Vec<Product>, i64), sqlx::Error> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM products");
        push_filters(&mut count, &search.filter);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM products"));
        push_filters(&mut builder, &search.filter);
        builder.push(" ORDER BY id ASC");
        if let Some(offset) = search.page.offset() {
            builder.push(" LIMIT ").push_bind(search.page.limit);
            builder.push(" OFFSET ").push_bind(offset);
        }

        let rows = builder.build_query_as::<Product>().fetch_all(pool).await?;
        Ok((rows, total))
    }

    /// Category ids for a set of products, as `(product_id, category_id)`
    /// pairs ordered by category id.
    pub async fn category_ids_for(
        pool: &PgPool,
        product_ids: &[DbId],
    ) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, DbId)>(
            "SELECT product_id, category_id FROM product_categories
             WHERE product_id = ANY($1)
             ORDER BY product_id, category_id",
        )
        .bind(product_ids)
        .fetch_all(pool)
        .await
    }

    /// Replace the category association set for a product.
    async fn replace_categories(
        conn: &mut PgConnection,
        product_id: DbId,
        category_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM product_categories WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *conn)
            .await?;

        if category_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO product_categories (product_id, category_id)
             SELECT $1, unnest($2::bigint[])
             ON CONFLICT DO NOTHING",
        )
        .bind(product_id)
        .bind(category_ids)
        .execute(conn)
        .await?;
        Ok(())
    }
}

/// Append the WHERE clause shared by the count and page queries.
///
/// Filters combine with AND. The option-filter clause matches a product
/// when at least one of its option rows has a filtered id AND a stored
/// value list overlapping that filter's values; distinct option ids
/// combine with OR (the documented, stakeholder-flagged policy).
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductSearchFilter) {
    builder.push(" WHERE 1=1");

    if let Some(term) = &filter.matches {
        let pattern = format!("%{term}%");
        builder.push(" AND (name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR description ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }

    if let Some((min, max)) = filter.price_range {
        builder.push(" AND price BETWEEN ");
        builder.push_bind(min);
        builder.push(" AND ");
        builder.push_bind(max);
    }

    if !filter.category_ids.is_empty() {
        builder.push(
            " AND EXISTS (SELECT 1 FROM product_categories pc \
             WHERE pc.product_id = products.id AND pc.category_id = ANY(",
        );
        builder.push_bind(filter.category_ids.clone());
        builder.push("))");
    }

    if !filter.option_filters.is_empty() {
        builder.push(
            " AND EXISTS (SELECT 1 FROM product_options po \
             WHERE po.product_id = products.id AND (",
        );
        let mut first = true;
        for (option_id, values) in &filter.option_filters {
            if !first {
                builder.push(" OR ");
            }
            first = false;
            builder.push("(po.id = ");
            builder.push_bind(*option_id);
            builder.push(" AND string_to_array(po.\"values\", ',') && ");
            builder.push_bind(values.clone());
            builder.push(")");
        }
        builder.push("))");
    }
}
