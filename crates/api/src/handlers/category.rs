//! Category CRUD and search handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::filters::{parse_bool_param, parse_category_fields};
use catalog_core::pagination::PageParams;
use catalog_core::types::DbId;
use catalog_db::models::category::{Category, CategoryData};
use catalog_db::repositories::CategoryRepo;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::PageResponse;
use crate::state::AppState;

use super::{missing_fields, present};

/// Raw query parameters for `GET /v1/category/search`.
///
/// `limit` and `page` stay strings so their error messages can distinguish
/// non-numeric input from out-of-range values.
#[derive(Debug, Deserialize)]
pub struct CategorySearchQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
    pub fields: Option<String>,
    pub use_in_menu: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub use_in_menu: Option<bool>,
}

/// `GET /v1/category/search` -- paginated listing with field projection and
/// an optional `use_in_menu` filter.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<CategorySearchQuery>,
) -> AppResult<Json<PageResponse<Value>>> {
    let page = PageParams::parse(query.limit.as_deref(), query.page.as_deref())?;
    let columns = parse_category_fields(query.fields.as_deref().unwrap_or("name,slug"))?;
    let use_in_menu = query
        .use_in_menu
        .as_deref()
        .map(|raw| parse_bool_param("use_in_menu", raw))
        .transpose()?;

    let (rows, total) = CategoryRepo::search(&state.pool, use_in_menu, &page).await?;
    let reported = page.reported(rows.len());

    let data = rows
        .iter()
        .map(|category| project_category(category, &columns))
        .collect();

    Ok(Json(PageResponse::new(data, total, reported)))
}

/// `GET /v1/category/{id}`.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Category",
            id,
        })?;
    Ok(Json(category))
}

/// `POST /v1/category`. Requires authentication.
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CategoryRequest>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let data = validate(input)?;
    // Duplicate name or slug trips a uq_categories_* constraint (400).
    let category = CategoryRepo::create(&state.pool, &data).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// `PUT /v1/category/{id}` -- wholesale update. Requires authentication.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CategoryRequest>,
) -> AppResult<StatusCode> {
    let data = validate(input)?;
    let updated = CategoryRepo::update(&state.pool, id, &data).await?;
    if !updated {
        return Err(CoreError::NotFound {
            entity: "Category",
            id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /v1/category/{id}`. Requires authentication.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "Category",
            id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

fn validate(input: CategoryRequest) -> Result<CategoryData, CoreError> {
    if let Some(error) = missing_fields(&[
        ("name", present(&input.name)),
        ("slug", present(&input.slug)),
        ("use_in_menu", input.use_in_menu.is_some()),
    ]) {
        return Err(error);
    }

    Ok(CategoryData {
        name: input.name.unwrap_or_default(),
        slug: input.slug.unwrap_or_default(),
        use_in_menu: input.use_in_menu.unwrap_or_default(),
    })
}

/// Project a category row onto the requested columns.
fn project_category(category: &Category, columns: &[String]) -> Value {
    let mut object = Map::new();
    for column in columns {
        let value = match column.as_str() {
            "id" => json!(category.id),
            "name" => json!(category.name),
            "slug" => json!(category.slug),
            "use_in_menu" => json!(category.use_in_menu),
            _ => continue,
        };
        object.insert(column.clone(), value);
    }
    Value::Object(object)
}
