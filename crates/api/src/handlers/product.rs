//! Product CRUD and search handlers.
//!
//! Search accepts dynamic `option[<id>]` keys, so it extracts the raw query
//! pairs instead of a fixed struct. Field projection happens here: the
//! repository always returns full rows and the handler shapes the response.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::filters::{
    parse_category_ids, parse_option_filters, parse_price_range, parse_product_fields,
    ProductFields,
};
use catalog_core::pagination::PageParams;
use catalog_core::types::DbId;
use catalog_db::models::product::{
    ImageChange, OptionChange, Product, ProductData, ProductSearch, ProductSearchFilter,
};
use catalog_db::repositories::{ProductImageRepo, ProductOptionRepo, ProductRepo};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::PageResponse;
use crate::state::AppState;

use super::{missing_fields, present};

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub enabled: Option<bool>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub stock: Option<i32>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub price_with_discount: Option<f64>,
    pub category_ids: Option<Vec<DbId>>,
    pub images: Option<Vec<ImageChange>>,
    pub options: Option<Vec<OptionChange>>,
}

/// `GET /v1/product/search`.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<PageResponse<Value>>> {
    let mut limit = None;
    let mut page = None;
    let mut fields = None;
    let mut matches = None;
    let mut category_ids = None;
    let mut price_range = None;

    for (key, value) in &params {
        match key.as_str() {
            "limit" => limit = Some(value.as_str()),
            "page" => page = Some(value.as_str()),
            "fields" => fields = Some(value.as_str()),
            "match" => matches = Some(value.clone()),
            "category_ids" => category_ids = Some(value.as_str()),
            "price-range" => price_range = Some(value.as_str()),
            // option[<id>] keys are collected below; anything else ignored.
            _ => {}
        }
    }

    let page = PageParams::parse(limit, page)?;
    let fields = parse_product_fields(fields.unwrap_or(""))?;
    let search = ProductSearch {
        filter: ProductSearchFilter {
            matches,
            price_range: price_range.map(parse_price_range).transpose()?,
            category_ids: category_ids.map(parse_category_ids).unwrap_or_default(),
            option_filters: parse_option_filters(
                params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            ),
        },
        page,
    };

    let (rows, total) = ProductRepo::search(&state.pool, &search).await?;
    let reported = search.page.reported(rows.len());
    let loads = EagerLoads::fetch(&state, &rows, &fields).await?;

    let data = rows
        .iter()
        .map(|product| {
            let mut object = project_product(product, &fields.columns);
            loads.attach(&mut object, product.id, &fields);
            Value::Object(object)
        })
        .collect();

    Ok(Json(PageResponse::new(data, total, reported)))
}

/// `GET /v1/product/{id}` -- full row plus category ids, images, and
/// options.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id,
        })?;

    let all = ProductFields {
        columns: vec![],
        include_images: true,
        include_options: true,
    };
    let loads = EagerLoads::fetch(&state, std::slice::from_ref(&product), &all).await?;

    let mut object = match serde_json::to_value(&product)
        .map_err(|e| AppError::InternalError(format!("Serialization failed: {e}")))?
    {
        Value::Object(object) => object,
        _ => Map::new(),
    };
    loads.attach(&mut object, product.id, &all);

    Ok(Json(Value::Object(object)))
}

/// `POST /v1/product` -- create a product with its category links, images,
/// and options in one transaction. Requires authentication.
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ProductRequest>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let (data, category_ids, images, options) = validate(input)?;
    // Duplicate name trips uq_products_name (400); nothing is written.
    let product = ProductRepo::create(&state.pool, &data, &category_ids, &images, &options).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /v1/product/{id}` -- wholesale scalar update, category replacement,
/// and image/option reconciliation. Requires authentication.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ProductRequest>,
) -> AppResult<StatusCode> {
    let (data, category_ids, images, options) = validate(input)?;
    let updated =
        ProductRepo::update(&state.pool, id, &data, &category_ids, &images, &options).await?;
    if !updated {
        return Err(CoreError::NotFound {
            entity: "Product",
            id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /v1/product/{id}`. Requires authentication.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "Product",
            id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

type ValidatedProduct = (ProductData, Vec<DbId>, Vec<ImageChange>, Vec<OptionChange>);

fn validate(input: ProductRequest) -> Result<ValidatedProduct, CoreError> {
    if let Some(error) = missing_fields(&[
        ("enabled", input.enabled.is_some()),
        ("name", present(&input.name)),
        ("slug", present(&input.slug)),
        ("stock", input.stock.is_some()),
        ("description", present(&input.description)),
        ("price", input.price.is_some()),
        ("price_with_discount", input.price_with_discount.is_some()),
        ("category_ids", input.category_ids.is_some()),
        ("images", input.images.is_some()),
        ("options", input.options.is_some()),
    ]) {
        return Err(error);
    }

    let options = input.options.unwrap_or_default();
    // Insert entries (no id) must carry a title; updates may omit it.
    for option in &options {
        if option.id.is_none() && !option.deleted && !present(&option.title) {
            return Err(CoreError::Validation("Option title is required".into()));
        }
    }

    Ok((
        ProductData {
            enabled: input.enabled.unwrap_or_default(),
            name: input.name.unwrap_or_default(),
            slug: input.slug.unwrap_or_default(),
            stock: input.stock.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            price: input.price.unwrap_or_default(),
            price_with_discount: input.price_with_discount.unwrap_or_default(),
        },
        input.category_ids.unwrap_or_default(),
        input.images.unwrap_or_default(),
        options,
    ))
}

/// Per-product child data fetched once for a whole result page.
///
/// `category_ids` is always loaded; images and options only when the
/// corresponding pseudo-field was requested.
struct EagerLoads {
    category_ids: HashMap<DbId, Vec<DbId>>,
    images: HashMap<DbId, Vec<Value>>,
    options: HashMap<DbId, Vec<Value>>,
}

impl EagerLoads {
    async fn fetch(
        state: &AppState,
        products: &[Product],
        fields: &ProductFields,
    ) -> Result<Self, AppError> {
        let ids: Vec<DbId> = products.iter().map(|p| p.id).collect();

        let mut category_ids: HashMap<DbId, Vec<DbId>> = HashMap::new();
        for (product_id, category_id) in ProductRepo::category_ids_for(&state.pool, &ids).await? {
            category_ids.entry(product_id).or_default().push(category_id);
        }

        let mut images: HashMap<DbId, Vec<Value>> = HashMap::new();
        if fields.include_images {
            for image in ProductImageRepo::list_for_products(&state.pool, &ids).await? {
                images
                    .entry(image.product_id)
                    .or_default()
                    .push(json!({ "id": image.id, "path": image.path }));
            }
        }

        let mut options: HashMap<DbId, Vec<Value>> = HashMap::new();
        if fields.include_options {
            for option in ProductOptionRepo::list_for_products(&state.pool, &ids).await? {
                let product_id = option.product_id;
                let value = serde_json::to_value(&option)
                    .map_err(|e| AppError::InternalError(format!("Serialization failed: {e}")))?;
                options.entry(product_id).or_default().push(value);
            }
        }

        Ok(Self {
            category_ids,
            images,
            options,
        })
    }

    fn attach(&self, object: &mut Map<String, Value>, product_id: DbId, fields: &ProductFields) {
        let category_ids = self.category_ids.get(&product_id).cloned().unwrap_or_default();
        object.insert("category_ids".into(), json!(category_ids));

        if fields.include_images {
            let images = self.images.get(&product_id).cloned().unwrap_or_default();
            object.insert("images".into(), Value::Array(images));
        }
        if fields.include_options {
            let options = self.options.get(&product_id).cloned().unwrap_or_default();
            object.insert("options".into(), Value::Array(options));
        }
    }
}

/// Project a product row onto the requested scalar columns.
fn project_product(product: &Product, columns: &[String]) -> Map<String, Value> {
    let mut object = Map::new();
    for column in columns {
        let value = match column.as_str() {
            "id" => json!(product.id),
            "enabled" => json!(product.enabled),
            "name" => json!(product.name),
            "slug" => json!(product.slug),
            "stock" => json!(product.stock),
            "description" => json!(product.description),
            "price" => json!(product.price),
            "price_with_discount" => json!(product.price_with_discount),
            _ => continue,
        };
        object.insert(column.clone(), value);
    }
    object
}
