//! `/v1/product` routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(product::search))
        .route("/", post(product::create))
        .route(
            "/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        )
}
