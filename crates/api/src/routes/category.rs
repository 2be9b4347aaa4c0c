//! `/v1/category` routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(category::search))
        .route("/", post(category::create))
        .route(
            "/{id}",
            get(category::get_by_id)
                .put(category::update)
                .delete(category::delete),
        )
}
