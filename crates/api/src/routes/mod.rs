//! Route tree assembly. Each resource contributes its own sub-router;
//! everything under `/v1` except the health probe.

pub mod category;
pub mod health;
pub mod product;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// All `/v1` routes.
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/user", user::router())
        .nest("/category", category::router())
        .nest("/product", product::router())
}
