//! `/v1/user` routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, user};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/token", post(auth::generate))
        .route("/", post(user::create))
        .route(
            "/{id}",
            get(user::get_by_id).put(user::update).delete(user::delete),
        )
}
