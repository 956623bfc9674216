//! Route definitions for todos.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::todo;
use crate::state::AppState;

/// Routes mounted at `/todos`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// PUT    /reorder           -> reorder
/// GET    /category/{name}   -> list_by_category
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// PATCH  /{id}/toggle       -> toggle
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(todo::list).post(todo::create))
        .route("/reorder", put(todo::reorder))
        .route("/category/{name}", get(todo::list_by_category))
        .route(
            "/{id}",
            get(todo::get_by_id).put(todo::update).delete(todo::delete),
        )
        .route("/{id}/toggle", patch(todo::toggle))
}
