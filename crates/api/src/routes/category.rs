//! Route definitions for categories.

use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// GET    /name/{name}   -> get_by_name
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::list).post(category::create))
        .route(
            "/{id}",
            get(category::get_by_id)
                .put(category::update)
                .delete(category::delete),
        )
        .route("/name/{name}", get(category::get_by_name))
}
