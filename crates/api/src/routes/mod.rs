pub mod category;
pub mod health;
pub mod todo;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                      list, create
/// /categories/{id}                 get, rename, delete
/// /categories/name/{name}          get by name
///
/// /todos                           list, create
/// /todos/reorder                   bulk reorder (PUT)
/// /todos/category/{name}           list by category
/// /todos/{id}                      get, update, delete
/// /todos/{id}/toggle               toggle done (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category::router())
        .nest("/todos", todo::router())
}
