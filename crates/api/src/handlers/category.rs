//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use todorank_core::error::CoreError;
use todorank_core::types::DbId;
use todorank_db::category_resolver::CategoryResolver;
use todorank_db::models::category::{CreateCategory, UpdateCategory};
use todorank_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::middleware::owner::OwnerScope;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// List the owner's categories in creation order.
pub async fn list(
    OwnerScope(owner_id): OwnerScope,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool, owner_id).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    OwnerScope(owner_id): OwnerScope,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, owner_id, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Category",
            id,
        })?;
    Ok(Json(DataResponse { data: category }))
}

/// GET /api/v1/categories/name/{name}
pub async fn get_by_name(
    OwnerScope(owner_id): OwnerScope,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_name(&state.pool, owner_id, &name)
        .await?
        .ok_or_else(|| CoreError::NotFoundByName {
            entity: "Category",
            name: name.clone(),
        })?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /api/v1/categories
///
/// Create a category. Returns 409 if the owner already has one with this name.
pub async fn create(
    OwnerScope(owner_id): OwnerScope,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate_input()?;
    let category = CategoryResolver::create(&state.pool, owner_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/categories/{id}
///
/// Rename a category. Returns 409 if another category already has the name.
pub async fn update(
    OwnerScope(owner_id): OwnerScope,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate_input()?;
    let category = CategoryResolver::rename(&state.pool, owner_id, id, &input).await?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Delete a category and all of its todos.
pub async fn delete(
    OwnerScope(owner_id): OwnerScope,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    CategoryResolver::delete(&state.pool, owner_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
