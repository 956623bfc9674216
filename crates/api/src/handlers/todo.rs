//! Handlers for the `/todos` resource.
//!
//! Mutations go through [`RankingEngine`], which keeps ranks unique among
//! the not-done todos of each category. Reads go straight to the repository.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use todorank_core::error::CoreError;
use todorank_core::ranking::RankAssignment;
use todorank_core::types::DbId;
use todorank_db::models::todo::{CreateTodo, UpdateTodo};
use todorank_db::ranking_engine::RankingEngine;
use todorank_db::repositories::{CategoryRepo, TodoRepo};

use crate::error::AppResult;
use crate::middleware::owner::OwnerScope;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// GET /api/v1/todos
///
/// All of the owner's todos, ordered by category name, then not-done before
/// done, then rank.
pub async fn list(
    OwnerScope(owner_id): OwnerScope,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let todos = TodoRepo::list_for_owner(&state.pool, owner_id).await?;
    Ok(Json(DataResponse { data: todos }))
}

/// GET /api/v1/todos/category/{name}
pub async fn list_by_category(
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
    let todos = TodoRepo::list_for_category(&state.pool, owner_id, category.id).await?;
    Ok(Json(DataResponse { data: todos }))
}

/// GET /api/v1/todos/{id}
pub async fn get_by_id(
    OwnerScope(owner_id): OwnerScope,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let todo = TodoRepo::find_by_id(&state.pool, owner_id, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Todo", id })?;
    Ok(Json(DataResponse { data: todo }))
}

// ---------------------------------------------------------------------------
// Ranking mutations
// ---------------------------------------------------------------------------

/// POST /api/v1/todos
///
/// Create a todo. An active todo already holding the rank is shifted down
/// together with everything below it.
pub async fn create(
    OwnerScope(owner_id): OwnerScope,
    State(state): State<AppState>,
    Json(input): Json<CreateTodo>,
) -> AppResult<impl IntoResponse> {
    input.validate_input()?;
    let todo = RankingEngine::create(&state.pool, owner_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: todo })))
}

/// PUT /api/v1/todos/{id}
///
/// Partial update; absent fields are left unchanged.
pub async fn update(
    OwnerScope(owner_id): OwnerScope,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTodo>,
) -> AppResult<impl IntoResponse> {
    input.validate_input()?;
    let todo = RankingEngine::update(&state.pool, owner_id, id, &input).await?;
    Ok(Json(DataResponse { data: todo }))
}

/// PATCH /api/v1/todos/{id}/toggle
pub async fn toggle(
    OwnerScope(owner_id): OwnerScope,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let todo = RankingEngine::toggle(&state.pool, owner_id, id).await?;
    Ok(Json(DataResponse { data: todo }))
}

/// PUT /api/v1/todos/reorder
///
/// Apply a full rank permutation in one transaction. Any unknown id rejects
/// the whole batch.
pub async fn reorder(
    OwnerScope(owner_id): OwnerScope,
    State(state): State<AppState>,
    Json(batch): Json<Vec<RankAssignment>>,
) -> AppResult<impl IntoResponse> {
    let todos = RankingEngine::reorder(&state.pool, owner_id, &batch).await?;
    Ok(Json(DataResponse { data: todos }))
}

/// DELETE /api/v1/todos/{id}
pub async fn delete(
    OwnerScope(owner_id): OwnerScope,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    RankingEngine::delete(&state.pool, owner_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
