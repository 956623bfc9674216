//! Transactional ranking engine for todos.
//!
//! Every public operation runs in one Postgres transaction. Operations that
//! rewrite ranks first lock the affected category rows, then read the
//! not-done ranks, plan the shift with [`todorank_core::ranking`], and write
//! one row per moved todo. Any error drops the transaction, which rolls back
//! every shift written so far.

use sqlx::{PgConnection, PgPool};
use todorank_core::error::CoreError;
use todorank_core::ranking::{self, RankAssignment};
use todorank_core::types::DbId;

use crate::category_resolver::CategoryResolver;
use crate::error::StoreResult;
use crate::models::todo::{CreateTodo, Todo, UpdateTodo};
use crate::repositories::todo_repo::{NewTodo, TodoChanges};
use crate::repositories::{CategoryRepo, TodoRepo};

pub struct RankingEngine;

impl RankingEngine {
    /// Create a todo at the requested rank, shifting active todos at or
    /// above that rank up by one if the rank is taken.
    pub async fn create(pool: &PgPool, owner_id: DbId, input: &CreateTodo) -> StoreResult<Todo> {
        let mut tx = pool.begin().await?;

        let category = CategoryResolver::resolve(&mut tx, owner_id, input.category_ref()?).await?;
        CategoryRepo::lock(&mut tx, &[category.id]).await?;

        let shifted = Self::make_room(&mut tx, owner_id, category.id, input.rank, None).await?;

        let id = TodoRepo::insert(
            &mut tx,
            &NewTodo {
                owner_id,
                category_id: category.id,
                title: &input.title,
                description: input.description.as_deref(),
                rank: input.rank,
                done: input.done.unwrap_or(false),
            },
        )
        .await?;
        let todo = Self::reload(&mut tx, owner_id, id).await?;

        tx.commit().await?;
        tracing::info!(
            owner_id,
            todo_id = id,
            category_id = category.id,
            rank = todo.rank,
            shifted,
            "Todo created",
        );
        Ok(todo)
    }

    /// Apply a partial update.
    ///
    /// A rank change (or a move to another category) runs the shift in the
    /// destination category, never moving the todo itself. A category move
    /// leaves a gap in the source category.
    pub async fn update(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateTodo,
    ) -> StoreResult<Todo> {
        let mut tx = pool.begin().await?;

        let snapshot = TodoRepo::find_by_id(&mut *tx, owner_id, id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Todo", id })?;

        let destination = match input.category_ref() {
            Some(reference) if !reference.matches(snapshot.category_id, &snapshot.category_name) => {
                Some(CategoryResolver::resolve(&mut tx, owner_id, reference).await?)
            }
            _ => None,
        };
        let destination_id = destination
            .as_ref()
            .map_or(snapshot.category_id, |category| category.id);
        CategoryRepo::lock(&mut tx, &[snapshot.category_id, destination_id]).await?;

        // Re-read under the category locks: a concurrent shift may have moved it.
        let current = TodoRepo::find_by_id_for_update(&mut tx, owner_id, id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Todo", id })?;
        // Moved between the snapshot and the lock: its category is not held yet.
        // The row lock above keeps it from moving again.
        if current.category_id != snapshot.category_id && current.category_id != destination_id {
            CategoryRepo::lock(&mut tx, &[current.category_id]).await?;
        }
        let category_id = destination
            .as_ref()
            .map_or(current.category_id, |category| category.id);

        let rank = input.rank.unwrap_or(current.rank);
        let moved = category_id != current.category_id;
        let shifted = if moved || rank != current.rank {
            Self::make_room(&mut tx, owner_id, category_id, rank, Some(id)).await?
        } else {
            0
        };

        let changes = TodoChanges {
            category_id,
            rank,
            title: input.title.as_set().map(String::as_str),
            description: input.description.as_set().map(Option::as_deref),
            done: input.done.as_set().copied(),
        };
        TodoRepo::apply_changes(&mut tx, owner_id, id, &changes).await?;
        let todo = Self::reload(&mut tx, owner_id, id).await?;

        tx.commit().await?;
        tracing::info!(
            owner_id,
            todo_id = id,
            category_id,
            from_rank = current.rank,
            rank,
            moved,
            shifted,
            "Todo updated",
        );
        Ok(todo)
    }

    /// Flip `done`. Ranks are left as they are.
    pub async fn toggle(pool: &PgPool, owner_id: DbId, id: DbId) -> StoreResult<Todo> {
        let mut tx = pool.begin().await?;

        if !TodoRepo::toggle_done(&mut *tx, owner_id, id).await? {
            return Err(CoreError::NotFound { entity: "Todo", id }.into());
        }
        let todo = Self::reload(&mut tx, owner_id, id).await?;

        tx.commit().await?;
        tracing::info!(owner_id, todo_id = id, done = todo.done, "Todo toggled");
        Ok(todo)
    }

    /// Apply a caller-supplied rank permutation as one batch.
    ///
    /// No shift runs: the caller sends the complete ordering. The first
    /// unknown id aborts the batch and nothing is written. Returns the
    /// refreshed todos in the order they were supplied.
    pub async fn reorder(
        pool: &PgPool,
        owner_id: DbId,
        batch: &[RankAssignment],
    ) -> StoreResult<Vec<Todo>> {
        ranking::validate_reorder(batch)?;
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = pool.begin().await?;

        let ids: Vec<DbId> = batch.iter().map(|entry| entry.id).collect();
        let category_ids = TodoRepo::category_ids(&mut tx, owner_id, &ids).await?;
        CategoryRepo::lock(&mut tx, &category_ids).await?;

        for entry in batch {
            if !TodoRepo::set_rank(&mut tx, owner_id, entry.id, entry.rank).await? {
                tracing::warn!(
                    owner_id,
                    todo_id = entry.id,
                    batch_len = batch.len(),
                    "Reorder rejected: unknown todo, rolling back",
                );
                return Err(CoreError::NotFound {
                    entity: "Todo",
                    id: entry.id,
                }
                .into());
            }
        }

        let mut todos = Vec::with_capacity(batch.len());
        for entry in batch {
            todos.push(Self::reload(&mut tx, owner_id, entry.id).await?);
        }

        tx.commit().await?;
        tracing::info!(owner_id, count = todos.len(), "Todos reordered");
        Ok(todos)
    }

    /// Delete a todo. Sibling ranks are not compacted.
    pub async fn delete(pool: &PgPool, owner_id: DbId, id: DbId) -> StoreResult<()> {
        if !TodoRepo::delete(pool, owner_id, id).await? {
            return Err(CoreError::NotFound { entity: "Todo", id }.into());
        }
        tracing::info!(owner_id, todo_id = id, "Todo deleted");
        Ok(())
    }

    /// Free `rank` in a category by shifting active todos, returning how many
    /// moved. The caller must hold the category lock.
    async fn make_room(
        conn: &mut PgConnection,
        owner_id: DbId,
        category_id: DbId,
        rank: i32,
        exclude: Option<DbId>,
    ) -> StoreResult<usize> {
        let active = TodoRepo::active_ranks(&mut *conn, category_id).await?;
        let plan = ranking::plan_shift(&active, rank, exclude)?;

        for step in &plan {
            TodoRepo::set_rank(&mut *conn, owner_id, step.id, step.to).await?;
            tracing::debug!(
                category_id,
                todo_id = step.id,
                from = step.from,
                to = step.to,
                "Shifted todo rank",
            );
        }
        Ok(plan.len())
    }

    async fn reload(conn: &mut PgConnection, owner_id: DbId, id: DbId) -> StoreResult<Todo> {
        let todo = TodoRepo::find_by_id(&mut *conn, owner_id, id)
            .await?
            .ok_or_else(|| CoreError::Internal(format!("Todo {id} vanished inside its transaction")))?;
        Ok(todo)
    }
}
