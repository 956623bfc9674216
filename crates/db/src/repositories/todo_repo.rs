//! Repository for the `todos` table.
//!
//! Row-level primitives only. Rank invariants are enforced by
//! [`crate::ranking_engine::RankingEngine`], which calls these inside a
//! transaction.

use sqlx::{PgConnection, PgExecutor};
use todorank_core::ranking::RankSlot;
use todorank_core::types::DbId;

use crate::models::todo::Todo;

/// Column list for todo queries, joined with `categories c` for the name.
const COLUMNS: &str = "t.id, t.owner_id, t.category_id, c.name AS category_name, t.title, \
    t.description, t.rank, t.done, t.date_created, t.audit_date_created, t.audit_date_modified";

/// Shared FROM clause for todo queries.
const FROM: &str = "FROM todos t JOIN categories c ON c.id = t.category_id";

/// Field values for a new todo row.
#[derive(Debug, Clone, Copy)]
pub struct NewTodo<'a> {
    pub owner_id: DbId,
    pub category_id: DbId,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub rank: i32,
    pub done: bool,
}

/// Resolved field values for an update. `None` leaves a column unchanged,
/// except `description`, where the outer `Option` says whether to write.
#[derive(Debug, Clone, Copy)]
pub struct TodoChanges<'a> {
    pub category_id: DbId,
    pub rank: i32,
    pub title: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub done: Option<bool>,
}

/// Provides queries and row writes for todos.
pub struct TodoRepo;

impl TodoRepo {
    /// List all of an owner's todos ordered by category name, then not-done
    /// before done, then rank.
    pub async fn list_for_owner<'e, E: PgExecutor<'e>>(
        executor: E,
        owner_id: DbId,
    ) -> Result<Vec<Todo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} {FROM} \
             WHERE t.owner_id = $1 \
             ORDER BY c.name ASC, t.done ASC, t.rank ASC, t.id ASC"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(owner_id)
            .fetch_all(executor)
            .await
    }

    /// List the todos of one category, not-done before done, then by rank.
    pub async fn list_for_category<'e, E: PgExecutor<'e>>(
        executor: E,
        owner_id: DbId,
        category_id: DbId,
    ) -> Result<Vec<Todo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} {FROM} \
             WHERE t.owner_id = $1 AND t.category_id = $2 \
             ORDER BY t.done ASC, t.rank ASC, t.id ASC"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(owner_id)
            .bind(category_id)
            .fetch_all(executor)
            .await
    }

    /// Find a todo by its ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {FROM} WHERE t.owner_id = $1 AND t.id = $2");
        sqlx::query_as::<_, Todo>(&query)
            .bind(owner_id)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a todo and lock its row until the transaction ends.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} {FROM} WHERE t.owner_id = $1 AND t.id = $2 FOR UPDATE OF t"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(owner_id)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Ranks of the not-done todos in a category, ascending.
    pub async fn active_ranks(
        conn: &mut PgConnection,
        category_id: DbId,
    ) -> Result<Vec<RankSlot>, sqlx::Error> {
        let rows: Vec<(DbId, i32)> = sqlx::query_as(
            "SELECT id, rank FROM todos \
             WHERE category_id = $1 AND done = false \
             ORDER BY rank ASC, id ASC",
        )
        .bind(category_id)
        .fetch_all(conn)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, rank)| RankSlot { id, rank })
            .collect())
    }

    /// Distinct category ids of the given todos that belong to the owner.
    pub async fn category_ids(
        conn: &mut PgConnection,
        owner_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT DISTINCT category_id FROM todos \
             WHERE owner_id = $1 AND id = ANY($2) \
             ORDER BY category_id",
        )
        .bind(owner_id)
        .bind(ids)
        .fetch_all(conn)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Insert a todo, returning its new ID.
    pub async fn insert(conn: &mut PgConnection, input: &NewTodo<'_>) -> Result<DbId, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO todos (owner_id, category_id, title, description, rank, done) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(input.owner_id)
        .bind(input.category_id)
        .bind(input.title)
        .bind(input.description)
        .bind(input.rank)
        .bind(input.done)
        .fetch_one(conn)
        .await?;
        Ok(id)
    }

    /// Set the rank of a todo. Returns `true` if a row was updated.
    pub async fn set_rank(
        conn: &mut PgConnection,
        owner_id: DbId,
        id: DbId,
        rank: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE todos SET rank = $3, audit_date_modified = NOW() \
             WHERE owner_id = $1 AND id = $2",
        )
        .bind(owner_id)
        .bind(id)
        .bind(rank)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Write the resolved changes of an update.
    pub async fn apply_changes(
        conn: &mut PgConnection,
        owner_id: DbId,
        id: DbId,
        changes: &TodoChanges<'_>,
    ) -> Result<bool, sqlx::Error> {
        let (write_description, description) = match changes.description {
            Some(value) => (true, value),
            None => (false, None),
        };
        let result = sqlx::query(
            "UPDATE todos SET \
                category_id = $3, \
                rank = $4, \
                title = COALESCE($5, title), \
                description = CASE WHEN $6 THEN $7 ELSE description END, \
                done = COALESCE($8, done), \
                audit_date_modified = NOW() \
             WHERE owner_id = $1 AND id = $2",
        )
        .bind(owner_id)
        .bind(id)
        .bind(changes.category_id)
        .bind(changes.rank)
        .bind(changes.title)
        .bind(write_description)
        .bind(description)
        .bind(changes.done)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip the `done` flag. Returns `true` if a row was updated.
    pub async fn toggle_done<'e, E: PgExecutor<'e>>(
        executor: E,
        owner_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE todos SET done = NOT done, audit_date_modified = NOW() \
             WHERE owner_id = $1 AND id = $2",
        )
        .bind(owner_id)
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a todo by ID. Returns `true` if a row was deleted.
    pub async fn delete<'e, E: PgExecutor<'e>>(
        executor: E,
        owner_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
