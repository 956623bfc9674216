//! Repository for the `categories` table.

use sqlx::{PgConnection, PgExecutor};
use todorank_core::types::DbId;

use crate::models::category::Category;

/// Column list for category queries, including the live todo count.
const COLUMNS: &str = "c.id, c.owner_id, c.name, c.date_created, c.audit_date_created, \
    c.audit_date_modified, \
    (SELECT COUNT(*) FROM todos t WHERE t.category_id = c.id) AS todo_count";

/// Provides CRUD operations for categories. Every query is scoped to an owner.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List an owner's categories in creation order.
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        owner_id: DbId,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories c \
             WHERE c.owner_id = $1 \
             ORDER BY c.audit_date_created ASC, c.id ASC"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(owner_id)
            .fetch_all(executor)
            .await
    }

    /// Find a category by its ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories c WHERE c.owner_id = $1 AND c.id = $2");
        sqlx::query_as::<_, Category>(&query)
            .bind(owner_id)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a category by its name.
    pub async fn find_by_name<'e, E: PgExecutor<'e>>(
        executor: E,
        owner_id: DbId,
        name: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM categories c WHERE c.owner_id = $1 AND c.name = $2");
        sqlx::query_as::<_, Category>(&query)
            .bind(owner_id)
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    /// Whether a category other than `exclude_id` already uses `name`.
    pub async fn name_taken<'e, E: PgExecutor<'e>>(
        executor: E,
        owner_id: DbId,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let (taken,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(\
                SELECT 1 FROM categories \
                WHERE owner_id = $1 AND name = $2 AND ($3::BIGINT IS NULL OR id <> $3)\
             )",
        )
        .bind(owner_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_one(executor)
        .await?;
        Ok(taken)
    }

    /// Insert a category, returning its new ID.
    pub async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        owner_id: DbId,
        name: &str,
    ) -> Result<DbId, sqlx::Error> {
        let (id,): (DbId,) =
            sqlx::query_as("INSERT INTO categories (owner_id, name) VALUES ($1, $2) RETURNING id")
                .bind(owner_id)
                .bind(name)
                .fetch_one(executor)
                .await?;
        Ok(id)
    }

    /// Rename a category. Returns `true` if a row was updated.
    pub async fn rename<'e, E: PgExecutor<'e>>(
        executor: E,
        owner_id: DbId,
        id: DbId,
        name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE categories SET name = $3, audit_date_modified = NOW() \
             WHERE owner_id = $1 AND id = $2",
        )
        .bind(owner_id)
        .bind(id)
        .bind(name)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a category and, through the foreign key, all its todos.
    /// Returns `true` if a row was deleted.
    pub async fn delete<'e, E: PgExecutor<'e>>(
        executor: E,
        owner_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count an owner's categories.
    pub async fn count<'e, E: PgExecutor<'e>>(
        executor: E,
        owner_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    /// Lock the given category rows until the transaction ends.
    ///
    /// Rows are locked in ascending id order so two transactions touching
    /// the same pair of categories cannot deadlock. Every operation that
    /// rewrites ranks takes this lock before reading them.
    pub async fn lock(conn: &mut PgConnection, ids: &[DbId]) -> Result<(), sqlx::Error> {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        sqlx::query("SELECT id FROM categories WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(&ids)
            .fetch_all(conn)
            .await?;
        Ok(())
    }
}
