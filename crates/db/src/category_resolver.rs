//! Category lookups and mutations with their business rules.
//!
//! Names are unique per owner. The check runs inside the write transaction;
//! the `uq_categories_owner_name` constraint backs it up against races.

use sqlx::{PgConnection, PgPool};
use todorank_core::category::DEFAULT_CATEGORIES;
use todorank_core::error::CoreError;
use todorank_core::types::DbId;

use crate::error::StoreResult;
use crate::models::category::{Category, CategoryRef, CreateCategory, UpdateCategory};
use crate::repositories::CategoryRepo;

pub struct CategoryResolver;

impl CategoryResolver {
    /// Resolve a reference to a category owned by `owner_id`.
    pub async fn resolve(
        conn: &mut PgConnection,
        owner_id: DbId,
        reference: CategoryRef<'_>,
    ) -> StoreResult<Category> {
        let category = match reference {
            CategoryRef::Id(id) => CategoryRepo::find_by_id(&mut *conn, owner_id, id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Category",
                    id,
                })?,
            CategoryRef::Name(name) => CategoryRepo::find_by_name(&mut *conn, owner_id, name)
                .await?
                .ok_or_else(|| CoreError::NotFoundByName {
                    entity: "Category",
                    name: name.to_string(),
                })?,
        };
        Ok(category)
    }

    /// Create a category, failing with `Conflict` if the name is taken.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateCategory,
    ) -> StoreResult<Category> {
        let mut tx = pool.begin().await?;

        if CategoryRepo::name_taken(&mut *tx, owner_id, &input.name, None).await? {
            return Err(duplicate_name(&input.name).into());
        }
        let id = CategoryRepo::insert(&mut *tx, owner_id, &input.name).await?;
        let category = Self::resolve(&mut tx, owner_id, CategoryRef::Id(id)).await?;

        tx.commit().await?;
        tracing::info!(owner_id, category_id = id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Rename a category, failing with `Conflict` if another category of the
    /// same owner already has the new name.
    pub async fn rename(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateCategory,
    ) -> StoreResult<Category> {
        let mut tx = pool.begin().await?;

        let current = Self::resolve(&mut tx, owner_id, CategoryRef::Id(id)).await?;
        if CategoryRepo::name_taken(&mut *tx, owner_id, &input.name, Some(id)).await? {
            return Err(duplicate_name(&input.name).into());
        }
        CategoryRepo::rename(&mut *tx, owner_id, id, &input.name).await?;
        let category = Self::resolve(&mut tx, owner_id, CategoryRef::Id(id)).await?;

        tx.commit().await?;
        tracing::info!(
            owner_id,
            category_id = id,
            from = %current.name,
            to = %category.name,
            "Category renamed",
        );
        Ok(category)
    }

    /// Delete a category together with all of its todos.
    pub async fn delete(pool: &PgPool, owner_id: DbId, id: DbId) -> StoreResult<()> {
        if !CategoryRepo::delete(pool, owner_id, id).await? {
            return Err(CoreError::NotFound {
                entity: "Category",
                id,
            }
            .into());
        }
        tracing::info!(owner_id, category_id = id, "Category deleted with its todos");
        Ok(())
    }

    /// Create the built-in categories for an owner that has none yet.
    ///
    /// Returns the created categories; empty if the owner already had any.
    pub async fn seed_defaults(pool: &PgPool, owner_id: DbId) -> StoreResult<Vec<Category>> {
        let mut tx = pool.begin().await?;

        if CategoryRepo::count(&mut *tx, owner_id).await? > 0 {
            tracing::info!(owner_id, "Categories already exist, skipping seed");
            return Ok(Vec::new());
        }

        let mut created = Vec::with_capacity(DEFAULT_CATEGORIES.len());
        for name in DEFAULT_CATEGORIES {
            let id = CategoryRepo::insert(&mut *tx, owner_id, name).await?;
            created.push(Self::resolve(&mut tx, owner_id, CategoryRef::Id(id)).await?);
        }

        tx.commit().await?;
        tracing::info!(owner_id, count = created.len(), "Default categories created");
        Ok(created)
    }
}

fn duplicate_name(name: &str) -> CoreError {
    CoreError::Conflict(format!("Category with name '{name}' already exists"))
}
