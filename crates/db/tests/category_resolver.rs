//! Integration tests for category lookups, name uniqueness and seeding.

use assert_matches::assert_matches;
use sqlx::PgPool;
use todorank_core::error::CoreError;
use todorank_core::types::DbId;
use todorank_db::category_resolver::CategoryResolver;
use todorank_db::error::StoreError;
use todorank_db::models::category::{CreateCategory, UpdateCategory};
use todorank_db::repositories::CategoryRepo;

const OWNER: DbId = 1;

fn new_category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_by_name(pool: PgPool) {
    let created = CategoryResolver::create(&pool, OWNER, &new_category("Work"))
        .await
        .unwrap();
    assert_eq!(created.name, "Work");
    assert_eq!(created.todo_count, 0);
    assert_eq!(created.owner_id, OWNER);

    let found = CategoryRepo::find_by_name(&pool, OWNER, "Work")
        .await
        .unwrap()
        .expect("category should exist");
    assert_eq!(found.id, created.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_name_is_conflict(pool: PgPool) {
    CategoryResolver::create(&pool, OWNER, &new_category("Work"))
        .await
        .unwrap();
    let result = CategoryResolver::create(&pool, OWNER, &new_category("Work")).await;
    assert_matches!(result, Err(StoreError::Core(CoreError::Conflict(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_name_allowed_for_different_owners(pool: PgPool) {
    CategoryResolver::create(&pool, OWNER, &new_category("Work"))
        .await
        .unwrap();
    CategoryResolver::create(&pool, 2, &new_category("Work"))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_to_taken_name_is_conflict(pool: PgPool) {
    CategoryResolver::create(&pool, OWNER, &new_category("Work"))
        .await
        .unwrap();
    let home = CategoryResolver::create(&pool, OWNER, &new_category("Home"))
        .await
        .unwrap();

    let result = CategoryResolver::rename(
        &pool,
        OWNER,
        home.id,
        &UpdateCategory {
            name: "Work".to_string(),
        },
    )
    .await;
    assert_matches!(result, Err(StoreError::Core(CoreError::Conflict(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_refreshes_modified_timestamp(pool: PgPool) {
    let work = CategoryResolver::create(&pool, OWNER, &new_category("Work"))
        .await
        .unwrap();

    let renamed = CategoryResolver::rename(
        &pool,
        OWNER,
        work.id,
        &UpdateCategory {
            name: "Office".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(renamed.name, "Office");
    assert!(renamed.audit_date_modified >= work.audit_date_modified);
    assert_eq!(renamed.audit_date_created, work.audit_date_created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_to_own_name_is_allowed(pool: PgPool) {
    let work = CategoryResolver::create(&pool, OWNER, &new_category("Work"))
        .await
        .unwrap();
    let renamed = CategoryResolver::rename(
        &pool,
        OWNER,
        work.id,
        &UpdateCategory {
            name: "Work".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.id, work.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_unknown_category_is_not_found(pool: PgPool) {
    let result = CategoryResolver::delete(&pool, OWNER, 77).await;
    assert_matches!(
        result,
        Err(StoreError::Core(CoreError::NotFound { entity: "Category", id: 77 }))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_in_creation_order(pool: PgPool) {
    for name in ["Zeta", "Alpha", "Mid"] {
        CategoryResolver::create(&pool, OWNER, &new_category(name))
            .await
            .unwrap();
    }
    let names: Vec<String> = CategoryRepo::list(&pool, OWNER)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_defaults_only_once(pool: PgPool) {
    let first = CategoryResolver::seed_defaults(&pool, OWNER).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].name, "Personal Goals");
    assert_eq!(first[1].name, "Professional Goals");

    let second = CategoryResolver::seed_defaults(&pool, OWNER).await.unwrap();
    assert!(second.is_empty());
    assert_eq!(CategoryRepo::count(&pool, OWNER).await.unwrap(), 2);
}
