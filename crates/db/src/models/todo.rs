//! Todo model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todorank_core::error::CoreError;
use todorank_core::patch::Patch;
use todorank_core::todo::{validate_fields, validate_title};
use todorank_core::types::{DbId, Timestamp};
use validator::Validate;

use crate::models::category::CategoryRef;

/// A todo row joined with the name of its category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Todo {
    pub id: DbId,
    pub owner_id: DbId,
    pub category_id: DbId,
    pub category_name: String,
    pub title: String,
    pub description: Option<String>,
    pub rank: i32,
    pub done: bool,
    pub date_created: Timestamp,
    pub audit_date_created: Timestamp,
    pub audit_date_modified: Timestamp,
}

/// DTO for creating a todo.
///
/// The category is referenced by `category_id` or `category_name`; the id
/// wins when both are given.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTodo {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 1, max = 100))]
    pub rank: i32,
    pub done: Option<bool>,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
}

impl CreateTodo {
    pub fn validate_input(&self) -> Result<(), CoreError> {
        self.validate()?;
        validate_title(&self.title).map_err(CoreError::Validation)?;
        self.category_ref().map(|_| ())
    }

    pub fn category_ref(&self) -> Result<CategoryRef<'_>, CoreError> {
        match (self.category_id, self.category_name.as_deref()) {
            (Some(id), _) => Ok(CategoryRef::Id(id)),
            (None, Some(name)) => Ok(CategoryRef::Name(name)),
            (None, None) => Err(CoreError::Validation("Category is required".to_string())),
        }
    }
}

/// DTO for a partial todo update. Absent fields are left unchanged.
///
/// `description: null` clears the description; `title: null` is rejected at
/// deserialization time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub description: Patch<Option<String>>,
    #[serde(default)]
    pub rank: Patch<i32>,
    #[serde(default)]
    pub done: Patch<bool>,
    #[serde(default)]
    pub category_id: Patch<DbId>,
    #[serde(default)]
    pub category_name: Patch<String>,
}

impl UpdateTodo {
    pub fn validate_input(&self) -> Result<(), CoreError> {
        validate_fields(
            self.title.as_set().map(String::as_str),
            self.description.as_set().map(Option::as_deref),
            self.rank.as_set().copied(),
        )
        .map_err(CoreError::Validation)
    }

    pub fn category_ref(&self) -> Option<CategoryRef<'_>> {
        match (&self.category_id, &self.category_name) {
            (Patch::Set(id), _) => Some(CategoryRef::Id(*id)),
            (Patch::Absent, Patch::Set(name)) => Some(CategoryRef::Name(name)),
            (Patch::Absent, Patch::Absent) => None,
        }
    }
}
