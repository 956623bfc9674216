//! Category model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todorank_core::category::validate_category_name;
use todorank_core::error::CoreError;
use todorank_core::types::{DbId, Timestamp};
use validator::Validate;

/// A category row enriched with the number of todos it owns.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub date_created: Timestamp,
    pub audit_date_created: Timestamp,
    pub audit_date_modified: Timestamp,
    pub todo_count: i64,
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// DTO for renaming a category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

impl CreateCategory {
    pub fn validate_input(&self) -> Result<(), CoreError> {
        self.validate()?;
        validate_category_name(&self.name).map_err(CoreError::Validation)
    }
}

impl UpdateCategory {
    pub fn validate_input(&self) -> Result<(), CoreError> {
        self.validate()?;
        validate_category_name(&self.name).map_err(CoreError::Validation)
    }
}

/// A reference to a category by id or by name, scoped to one owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRef<'a> {
    Id(DbId),
    Name(&'a str),
}

impl CategoryRef<'_> {
    /// Whether this reference points at the given category.
    pub fn matches(&self, category_id: DbId, category_name: &str) -> bool {
        match self {
            CategoryRef::Id(id) => *id == category_id,
            CategoryRef::Name(name) => *name == category_name,
        }
    }
}
