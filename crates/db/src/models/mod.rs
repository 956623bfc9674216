//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the query row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for patches

pub mod category;
pub mod todo;
