//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input, delegate to the repositories or transactional
//! services in `todorank_db`, and map errors via [`crate::error::AppError`].

pub mod category;
pub mod todo;
