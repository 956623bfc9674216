//! Domain logic for the todo ranking backend.
//!
//! Pure code only: no database or HTTP access. The `db` crate drives the
//! planning functions in [`ranking`] inside a transaction.

pub mod category;
pub mod error;
pub mod patch;
pub mod ranking;
pub mod todo;
pub mod types;
