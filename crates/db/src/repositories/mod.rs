//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Reads are generic over [`sqlx::PgExecutor`] so they run against either
//! the pool or an open transaction; writes that only make sense inside a
//! ranking transaction take `&mut PgConnection`.

pub mod category_repo;
pub mod todo_repo;

pub use category_repo::CategoryRepo;
pub use todo_repo::TodoRepo;
