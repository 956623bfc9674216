use todorank_core::error::CoreError;

/// Error returned by the transactional services in this crate.
///
/// Domain failures (not found, conflict, validation) stay distinguishable
/// from database failures so the API layer can map them to status codes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
