//! Owner-scope extractor for Axum handlers.
//!
//! Authentication happens upstream; by the time a request reaches this
//! service the authenticated owner id is carried in the `X-Owner-Id`
//! header. Single-tenant deployments set `DEFAULT_OWNER_ID` instead.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use todorank_core::error::CoreError;
use todorank_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the owner id.
pub const OWNER_HEADER: &str = "x-owner-id";

/// The owner every category and todo query in a request is scoped to.
///
/// ```ignore
/// async fn my_handler(OwnerScope(owner_id): OwnerScope) -> AppResult<Json<()>> {
///     tracing::info!(owner_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerScope(pub DbId);

impl FromRequestParts<AppState> for OwnerScope {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.headers.get(OWNER_HEADER) {
            Some(value) => {
                let owner_id = value
                    .to_str()
                    .ok()
                    .and_then(|v| v.trim().parse::<DbId>().ok())
                    .ok_or_else(|| {
                        AppError::BadRequest(format!("{OWNER_HEADER} must be an integer id"))
                    })?;
                Ok(OwnerScope(owner_id))
            }
            None => state.config.default_owner_id.map(OwnerScope).ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {OWNER_HEADER} header"
                )))
            }),
        }
    }
}
