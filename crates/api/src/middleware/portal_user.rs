//! Portal identity extractor for Axum handlers.
//!
//! The portal's session proxy terminates authentication and forwards the
//! resolved user id in the `x-portal-user` header. This extractor is the
//! only place that header is read; handlers just take a [`PortalUser`]
//! parameter:
//!
//! ```ignore
//! async fn my_handler(PortalUser(user_id): PortalUser) -> AppResult<Json<()>> {
//!     tracing::info!(user_id, "handling request");
//!     Ok(Json(()))
//! }
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cityhub_core::error::CoreError;
use cityhub_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the portal-resolved user id.
pub const PORTAL_USER_HEADER: &str = "x-portal-user";

/// The current user, as resolved by the portal session proxy.
#[derive(Debug, Clone, Copy)]
pub struct PortalUser(pub DbId);

impl FromRequestParts<AppState> for PortalUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(PORTAL_USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {PORTAL_USER_HEADER} header"
                )))
            })?;

        let user_id: DbId = header.parse().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(format!(
                "Invalid {PORTAL_USER_HEADER} header"
            )))
        })?;

        Ok(PortalUser(user_id))
    }
}
