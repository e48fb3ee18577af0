pub mod catalog;
pub mod health;
pub mod layout;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /widgets/catalog     widget catalog (GET)
/// /users/me/layout     saved layout (GET, POST, DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/widgets", catalog::router())
        .nest("/users/me", layout::router())
}
