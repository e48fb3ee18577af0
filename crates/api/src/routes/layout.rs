//! Route definitions for the current user's layout, mounted at `/users/me`.

use axum::routing::get;
use axum::Router;

use crate::handlers::layout;
use crate::state::AppState;

/// ```text
/// GET    /layout -> get_my_layout
/// POST   /layout -> save_my_layout
/// DELETE /layout -> delete_my_layout
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/layout",
        get(layout::get_my_layout)
            .post(layout::save_my_layout)
            .delete(layout::delete_my_layout),
    )
}
