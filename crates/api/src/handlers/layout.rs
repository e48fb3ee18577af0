//! Handlers for the per-user dashboard layout endpoints.
//!
//! The layout is stored in its wire form (`{i, x, y, w, h}` per item) and
//! validated against the catalog on every save, so any layout this
//! service accepts keeps the catalog invariants: known widget ids only,
//! no duplicates, every mandatory widget present.

use std::collections::HashSet;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cityhub_core::error::CoreError;
use cityhub_core::layout::SavedLayoutItem;
use cityhub_core::widget::WidgetDescriptor;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::PortalUser;
use crate::state::AppState;

/// Wire envelope for `GET /users/me/layout` responses and
/// `POST /users/me/layout` requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct LayoutEnvelope {
    pub layout: Vec<SavedLayoutItem>,
}

/// GET /api/v1/users/me/layout
///
/// The current user's saved layout. 404 when they have never saved one;
/// clients treat that as the first-run path and build the default layout.
pub async fn get_my_layout(
    PortalUser(user_id): PortalUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let layout = state
        .store
        .find_layout(user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DashboardLayout",
            id: user_id.to_string(),
        }))?;

    Ok(Json(LayoutEnvelope { layout }))
}

/// POST /api/v1/users/me/layout
///
/// Replace the current user's saved layout. Rejected with 400 when the
/// submitted items violate the catalog invariants.
pub async fn save_my_layout(
    PortalUser(user_id): PortalUser,
    State(state): State<AppState>,
    Json(input): Json<LayoutEnvelope>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.store.list_widgets().await?;
    validate_items(&input.layout, &catalog)?;

    state.store.upsert_layout(user_id, &input.layout).await?;

    tracing::info!(
        user_id,
        widget_count = input.layout.len(),
        "Dashboard layout saved",
    );

    Ok(Json(LayoutEnvelope {
        layout: input.layout,
    }))
}

/// DELETE /api/v1/users/me/layout
///
/// Discard the current user's saved layout; their next load falls back to
/// the default layout.
pub async fn delete_my_layout(
    PortalUser(user_id): PortalUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let deleted = state.store.delete_layout(user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "DashboardLayout",
            id: user_id.to_string(),
        }));
    }

    tracing::info!(user_id, "Dashboard layout reset");

    Ok(StatusCode::NO_CONTENT)
}

/// Check a submitted layout against the catalog invariants.
fn validate_items(
    items: &[SavedLayoutItem],
    catalog: &[WidgetDescriptor],
) -> Result<(), AppError> {
    let known: HashSet<&str> = catalog.iter().map(|d| d.id.as_str()).collect();

    let mut seen = HashSet::new();
    for item in items {
        if !known.contains(item.widget_id.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Unknown widget id '{}'",
                item.widget_id
            )));
        }
        if !seen.insert(item.widget_id.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Duplicate widget id '{}'",
                item.widget_id
            )));
        }
        if item.w < 1 || item.h < 1 {
            return Err(AppError::BadRequest(format!(
                "Widget '{}' has a zero-sized span",
                item.widget_id
            )));
        }
    }

    for descriptor in catalog {
        if descriptor.mandatory && !seen.contains(descriptor.id.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Mandatory widget '{}' is missing from the layout",
                descriptor.id
            )));
        }
    }

    Ok(())
}
