//! Handler for the widget catalog endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use cityhub_core::widget::WidgetDescriptor;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Wire envelope for `GET /widgets/catalog`.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub widgets: Vec<WidgetDescriptor>,
}

/// GET /api/v1/widgets/catalog
///
/// The full widget catalog in stable order. Read-only; catalog changes
/// ship as seed migrations.
pub async fn get_catalog(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let widgets = state.store.list_widgets().await?;

    Ok(Json(CatalogResponse { widgets }))
}
