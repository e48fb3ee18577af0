//! Dashboard layout models.
//!
//! One saved layout per user; the item list is stored as a JSONB array of
//! `{i, x, y, w, h}` objects, the exact wire form the engine round-trips.

use cityhub_core::error::CoreError;
use cityhub_core::layout::SavedLayoutItem;
use cityhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `dashboard_layouts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardLayoutRow {
    pub id: DbId,
    pub user_id: DbId,
    pub layout_json: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DashboardLayoutRow {
    /// Decode the stored JSONB array into layout items.
    ///
    /// A row that fails to decode means the table was written outside the
    /// API contract; surfaced as an internal error, not a user condition.
    pub fn items(&self) -> Result<Vec<SavedLayoutItem>, CoreError> {
        serde_json::from_value(self.layout_json.clone()).map_err(|e| {
            CoreError::Internal(format!(
                "Stored layout for user {} is not a valid item array: {e}",
                self.user_id
            ))
        })
    }
}
