//! Repository for the `dashboard_layouts` table.
//!
//! One saved layout per user, enforced by `uq_dashboard_layouts_user`;
//! saves are upserts so the first save and every later save share a path.

use cityhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::layout::DashboardLayoutRow;

/// Column list for `dashboard_layouts` queries.
const LAYOUT_COLUMNS: &str = "id, user_id, layout_json, created_at, updated_at";

/// Provides data access for saved dashboard layouts.
pub struct LayoutRepo;

impl LayoutRepo {
    /// Find a user's saved layout.
    ///
    /// `None` means the user has never saved one; callers treat that as
    /// the first-run path, not an error.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<DashboardLayoutRow>, sqlx::Error> {
        let query = format!("SELECT {LAYOUT_COLUMNS} FROM dashboard_layouts WHERE user_id = $1");
        sqlx::query_as::<_, DashboardLayoutRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace a user's saved layout.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        layout_json: &serde_json::Value,
    ) -> Result<DashboardLayoutRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO dashboard_layouts (user_id, layout_json) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE \
                 SET layout_json = EXCLUDED.layout_json, updated_at = NOW() \
             RETURNING {LAYOUT_COLUMNS}"
        );
        sqlx::query_as::<_, DashboardLayoutRow>(&query)
            .bind(user_id)
            .bind(layout_json)
            .fetch_one(pool)
            .await
    }

    /// Delete a user's saved layout (reset to default on next load).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_by_user(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dashboard_layouts WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
