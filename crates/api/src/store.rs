//! Service-side storage port for the dashboard endpoints.
//!
//! Handlers depend on [`DashboardStore`] rather than a concrete pool so
//! the same router runs against Postgres in production and an in-memory
//! store in integration tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use cityhub_core::layout::SavedLayoutItem;
use cityhub_core::types::DbId;
use cityhub_core::widget::{fallback_catalog, WidgetDescriptor};
use cityhub_db::repositories::{LayoutRepo, WidgetRepo};
use cityhub_db::DbPool;

use crate::error::AppError;

/// Storage operations behind the dashboard endpoints.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// The widget catalog in stable order.
    async fn list_widgets(&self) -> Result<Vec<WidgetDescriptor>, AppError>;

    /// A user's saved layout; `None` when they have never saved one.
    async fn find_layout(&self, user_id: DbId) -> Result<Option<Vec<SavedLayoutItem>>, AppError>;

    /// Insert or replace a user's saved layout.
    async fn upsert_layout(
        &self,
        user_id: DbId,
        items: &[SavedLayoutItem],
    ) -> Result<(), AppError>;

    /// Delete a user's saved layout; `true` if one existed.
    async fn delete_layout(&self, user_id: DbId) -> Result<bool, AppError>;

    /// Whether the backing store currently answers queries.
    async fn is_healthy(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Postgres store
// ---------------------------------------------------------------------------

/// Production [`DashboardStore`] over the Postgres repositories.
pub struct PgDashboardStore {
    pool: DbPool,
}

impl PgDashboardStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardStore for PgDashboardStore {
    async fn list_widgets(&self) -> Result<Vec<WidgetDescriptor>, AppError> {
        let rows = WidgetRepo::list(&self.pool).await?;
        rows.into_iter()
            .map(|row| row.into_descriptor().map_err(AppError::Core))
            .collect()
    }

    async fn find_layout(&self, user_id: DbId) -> Result<Option<Vec<SavedLayoutItem>>, AppError> {
        match LayoutRepo::find_by_user(&self.pool, user_id).await? {
            Some(row) => Ok(Some(row.items()?)),
            None => Ok(None),
        }
    }

    async fn upsert_layout(
        &self,
        user_id: DbId,
        items: &[SavedLayoutItem],
    ) -> Result<(), AppError> {
        let layout_json = serde_json::to_value(items)
            .map_err(|e| AppError::InternalError(format!("Layout serialization failed: {e}")))?;
        LayoutRepo::upsert(&self.pool, user_id, &layout_json).await?;
        Ok(())
    }

    async fn delete_layout(&self, user_id: DbId) -> Result<bool, AppError> {
        Ok(LayoutRepo::delete_by_user(&self.pool, user_id).await?)
    }

    async fn is_healthy(&self) -> bool {
        cityhub_db::health_check(&self.pool).await.is_ok()
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// In-memory [`DashboardStore`] for integration tests and local bring-up
/// without a database.
pub struct InMemoryDashboardStore {
    widgets: Vec<WidgetDescriptor>,
    layouts: Mutex<HashMap<DbId, Vec<SavedLayoutItem>>>,
}

impl InMemoryDashboardStore {
    /// Store seeded with the built-in catalog.
    pub fn new() -> Self {
        Self::with_widgets(fallback_catalog())
    }

    pub fn with_widgets(widgets: Vec<WidgetDescriptor>) -> Self {
        Self {
            widgets,
            layouts: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryDashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DashboardStore for InMemoryDashboardStore {
    async fn list_widgets(&self) -> Result<Vec<WidgetDescriptor>, AppError> {
        Ok(self.widgets.clone())
    }

    async fn find_layout(&self, user_id: DbId) -> Result<Option<Vec<SavedLayoutItem>>, AppError> {
        Ok(self.layouts.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert_layout(
        &self,
        user_id: DbId,
        items: &[SavedLayoutItem],
    ) -> Result<(), AppError> {
        self.layouts.lock().unwrap().insert(user_id, items.to_vec());
        Ok(())
    }

    async fn delete_layout(&self, user_id: DbId) -> Result<bool, AppError> {
        Ok(self.layouts.lock().unwrap().remove(&user_id).is_some())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
