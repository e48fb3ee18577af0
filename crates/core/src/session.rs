//! Dashboard session orchestration: catalog, engine, visibility, and the
//! persistence backend, wired together with the failure semantics the
//! dashboard needs (load failures degrade, save failures keep changes).

use crate::engine::LayoutEngine;
use crate::error::CoreError;
use crate::layout::GridConfig;
use crate::store::{DashboardBackend, StoreError};
use crate::visibility::VisibilityTracker;
use crate::widget::fallback_catalog;

/// One mounted dashboard: the layout engine, the visibility tracker, and
/// the backend they persist through.
///
/// Lives for the dashboard's mounted lifetime; dropping it discards the
/// visibility set (never persisted) and any unsaved layout changes.
pub struct DashboardSession<B> {
    backend: B,
    engine: LayoutEngine,
    visibility: VisibilityTracker,
}

impl<B: DashboardBackend> DashboardSession<B> {
    /// Initialize a session: load the catalog, attempt the persisted
    /// layout fetch, merge, and become ready.
    ///
    /// - A catalog fetch failure falls back to the built-in catalog (the
    ///   dashboard always renders).
    /// - A missing persisted layout (`None`) silently produces the
    ///   default layout; that is the normal first run.
    /// - A layout fetch *failure* is logged and also degrades to the
    ///   default layout rather than blocking the dashboard.
    ///
    /// Fails only on a malformed catalog, which is a deploy-time contract
    /// violation.
    pub async fn start(backend: B, grid: GridConfig) -> Result<Self, CoreError> {
        let catalog = match backend.load_catalog().await {
            Ok(catalog) => catalog,
            Err(error) => {
                tracing::warn!(%error, "Widget catalog fetch failed, using built-in catalog");
                fallback_catalog()
            }
        };

        let mut engine = LayoutEngine::new(catalog, grid)?;

        let persisted = match backend.load_layout().await {
            Ok(persisted) => persisted,
            Err(error) => {
                tracing::warn!(%error, "Saved layout fetch failed, starting from default layout");
                None
            }
        };
        engine.initialize(persisted.as_deref());

        Ok(Self {
            backend,
            engine,
            visibility: VisibilityTracker::new(),
        })
    }

    /// Persist the current layout.
    ///
    /// Snapshots the layout as of this call, so updates arriving while
    /// the save is in flight cannot corrupt it. On failure the engine
    /// stays dirty and the error is returned; the caller decides whether
    /// to retry or surface it. No automatic retry here.
    pub async fn save(&mut self) -> Result<(), StoreError> {
        let snapshot = self.engine.begin_save();
        let result = self.backend.save_layout(&snapshot).await;
        self.engine.complete_save(result.is_ok());
        if let Err(error) = &result {
            tracing::warn!(%error, "Layout save failed, keeping local changes");
        }
        result
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut LayoutEngine {
        &mut self.engine
    }

    pub fn visibility(&self) -> &VisibilityTracker {
        &self.visibility
    }

    pub fn visibility_mut(&mut self) -> &mut VisibilityTracker {
        &mut self.visibility
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineStatus;
    use crate::layout::{build_default_layout, SavedLayoutItem};
    use crate::store::InMemoryBackend;

    fn saved(widget_id: &str, x: u32, y: u32) -> SavedLayoutItem {
        SavedLayoutItem {
            widget_id: widget_id.to_string(),
            x,
            y,
            w: 4,
            h: 2,
        }
    }

    #[tokio::test]
    async fn first_run_uses_the_default_layout() {
        let backend = InMemoryBackend::new(fallback_catalog());
        let session = DashboardSession::start(backend, GridConfig::default())
            .await
            .unwrap();

        assert_eq!(session.engine().status(), EngineStatus::Ready);
        assert_eq!(
            session.engine().items(),
            &build_default_layout(&fallback_catalog(), &GridConfig::default())[..]
        );
    }

    #[tokio::test]
    async fn persisted_positions_survive_session_start() {
        let backend =
            InMemoryBackend::new(fallback_catalog()).with_layout(vec![saved("weather", 8, 6)]);
        let session = DashboardSession::start(backend, GridConfig::default())
            .await
            .unwrap();

        let weather = session
            .engine()
            .items()
            .iter()
            .find(|i| i.widget_id == "weather")
            .unwrap();
        assert_eq!((weather.x, weather.y), (8, 6));
    }

    #[tokio::test]
    async fn catalog_failure_falls_back_to_builtin_catalog() {
        let backend = InMemoryBackend::new(vec![]);
        backend.fail_catalog(true);
        let session = DashboardSession::start(backend, GridConfig::default())
            .await
            .unwrap();

        assert_eq!(session.engine().catalog().len(), fallback_catalog().len());
        assert_eq!(session.engine().status(), EngineStatus::Ready);
    }

    #[tokio::test]
    async fn layout_load_failure_degrades_to_default_layout() {
        let backend =
            InMemoryBackend::new(fallback_catalog()).with_layout(vec![saved("weather", 8, 6)]);
        backend.fail_loads(true);
        let session = DashboardSession::start(backend, GridConfig::default())
            .await
            .unwrap();

        // The saved position is unreachable, so the dashboard renders the
        // default layout instead of failing to mount.
        assert_eq!(
            session.engine().items(),
            &build_default_layout(&fallback_catalog(), &GridConfig::default())[..]
        );
    }

    #[tokio::test]
    async fn save_round_trips_through_the_backend() {
        let backend = InMemoryBackend::new(fallback_catalog());
        let mut session = DashboardSession::start(backend, GridConfig::default())
            .await
            .unwrap();

        let mut items = session.engine().items().to_vec();
        items[0].x = 8;
        items[0].y = 10;
        session.engine_mut().update_layout(items.clone());

        session.save().await.unwrap();
        assert_eq!(session.engine().status(), EngineStatus::Ready);

        let persisted = session.backend.persisted().unwrap();
        assert_eq!(persisted.len(), items.len());
        let weather = persisted.iter().find(|s| s.widget_id == items[0].widget_id).unwrap();
        assert_eq!((weather.x, weather.y), (8, 10));
    }

    #[tokio::test]
    async fn failed_save_keeps_changes_and_stays_dirty() {
        let backend = InMemoryBackend::new(fallback_catalog());
        let mut session = DashboardSession::start(backend, GridConfig::default())
            .await
            .unwrap();

        let mut items = session.engine().items().to_vec();
        items[0].x = 8;
        session.engine_mut().update_layout(items.clone());

        session.backend.fail_saves(true);
        assert!(session.save().await.is_err());

        assert_eq!(session.engine().status(), EngineStatus::Dirty);
        assert_eq!(session.engine().items(), &items[..], "Changes kept on failure");
        assert!(session.backend.persisted().is_none(), "Nothing was persisted");
    }

    #[tokio::test]
    async fn widgets_absent_from_saved_layout_are_backfilled_next_session() {
        let backend = InMemoryBackend::new(fallback_catalog());
        let mut session = DashboardSession::start(backend, GridConfig::default())
            .await
            .unwrap();
        session.engine_mut().delete_widget("news");
        session.save().await.unwrap();
        assert!(session
            .backend
            .persisted()
            .unwrap()
            .iter()
            .all(|s| s.widget_id != "news"));

        // The next session merges the saved layout against the catalog,
        // which appends default-positioned entries for absent widgets.
        let DashboardSession { backend, .. } = session;
        let session = DashboardSession::start(backend, GridConfig::default())
            .await
            .unwrap();
        assert!(
            session.engine().items().iter().any(|i| i.widget_id == "news"),
            "Catalog widgets missing from the saved set re-enter at default positions"
        );
    }
}
