//! Persistence port for dashboard sessions.
//!
//! The engine never talks to a network or database directly; it sees the
//! two-operation layout contract (plus the catalog fetch) through
//! [`DashboardBackend`]. Production front ends plug in the HTTP client
//! from `cityhub-client`; tests and local bring-up use
//! [`InMemoryBackend`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::layout::SavedLayoutItem;
use crate::widget::WidgetDescriptor;

/// Transport-level failure from a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a usable response (network, DNS, TLS).
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// The backend answered 2xx but the payload did not parse.
    #[error("Malformed payload: {0}")]
    Malformed(String),
}

/// Async persistence port for one user's dashboard.
///
/// Implementations are scoped to the current user; there is no user
/// parameter because the session never touches anyone else's layout.
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    /// Fetch the full widget catalog. Idempotent and side-effect-free.
    ///
    /// Transport errors must propagate so the session can fall back to
    /// the built-in catalog instead of rendering an empty dashboard.
    async fn load_catalog(&self) -> Result<Vec<WidgetDescriptor>, StoreError>;

    /// Fetch the user's saved layout.
    ///
    /// Returns `Ok(None)` when the user has no saved layout yet; that is
    /// the normal first-run path, not a failure.
    async fn load_layout(&self) -> Result<Option<Vec<SavedLayoutItem>>, StoreError>;

    /// Persist a layout snapshot.
    async fn save_layout(&self, items: &[SavedLayoutItem]) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// In-memory [`DashboardBackend`] for tests and local bring-up.
///
/// Failure injection flags make the session's degradation paths (catalog
/// fallback, default-layout fallback, dirty-on-save-failure) testable
/// without a network.
pub struct InMemoryBackend {
    catalog: Vec<WidgetDescriptor>,
    layout: Mutex<Option<Vec<SavedLayoutItem>>>,
    fail_catalog: AtomicBool,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
}

impl InMemoryBackend {
    pub fn new(catalog: Vec<WidgetDescriptor>) -> Self {
        Self {
            catalog,
            layout: Mutex::new(None),
            fail_catalog: AtomicBool::new(false),
            fail_loads: AtomicBool::new(false),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Pre-seed a saved layout, as if the user had saved in an earlier
    /// session.
    pub fn with_layout(self, items: Vec<SavedLayoutItem>) -> Self {
        *self.layout.lock().unwrap() = Some(items);
        self
    }

    /// Make subsequent catalog fetches fail.
    pub fn fail_catalog(&self, fail: bool) {
        self.fail_catalog.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent layout loads fail.
    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent saves fail.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// The layout as last persisted, for assertions.
    pub fn persisted(&self) -> Option<Vec<SavedLayoutItem>> {
        self.layout.lock().unwrap().clone()
    }

    fn injected(flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            Err(StoreError::Transport("injected failure".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DashboardBackend for InMemoryBackend {
    async fn load_catalog(&self) -> Result<Vec<WidgetDescriptor>, StoreError> {
        Self::injected(&self.fail_catalog)?;
        Ok(self.catalog.clone())
    }

    async fn load_layout(&self) -> Result<Option<Vec<SavedLayoutItem>>, StoreError> {
        Self::injected(&self.fail_loads)?;
        Ok(self.layout.lock().unwrap().clone())
    }

    async fn save_layout(&self, items: &[SavedLayoutItem]) -> Result<(), StoreError> {
        Self::injected(&self.fail_saves)?;
        *self.layout.lock().unwrap() = Some(items.to_vec());
        Ok(())
    }
}
