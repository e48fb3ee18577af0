//! In-memory layout engine: owns the active layout and its dirty-state
//! machine for one dashboard session.
//!
//! The engine is fully synchronous. Drag/resize interactions feed it a
//! high-frequency stream of [`LayoutEngine::update_layout`] calls that
//! must not perform I/O; persistence happens through the snapshot pair
//! [`LayoutEngine::begin_save`] / [`LayoutEngine::complete_save`], driven
//! by the async session layer.

use crate::error::CoreError;
use crate::layout::{
    build_default_layout, merge_layout, to_saved, GridConfig, LayoutItem, SavedLayoutItem,
};
use crate::widget::{validate_catalog, WidgetDescriptor};

/// Lifecycle of a dashboard session's layout state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Catalog loaded, persisted layout fetch not yet applied.
    Initializing,
    /// In-memory layout matches the last persisted state.
    Ready,
    /// In-memory layout has unsaved changes.
    Dirty,
    /// A save snapshot is in flight.
    Saving,
}

/// Owns the grid layout for one dashboard session.
///
/// The in-memory item list is the source of truth between saves; there is
/// exactly one mutator (the session's UI thread), so no locking.
#[derive(Debug)]
pub struct LayoutEngine {
    catalog: Vec<WidgetDescriptor>,
    grid: GridConfig,
    items: Vec<LayoutItem>,
    status: EngineStatus,
    /// Set when the layout changes while a save snapshot is in flight, so
    /// a successful save still lands in `Dirty` rather than `Ready`.
    dirtied_while_saving: bool,
}

impl LayoutEngine {
    /// Create an engine over a validated catalog.
    ///
    /// Fails fast on a malformed catalog (duplicate or empty widget ids);
    /// that is a deploy-time contract violation, not a runtime condition.
    pub fn new(catalog: Vec<WidgetDescriptor>, grid: GridConfig) -> Result<Self, CoreError> {
        validate_catalog(&catalog)?;
        Ok(Self {
            catalog,
            grid,
            items: Vec::new(),
            status: EngineStatus::Initializing,
            dirtied_while_saving: false,
        })
    }

    /// Apply the persisted-layout fetch result and become `Ready`.
    ///
    /// `None` is the normal first-run path and produces the default
    /// layout; `Some` is merged against the catalog.
    pub fn initialize(&mut self, persisted: Option<&[SavedLayoutItem]>) {
        self.items = match persisted {
            Some(saved) => merge_layout(saved, &self.catalog, &self.grid),
            None => build_default_layout(&self.catalog, &self.grid),
        };
        self.status = EngineStatus::Ready;
        self.dirtied_while_saving = false;
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    pub fn catalog(&self) -> &[WidgetDescriptor] {
        &self.catalog
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Replace the in-memory layout with the grid's latest item list.
    ///
    /// Called on every drag/resize event; synchronous and I/O-free, with
    /// no internal debounce (debouncing belongs to the save path).
    pub fn update_layout(&mut self, items: Vec<LayoutItem>) {
        self.items = items;
        self.mark_dirty();
    }

    /// Remove a widget from the layout.
    ///
    /// Returns `true` and marks the layout dirty when the widget was
    /// present and its descriptor is non-mandatory. Mandatory widgets are
    /// a rejected no-op (`false`), an expected condition rather than an
    /// error, so callers can give inline feedback.
    pub fn delete_widget(&mut self, widget_id: &str) -> bool {
        let Some(descriptor) = self.catalog.iter().find(|d| d.id == widget_id) else {
            return false;
        };
        if descriptor.mandatory {
            return false;
        }
        let Some(position) = self.items.iter().position(|i| i.widget_id == widget_id) else {
            return false;
        };
        self.items.remove(position);
        self.mark_dirty();
        true
    }

    /// Take a point-in-time snapshot for persistence and enter `Saving`.
    ///
    /// The snapshot is detached from the live item list, so later
    /// `update_layout` calls cannot corrupt an in-flight save.
    pub fn begin_save(&mut self) -> Vec<SavedLayoutItem> {
        self.status = EngineStatus::Saving;
        self.dirtied_while_saving = false;
        to_saved(&self.items)
    }

    /// Record the outcome of an in-flight save.
    ///
    /// Success lands in `Ready` unless the layout changed mid-save;
    /// failure always lands in `Dirty` so no changes are lost.
    pub fn complete_save(&mut self, success: bool) {
        self.status = if success && !self.dirtied_while_saving {
            EngineStatus::Ready
        } else {
            EngineStatus::Dirty
        };
        self.dirtied_while_saving = false;
    }

    fn mark_dirty(&mut self) {
        match self.status {
            EngineStatus::Saving => self.dirtied_while_saving = true,
            _ => self.status = EngineStatus::Dirty,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
