//! Grid layout items, deterministic default placement, and merge.
//!
//! A layout is a list of rectangular spans on a grid of fixed-size cells.
//! Two pure functions do the real work: [`build_default_layout`] generates
//! the layout a user sees before they have ever saved one, and
//! [`merge_layout`] reconciles a persisted layout against the current
//! widget catalog.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::widget::WidgetDescriptor;

// ---------------------------------------------------------------------------
// Grid geometry
// ---------------------------------------------------------------------------

/// Grid geometry for default placement.
#[derive(Debug, Clone, Copy)]
pub struct GridConfig {
    /// Number of widget slots per row before wrapping.
    pub columns: u32,
    /// Width of one default widget slot, in grid cells.
    pub unit_width: u32,
    /// Height of one default widget slot, in grid cells.
    pub unit_height: u32,
}

impl GridConfig {
    /// Total grid width in cells; full-width banner widgets span this.
    pub fn total_columns(&self) -> u32 {
        self.columns * self.unit_width
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        // Three slots of four cells each on the standard 12-column grid.
        Self {
            columns: 3,
            unit_width: 4,
            unit_height: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Layout items
// ---------------------------------------------------------------------------

/// One widget's position and span in the active layout.
///
/// `is_draggable`/`is_resizable` are derived from the matching
/// descriptor's `movable` flag at merge time and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutItem {
    pub widget_id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub is_draggable: bool,
    pub is_resizable: bool,
}

impl LayoutItem {
    /// Strip the item down to its persisted wire form.
    pub fn to_saved(&self) -> SavedLayoutItem {
        SavedLayoutItem {
            widget_id: self.widget_id.clone(),
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

/// Persisted wire form of a layout item: exactly `{i, x, y, w, h}`.
///
/// Derived flags are deliberately absent; they are recomputed from the
/// catalog on every load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedLayoutItem {
    #[serde(rename = "i")]
    pub widget_id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Serialize a full layout to its persisted form.
pub fn to_saved(items: &[LayoutItem]) -> Vec<SavedLayoutItem> {
    items.iter().map(LayoutItem::to_saved).collect()
}

// ---------------------------------------------------------------------------
// Default placement
// ---------------------------------------------------------------------------

/// Deterministically place every catalog widget on the grid.
///
/// Widget `index` lands at `x = (index % columns) * unit_width`,
/// `y = (index / columns) * unit_height` with the default slot size.
/// Full-width banner widgets keep their wrapped origin but span the whole
/// grid at height 1. Identical catalogs therefore always produce
/// identical layouts, and no two widgets share an `(x, y)` origin.
pub fn build_default_layout(catalog: &[WidgetDescriptor], grid: &GridConfig) -> Vec<LayoutItem> {
    catalog
        .iter()
        .enumerate()
        .map(|(index, descriptor)| {
            let index = index as u32;
            let x = (index % grid.columns) * grid.unit_width;
            let y = (index / grid.columns) * grid.unit_height;

            let (w, h) = if descriptor.is_full_width() {
                (grid.total_columns(), 1)
            } else {
                (grid.unit_width, grid.unit_height)
            };

            LayoutItem {
                widget_id: descriptor.id.clone(),
                x,
                y,
                w,
                h,
                is_draggable: descriptor.movable,
                is_resizable: descriptor.movable,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Reconcile a persisted layout against the current catalog.
///
/// - Positions come from the persisted items; derived flags come from the
///   catalog (`movable = false` always wins over persisted claims).
/// - Persisted items referencing unknown widgets are dropped silently.
/// - Catalog widgets absent from the persisted set are appended at their
///   default position, which is how widgets introduced after the user's
///   last save (new mandatory widgets included) enter the layout.
///
/// Result ordering is not significant; positions are.
pub fn merge_layout(
    persisted: &[SavedLayoutItem],
    catalog: &[WidgetDescriptor],
    grid: &GridConfig,
) -> Vec<LayoutItem> {
    let descriptors: HashMap<&str, &WidgetDescriptor> =
        catalog.iter().map(|d| (d.id.as_str(), d)).collect();

    let mut merged = Vec::with_capacity(catalog.len());
    let mut seen: HashSet<&str> = HashSet::new();

    for saved in persisted {
        let Some(descriptor) = descriptors.get(saved.widget_id.as_str()) else {
            // Widget no longer exists in the catalog; defensive skip.
            continue;
        };
        if !seen.insert(saved.widget_id.as_str()) {
            // Layouts must not contain duplicate widget ids; keep the first.
            continue;
        }
        merged.push(LayoutItem {
            widget_id: saved.widget_id.clone(),
            x: saved.x,
            y: saved.y,
            w: saved.w,
            h: saved.h,
            is_draggable: descriptor.movable,
            is_resizable: descriptor.movable,
        });
    }

    for item in build_default_layout(catalog, grid) {
        if !seen.contains(item.widget_id.as_str()) {
            merged.push(item);
        }
    }

    merged
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{fallback_catalog, WidgetCategory};

    fn descriptor(id: &str, movable: bool, mandatory: bool) -> WidgetDescriptor {
        WidgetDescriptor {
            id: id.to_string(),
            display_name: id.to_string(),
            category: WidgetCategory::Information,
            movable,
            mandatory,
            description: String::new(),
        }
    }

    fn banner(id: &str) -> WidgetDescriptor {
        WidgetDescriptor {
            category: WidgetCategory::Advertisement,
            ..descriptor(id, false, true)
        }
    }

    fn saved(widget_id: &str, x: u32, y: u32, w: u32, h: u32) -> SavedLayoutItem {
        SavedLayoutItem {
            widget_id: widget_id.to_string(),
            x,
            y,
            w,
            h,
        }
    }

    // -- Default placement --

    #[test]
    fn default_layout_is_deterministic() {
        let catalog = fallback_catalog();
        let grid = GridConfig::default();
        let first = build_default_layout(&catalog, &grid);
        let second = build_default_layout(&catalog, &grid);
        assert_eq!(first, second);
    }

    #[test]
    fn default_layout_wraps_in_fixed_columns() {
        let catalog: Vec<_> = (0..5).map(|i| descriptor(&format!("w{i}"), true, false)).collect();
        let grid = GridConfig {
            columns: 3,
            unit_width: 4,
            unit_height: 2,
        };
        let layout = build_default_layout(&catalog, &grid);

        assert_eq!((layout[0].x, layout[0].y), (0, 0));
        assert_eq!((layout[1].x, layout[1].y), (4, 0));
        assert_eq!((layout[2].x, layout[2].y), (8, 0));
        assert_eq!((layout[3].x, layout[3].y), (0, 2));
        assert_eq!((layout[4].x, layout[4].y), (4, 2));
    }

    #[test]
    fn no_two_widgets_share_an_origin() {
        let catalog = fallback_catalog();
        let layout = build_default_layout(&catalog, &GridConfig::default());
        let mut origins = HashSet::new();
        for item in &layout {
            assert!(
                origins.insert((item.x, item.y)),
                "Duplicate origin ({}, {}) for widget '{}'",
                item.x,
                item.y,
                item.widget_id
            );
        }
    }

    #[test]
    fn banner_widget_spans_the_full_grid_at_height_one() {
        let catalog = vec![
            descriptor("weather", true, true),
            banner("banner-ad"),
            descriptor("news", true, false),
        ];
        let grid = GridConfig::default();
        let layout = build_default_layout(&catalog, &grid);

        let banner_item = layout.iter().find(|i| i.widget_id == "banner-ad").unwrap();
        assert_eq!(banner_item.w, grid.total_columns());
        assert_eq!(banner_item.h, 1);

        // Non-banner widgets keep the default slot size.
        let weather = layout.iter().find(|i| i.widget_id == "weather").unwrap();
        assert_eq!((weather.w, weather.h), (grid.unit_width, grid.unit_height));
    }

    #[test]
    fn locked_widgets_are_not_draggable_in_default_layout() {
        let catalog = vec![descriptor("weather", true, true), banner("banner-ad")];
        let layout = build_default_layout(&catalog, &GridConfig::default());
        let banner_item = layout.iter().find(|i| i.widget_id == "banner-ad").unwrap();
        assert!(!banner_item.is_draggable);
        assert!(!banner_item.is_resizable);
    }

    // -- Merge --

    #[test]
    fn merge_takes_positions_from_persisted_items() {
        let catalog = vec![descriptor("weather", true, true)];
        let persisted = vec![saved("weather", 8, 6, 2, 3)];
        let merged = merge_layout(&persisted, &catalog, &GridConfig::default());

        assert_eq!(merged.len(), 1);
        assert_eq!((merged[0].x, merged[0].y, merged[0].w, merged[0].h), (8, 6, 2, 3));
    }

    #[test]
    fn catalog_wins_over_persisted_flag_claims() {
        // Persisted data cannot make a locked widget movable; the saved form
        // has no flag fields at all, so the descriptor is the only source.
        let catalog = vec![descriptor("banner-ad", false, true)];
        let persisted = vec![saved("banner-ad", 0, 0, 12, 1)];
        let merged = merge_layout(&persisted, &catalog, &GridConfig::default());

        assert!(!merged[0].is_draggable);
        assert!(!merged[0].is_resizable);
    }

    #[test]
    fn unknown_persisted_widgets_are_dropped() {
        let catalog = vec![descriptor("weather", true, true)];
        let persisted = vec![saved("weather", 0, 0, 4, 2), saved("retired-widget", 4, 0, 4, 2)];
        let merged = merge_layout(&persisted, &catalog, &GridConfig::default());

        assert_eq!(merged.len(), 1);
        assert!(merged.iter().all(|i| i.widget_id != "retired-widget"));
    }

    #[test]
    fn duplicate_persisted_entries_keep_only_the_first() {
        let catalog = vec![descriptor("weather", true, true)];
        let persisted = vec![saved("weather", 0, 0, 4, 2), saved("weather", 8, 4, 4, 2)];
        let merged = merge_layout(&persisted, &catalog, &GridConfig::default());

        assert_eq!(merged.len(), 1);
        assert_eq!((merged[0].x, merged[0].y), (0, 0));
    }

    #[test]
    fn catalog_widgets_missing_from_persisted_set_are_backfilled() {
        // "news" was introduced after the user's last save.
        let catalog = vec![descriptor("weather", true, true), descriptor("news", true, false)];
        let grid = GridConfig::default();
        let persisted = vec![saved("weather", 8, 0, 4, 2)];
        let merged = merge_layout(&persisted, &catalog, &grid);

        assert_eq!(merged.len(), 2);
        let news = merged.iter().find(|i| i.widget_id == "news").unwrap();
        let default_news = build_default_layout(&catalog, &grid)
            .into_iter()
            .find(|i| i.widget_id == "news")
            .unwrap();
        assert_eq!(news, &default_news);
    }

    #[test]
    fn merging_nothing_equals_the_default_layout() {
        let catalog = fallback_catalog();
        let grid = GridConfig::default();
        let merged = merge_layout(&[], &catalog, &grid);
        assert_eq!(merged, build_default_layout(&catalog, &grid));
    }

    // -- Wire form --

    #[test]
    fn saved_item_serializes_to_the_exact_wire_shape() {
        let item = saved("weather", 1, 2, 3, 4);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"i": "weather", "x": 1, "y": 2, "w": 3, "h": 4})
        );
    }

    #[test]
    fn saved_form_round_trips() {
        let items = vec![saved("weather", 0, 0, 4, 2), saved("news", 4, 0, 4, 2)];
        let json = serde_json::to_string(&items).unwrap();
        let back: Vec<SavedLayoutItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn to_saved_strips_derived_flags() {
        let catalog = vec![descriptor("weather", true, true)];
        let layout = build_default_layout(&catalog, &GridConfig::default());
        let json = serde_json::to_value(to_saved(&layout)).unwrap();
        let first = &json[0];
        assert!(first.get("is_draggable").is_none());
        assert!(first.get("is_resizable").is_none());
        assert!(first.get("i").is_some());
    }
}
