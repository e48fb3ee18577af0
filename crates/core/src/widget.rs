//! Widget catalog types and the built-in seed catalog.
//!
//! The catalog is the authoritative list of widget descriptors for a
//! dashboard session. It is fetched once at initialization and treated as
//! read-only for the session; persisted layouts are always reconciled
//! against it (the catalog wins every conflict).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Functional grouping of dashboard widgets.
///
/// `Advertisement` is a reserved category: widgets carrying it are laid
/// out as full-width banner rows by the default placement algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetCategory {
    Business,
    Information,
    Advertisement,
    News,
    Social,
    Analytics,
}

impl WidgetCategory {
    /// Stable string form, matching the `widgets.category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetCategory::Business => "business",
            WidgetCategory::Information => "information",
            WidgetCategory::Advertisement => "advertisement",
            WidgetCategory::News => "news",
            WidgetCategory::Social => "social",
            WidgetCategory::Analytics => "analytics",
        }
    }

    /// Parse the stable string form back into a category.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "business" => Ok(WidgetCategory::Business),
            "information" => Ok(WidgetCategory::Information),
            "advertisement" => Ok(WidgetCategory::Advertisement),
            "news" => Ok(WidgetCategory::News),
            "social" => Ok(WidgetCategory::Social),
            "analytics" => Ok(WidgetCategory::Analytics),
            other => Err(CoreError::Validation(format!(
                "Unknown widget category '{other}'"
            ))),
        }
    }
}

/// A catalog entry describing one dashboard widget type.
///
/// Immutable at runtime. The `movable` and `mandatory` flags are
/// authoritative: merged layouts recompute their derived flags from the
/// descriptor, never from persisted data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    /// Unique key, stable across sessions.
    pub id: String,
    pub display_name: String,
    pub category: WidgetCategory,
    /// Whether the user may drag/resize this widget.
    pub movable: bool,
    /// Whether the widget must appear in every layout (cannot be removed).
    pub mandatory: bool,
    pub description: String,
}

impl WidgetDescriptor {
    /// Whether this widget takes the full-width banner slot in default
    /// placement.
    pub fn is_full_width(&self) -> bool {
        self.category == WidgetCategory::Advertisement
    }
}

/// The built-in minimal catalog.
///
/// Used when the remote catalog cannot be fetched so the dashboard always
/// renders, and mirrored by the `widgets` table seed migration.
pub fn fallback_catalog() -> Vec<WidgetDescriptor> {
    fn widget(
        id: &str,
        display_name: &str,
        category: WidgetCategory,
        movable: bool,
        mandatory: bool,
        description: &str,
    ) -> WidgetDescriptor {
        WidgetDescriptor {
            id: id.to_string(),
            display_name: display_name.to_string(),
            category,
            movable,
            mandatory,
            description: description.to_string(),
        }
    }

    vec![
        widget(
            "weather",
            "Weather",
            WidgetCategory::Information,
            true,
            true,
            "Current conditions and three-day forecast for the city",
        ),
        widget(
            "banner-ad",
            "Sponsored banner",
            WidgetCategory::Advertisement,
            false,
            true,
            "Full-width advertisement slot sold to local businesses",
        ),
        widget(
            "news",
            "Local news",
            WidgetCategory::News,
            true,
            false,
            "Latest articles from the city newsroom",
        ),
        widget(
            "events",
            "Events",
            WidgetCategory::Information,
            true,
            false,
            "Upcoming events and ticket links",
        ),
        widget(
            "deals",
            "Deals",
            WidgetCategory::Business,
            true,
            false,
            "Active deals from local businesses",
        ),
        widget(
            "forum",
            "Forum",
            WidgetCategory::Social,
            true,
            false,
            "Recent threads from the community forum",
        ),
        widget(
            "social-feed",
            "Social feed",
            WidgetCategory::Social,
            true,
            false,
            "Aggregated posts from the city's social accounts",
        ),
        widget(
            "business-stats",
            "Business statistics",
            WidgetCategory::Analytics,
            true,
            false,
            "Page views and engagement for the owner's listings",
        ),
    ]
}

/// Validate catalog shape: non-empty, unique widget ids.
///
/// A malformed catalog is a deploy-time contract violation, so this fails
/// fast instead of degrading.
pub fn validate_catalog(catalog: &[WidgetDescriptor]) -> Result<(), CoreError> {
    let mut seen = std::collections::HashSet::new();
    for descriptor in catalog {
        if descriptor.id.is_empty() {
            return Err(CoreError::Validation(
                "Widget descriptor with empty id".into(),
            ));
        }
        if !seen.insert(descriptor.id.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate widget id '{}' in catalog",
                descriptor.id
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
