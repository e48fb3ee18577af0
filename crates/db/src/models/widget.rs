//! Widget catalog models.
//!
//! The `widgets` table is the production source of the catalog served by
//! `GET /widgets/catalog`; rows convert into
//! [`cityhub_core::widget::WidgetDescriptor`] for everything downstream.

use cityhub_core::error::CoreError;
use cityhub_core::types::Timestamp;
use cityhub_core::widget::{WidgetCategory, WidgetDescriptor};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `widgets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WidgetRow {
    pub id: String,
    pub display_name: String,
    pub category: String,
    pub movable: bool,
    pub mandatory: bool,
    pub description: String,
    /// Stable catalog ordering; default placement is index-sensitive.
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WidgetRow {
    /// Convert the row into a catalog descriptor.
    ///
    /// Fails on an unknown category string, which indicates a seed or
    /// migration bug rather than a runtime condition.
    pub fn into_descriptor(self) -> Result<WidgetDescriptor, CoreError> {
        Ok(WidgetDescriptor {
            category: WidgetCategory::parse(&self.category)?,
            id: self.id,
            display_name: self.display_name,
            movable: self.movable,
            mandatory: self.mandatory,
            description: self.description,
        })
    }
}
