//! Repository for the `widgets` table (the dashboard widget catalog).

use sqlx::PgPool;

use crate::models::widget::WidgetRow;

/// Column list for `widgets` queries.
const WIDGET_COLUMNS: &str = "\
    id, display_name, category, movable, mandatory, description, \
    sort_order, created_at, updated_at";

/// Provides data access for the widget catalog.
pub struct WidgetRepo;

impl WidgetRepo {
    /// List the full catalog in stable order.
    ///
    /// Default placement is index-sensitive, so the ordering must not
    /// depend on insertion accidents: `sort_order` first, id as the
    /// tie-break.
    pub async fn list(pool: &PgPool) -> Result<Vec<WidgetRow>, sqlx::Error> {
        let query = format!("SELECT {WIDGET_COLUMNS} FROM widgets ORDER BY sort_order, id");
        sqlx::query_as::<_, WidgetRow>(&query).fetch_all(pool).await
    }
}
