//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod layout_repo;
pub mod widget_repo;

pub use layout_repo::LayoutRepo;
pub use widget_repo::WidgetRepo;
