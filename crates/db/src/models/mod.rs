//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row, plus conversions into the core domain
//! types where the row is not used directly.

pub mod layout;
pub mod widget;
