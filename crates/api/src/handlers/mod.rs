//! Request handlers for the dashboard endpoints.
//!
//! Handlers delegate to the [`crate::store::DashboardStore`] behind
//! `AppState` and map errors via [`crate::error::AppError`].

pub mod catalog;
pub mod layout;
