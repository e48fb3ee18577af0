//! Core domain logic for the CityHub dashboard platform.
//!
//! Owns the widget catalog types, the grid layout engine (default
//! placement, merge, dirty-state machine), the viewport visibility
//! tracker, and the async session orchestration that ties them to a
//! persistence backend. This crate performs no I/O of its own; network
//! and storage live behind the [`store::DashboardBackend`] port.

pub mod engine;
pub mod error;
pub mod layout;
pub mod session;
pub mod store;
pub mod types;
pub mod visibility;
pub mod widget;
