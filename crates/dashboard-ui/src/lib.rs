//! Terminal UI layer for the Marketing Intelligence dashboard.
//!
//! Provides themes, the KPI tile row, the data-status panel, the breakdown
//! and detail tables, and the tabbed application event loop built on top of
//! [`ratatui`].

pub mod app;
pub mod components;
pub mod table_view;
pub mod themes;

pub use dashboard_core as core;
