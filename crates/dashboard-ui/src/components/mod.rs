//! Reusable rendering components for the dashboard views.

pub mod kpi_row;
pub mod status_panel;
