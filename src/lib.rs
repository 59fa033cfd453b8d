//! Wireless performance dashboard: load a measurement table, filter it by
//! signal quality, device and traffic type, and derive the chart grid.
//!
//! The [`data`] and [`charts`] modules hold all computation and are usable
//! without the UI; [`app`] and [`ui`] render their results with egui.

pub mod app;
pub mod charts;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
