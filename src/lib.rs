//! Village land-records dashboard: load a parcel table, filter it, and show
//! extent KPIs, charts and tables in an egui window.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
