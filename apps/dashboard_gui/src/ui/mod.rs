pub mod app;
pub mod chart;
pub mod table;
pub mod theme;

pub use app::{DashboardApp, StartupConfig};
