// App module for ufo-dash
// Handles application state and the filter pipeline

pub mod input;
pub mod state;

pub use input::handle_key_event;
pub use state::{App, AppScreen, ChartTab, DashboardTables, FilterSection};
