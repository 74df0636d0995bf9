// UI module for ufo-dash
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Dashboard => screens::dashboard::render_dashboard(app, f),
        AppScreen::Filters => screens::filters::render_filters(app, f),
        AppScreen::DataTable => screens::table::render_table(app, f),
    }

    if app.show_help {
        widgets::popup::render_help_popup(f);
    }
}
