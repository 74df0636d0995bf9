use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::state::{App, AppScreen, FilterSection};

/// Routes a key press to the handler for the active screen. The help
/// popup and the search box capture input before anything else.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if app.show_help {
        handle_help_keys(app, key);
        return;
    }
    if app.searching {
        handle_search_keys(app, key);
        return;
    }
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('?') | KeyCode::F(1) => app.show_help = true,
        KeyCode::Char('r') => app.reload(),
        KeyCode::Tab => {
            app.screen = match app.screen {
                AppScreen::Dashboard => AppScreen::Filters,
                AppScreen::Filters => AppScreen::DataTable,
                AppScreen::DataTable => AppScreen::Dashboard,
            };
        }
        KeyCode::Char('f') => app.screen = AppScreen::Filters,
        KeyCode::Char('t') => app.screen = AppScreen::DataTable,
        _ => match app.screen {
            AppScreen::Dashboard => handle_dashboard_keys(app, key),
            AppScreen::Filters => handle_filter_keys(app, key),
            AppScreen::DataTable => handle_table_keys(app, key),
        },
    }
}

fn handle_help_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1) => {
            app.show_help = false;
        }
        _ => {}
    }
}

fn handle_search_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.searching = false;
            app.search_input.clear();
            app.refresh_table_rows();
        }
        KeyCode::Enter => app.searching = false,
        KeyCode::Backspace => {
            app.search_input.pop();
            app.refresh_table_rows();
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.refresh_table_rows();
        }
        _ => {}
    }
}

fn handle_dashboard_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Right | KeyCode::Char('l') => app.next_chart_tab(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_chart_tab(),
        _ => {}
    }
}

fn handle_filter_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.screen = AppScreen::Dashboard,
        KeyCode::BackTab => app.filter_section = app.filter_section.next(),
        KeyCode::Char('n') => app.filter_section = app.filter_section.next(),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Up | KeyCode::Char('k') => match app.filter_section {
            FilterSection::Years => app.year_cursor = 0,
            FilterSection::Colors => {
                app.color_cursor = app.color_cursor.saturating_sub(1);
            }
            FilterSection::Countries => {
                app.country_cursor = app.country_cursor.saturating_sub(1);
            }
        },
        KeyCode::Down | KeyCode::Char('j') => match app.filter_section {
            FilterSection::Years => app.year_cursor = 1,
            FilterSection::Colors => {
                if app.color_cursor + 1 < app.color_options.len() {
                    app.color_cursor += 1;
                }
            }
            FilterSection::Countries => {
                if app.country_cursor + 1 < app.country_options.len() {
                    app.country_cursor += 1;
                }
            }
        },
        KeyCode::Left => {
            if app.filter_section == FilterSection::Years {
                app.adjust_year(-1);
            }
        }
        KeyCode::Right => {
            if app.filter_section == FilterSection::Years {
                app.adjust_year(1);
            }
        }
        KeyCode::Char(' ') | KeyCode::Enter => match app.filter_section {
            FilterSection::Years => {}
            FilterSection::Colors => app.toggle_color(),
            FilterSection::Countries => app.toggle_country(),
        },
        _ => {}
    }
}

fn handle_table_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.screen = AppScreen::Dashboard,
        KeyCode::Up | KeyCode::Char('k') => {
            app.selected_row = app.selected_row.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.selected_row + 1 < app.table_rows.len() {
                app.selected_row += 1;
            }
        }
        KeyCode::PageUp => {
            app.selected_row = app.selected_row.saturating_sub(20);
        }
        KeyCode::PageDown => {
            if !app.table_rows.is_empty() {
                app.selected_row = (app.selected_row + 20).min(app.table_rows.len() - 1);
            }
        }
        KeyCode::Home => app.selected_row = 0,
        KeyCode::End => {
            app.selected_row = app.table_rows.len().saturating_sub(1);
        }
        KeyCode::Char('/') => {
            app.searching = true;
        }
        KeyCode::Char('d') => app.export(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn q_quits() {
        let mut app = App::new();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn tab_cycles_screens() {
        let mut app = App::new();
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.screen, AppScreen::Filters);
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.screen, AppScreen::DataTable);
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.screen, AppScreen::Dashboard);
    }

    #[test]
    fn help_captures_input() {
        let mut app = App::new();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        // 'q' closes the popup instead of quitting
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.running);
        assert!(!app.show_help);
    }

    #[test]
    fn search_typing_updates_query() {
        let mut app = App::new();
        app.screen = AppScreen::DataTable;
        handle_key_event(&mut app, key(KeyCode::Char('/')));
        assert!(app.searching);
        handle_key_event(&mut app, key(KeyCode::Char('r')));
        handle_key_event(&mut app, key(KeyCode::Char('ø')));
        assert_eq!(app.search_input, "rø");
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(!app.searching);
        assert!(app.search_input.is_empty());
    }

    #[test]
    fn chart_tabs_wrap() {
        let mut app = App::new();
        handle_key_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.chart_tab_index, 3);
        handle_key_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.chart_tab_index, 0);
    }
}
