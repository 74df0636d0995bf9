use crate::app::App;
use crate::ui::widgets::tables::{scroll_offset, table_cells, TABLE_HEADERS};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub fn render_table(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search / summary
            Constraint::Min(5),    // Rows
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_search(app, f, layout[0]);
    render_rows(app, f, layout[1]);
    render_status(app, f, layout[2]);
    render_shortcuts(f, layout[3]);
}

fn render_search(app: &App, f: &mut Frame<'_>, area: Rect) {
    let (text, style) = if app.searching {
        (
            format!("/{}_", app.search_input),
            Style::default().fg(Color::Yellow),
        )
    } else if app.search_input.is_empty() {
        (
            "Press / to search".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            format!("/{}", app.search_input),
            Style::default().fg(Color::White),
        )
    };

    let title = format!(
        " Data Table ({} of {} rows) ",
        app.table_rows.len(),
        app.filtered_total()
    );

    let paragraph = Paragraph::new(TextLine::from(Span::styled(text, style))).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(paragraph, area);
}

fn render_rows(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    if app.table_rows.is_empty() {
        let paragraph = Paragraph::new("No sightings match")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(paragraph, area);
        return;
    }

    let visible = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(app.table_rows.len(), visible.max(1), app.selected_row);

    let header = Row::new(TABLE_HEADERS.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = app
        .table_rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(index, record)| {
            let style = if index == app.selected_row {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(table_cells(record).map(Cell::from)).style(style)
        })
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(11),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Min(18),
        Constraint::Length(7),
        Constraint::Min(12),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status = Paragraph::new(app.status_message.as_str())
        .style(style)
        .block(
            Block::default()
                .title(" Status ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        );

    f.render_widget(status, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let hints =
        Paragraph::new("Up/Down: row | /: search | d: export CSV | Esc: back | ?: help | q: quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
    f.render_widget(hints, area);
}
