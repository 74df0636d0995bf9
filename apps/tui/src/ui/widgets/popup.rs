use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);

    horizontal_layout[1]
}

pub fn render_help_popup(f: &mut Frame<'_>) {
    let area = centered_rect(70, 80, f.area());
    f.render_widget(Clear, area);

    let heading = |text: &'static str| {
        TextLine::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        heading("About"),
        TextLine::from("Interactive dashboard over UFO sighting reports"),
        TextLine::from("collected by SUFOI, the Danish UFO organisation."),
        TextLine::from(""),
        heading("Global keys"),
        TextLine::from("  Tab        cycle screens"),
        TextLine::from("  f / t      jump to filters / data table"),
        TextLine::from("  r          reload the dataset from disk"),
        TextLine::from("  ? / F1     toggle this help"),
        TextLine::from("  q          quit"),
        TextLine::from(""),
        heading("Dashboard"),
        TextLine::from("  Left/Right switch chart tab"),
        TextLine::from(""),
        heading("Filters"),
        TextLine::from("  n          next section"),
        TextLine::from("  Up/Down    move cursor"),
        TextLine::from("  Left/Right adjust the focused year bound"),
        TextLine::from("  Space      toggle the highlighted option"),
        TextLine::from("  c          clear all filters"),
        TextLine::from(""),
        heading("Data table"),
        TextLine::from("  Up/Down    select row (PgUp/PgDn, Home/End)"),
        TextLine::from("  /          search all text columns"),
        TextLine::from("  d          export the filtered records as CSV"),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Press Esc to close",
            Style::default().fg(Color::Gray),
        )),
    ];

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(popup, area);
}
