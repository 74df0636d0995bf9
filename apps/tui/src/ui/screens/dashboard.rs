use crate::app::{App, ChartTab};
use crate::ui::widgets::charts::{
    render_chart_tabs, render_color_chart, render_color_legend, render_duration_chart,
    render_hour_chart, render_yearly_chart,
};
use crate::ui::widgets::heatmap::render_seasonality;
use crate::ui::widgets::map::{render_map, render_top_postcodes};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Chart tabs
            Constraint::Min(8),    // Chart panel
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title(app, f, layout[0]);
    render_chart_tabs(app, f, layout[1]);
    render_chart_panel(app, f, layout[2]);
    render_status(app, f, layout[3]);
    render_shortcuts(f, layout[4]);
}

fn render_title(app: &App, f: &mut Frame<'_>, area: Rect) {
    let subset = format!(
        "{} of {} sightings",
        app.filtered_total(),
        app.store.as_ref().map_or(0, |s| s.len())
    );

    let title = Paragraph::new(Text::from(TextLine::from(vec![
        Span::styled(
            "UFO Sightings ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Dashboard",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(subset, Style::default().fg(Color::Gray)),
    ])))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .alignment(Alignment::Left);

    f.render_widget(title, area);
}

fn render_chart_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chart_split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area.inner(Margin::new(0, 1)));

    match app.chart_tab() {
        ChartTab::Map => {
            render_map(app, f, chart_split[0]);
            render_top_postcodes(app, f, chart_split[1]);
        }
        ChartTab::Hours => {
            render_hour_chart(app, f, chart_split[0]);
            render_duration_chart(app, f, chart_split[1]);
        }
        ChartTab::Seasonality => {
            render_seasonality(app, f, chart_split[0]);
            render_yearly_chart(app, f, chart_split[1]);
        }
        ChartTab::Colors => {
            render_color_chart(app, f, chart_split[0]);
            render_color_legend(app, f, chart_split[1]);
        }
    }
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
    let hints = Paragraph::new("Left/Right: chart | Tab: screens | f: filters | t: table | r: reload | ?: help | q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(hints, area);
}
