use crate::app::{App, ChartTab};
use crate::domain::KNOWN_COLOR_NAMES;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs,
};
use ratatui::Frame;

pub fn render_chart_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = ChartTab::ALL
        .iter()
        .map(|tab| TextLine::from(tab.label()))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.chart_tab_index)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn render_empty_chart(f: &mut Frame<'_>, area: Rect, title: &str) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new("No sightings match the filters")
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Sightings per hour of day, with vertical reference lines at the
/// average sunrise and sunset hours.
pub fn render_hour_chart(app: &App, f: &mut Frame<'_>, area: Rect) {
    if app.tables.hours.is_empty() {
        render_empty_chart(f, area, "Sightings by Hour");
        return;
    }

    let points = app
        .tables
        .hours
        .iter()
        .map(|&(hour, count)| (f64::from(hour), count as f64))
        .collect::<Vec<_>>();

    let max_count = app
        .tables
        .hours
        .iter()
        .map(|&(_, count)| count)
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    let (sunrise, sunset) = App::sun_reference_hours();
    let sunrise_line = [
        (f64::from(sunrise), 0.0),
        (f64::from(sunrise), max_count),
    ];
    let sunset_line = [(f64::from(sunset), 0.0), (f64::from(sunset), max_count)];

    let datasets = vec![
        Dataset::default()
            .name("Sightings")
            .marker(Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
        Dataset::default()
            .name(format!("Sunrise ~{sunrise:02}:00"))
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&sunrise_line),
        Dataset::default()
            .name(format!("Sunset ~{sunset:02}:00"))
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Magenta))
            .data(&sunset_line),
    ];

    let x_labels = vec![
        Span::raw("00"),
        Span::raw("06"),
        Span::raw("12"),
        Span::raw("18"),
        Span::raw("23"),
    ];
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{:.0}", max_count / 2.0)),
        Span::raw(format!("{max_count:.0}")),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title("Sightings by Hour")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title("Hour")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, 23.0])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Count")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_count])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

/// Duration histogram over the fixed buckets.
pub fn render_duration_chart(app: &App, f: &mut Frame<'_>, area: Rect) {
    if app.tables.durations.is_empty() {
        render_empty_chart(f, area, "Sighting Duration");
        return;
    }

    let bars: Vec<Bar<'_>> = app
        .tables
        .durations
        .iter()
        .map(|&(bucket, count)| {
            Bar::default()
                .value(count)
                .label(TextLine::from(bucket.label()))
                .style(Style::default().fg(Color::Cyan))
                .value_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let max_value = app
        .tables
        .durations
        .iter()
        .map(|&(_, count)| count)
        .max()
        .unwrap_or(0)
        .max(1);

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Sighting Duration")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(9);

    f.render_widget(chart, area);
}

const COLOR_PALETTE: [Color; 10] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::Blue,
    Color::LightRed,
    Color::LightYellow,
    Color::LightGreen,
    Color::LightCyan,
];

/// Terminal color for each entry of [`KNOWN_COLOR_NAMES`], same order.
const KNOWN_COLOR_STYLES: [Color; 13] = [
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::White,
    Color::DarkGray,
    Color::LightRed,
    Color::Magenta,
    Color::Rgb(139, 90, 43),
    Color::Gray,
    Color::Cyan,
    Color::LightMagenta,
    Color::LightYellow,
];

/// Bars take the reported color when it is a known name; anything else
/// cycles through the palette.
fn color_for(name: &str, index: usize) -> Color {
    KNOWN_COLOR_NAMES
        .iter()
        .position(|known| *known == name)
        .map_or(COLOR_PALETTE[index % COLOR_PALETTE.len()], |at| {
            KNOWN_COLOR_STYLES[at]
        })
}

/// Top reported colors as a bar chart.
pub fn render_color_chart(app: &App, f: &mut Frame<'_>, area: Rect) {
    if app.tables.top_colors.is_empty() {
        render_empty_chart(f, area, "Reported Colors");
        return;
    }

    let bars: Vec<Bar<'_>> = app
        .tables
        .top_colors
        .iter()
        .enumerate()
        .map(|(index, (name, count))| {
            Bar::default()
                .value(*count)
                .label(TextLine::from(name.clone()))
                .style(Style::default().fg(color_for(name, index)))
                .value_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let max_value = app
        .tables
        .top_colors
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(0)
        .max(1);

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Reported Colors (top 10)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(8);

    f.render_widget(chart, area);
}

/// Share of each color among all color mentions in the subset.
pub fn render_color_legend(app: &App, f: &mut Frame<'_>, area: Rect) {
    let total: u64 = app.tables.top_colors.iter().map(|(_, count)| count).sum();
    if total == 0 {
        render_empty_chart(f, area, "Color Share");
        return;
    }

    let lines = app
        .tables
        .top_colors
        .iter()
        .enumerate()
        .map(|(index, (name, count))| {
            #[allow(clippy::cast_precision_loss)]
            let share = (*count as f64 / total as f64) * 100.0;
            TextLine::from(vec![
                Span::styled("\u{25a0} ", Style::default().fg(color_for(name, index))),
                Span::raw(format!("{name}: {count} ({share:.1}%)")),
            ])
        })
        .collect::<Vec<_>>();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Color Share")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(paragraph, area);
}

/// Observation counts per year as a line.
pub fn render_yearly_chart(app: &App, f: &mut Frame<'_>, area: Rect) {
    if app.tables.yearly.is_empty() {
        render_empty_chart(f, area, "Sightings per Year");
        return;
    }

    let points = app
        .tables
        .yearly
        .iter()
        .map(|&(year, count)| (f64::from(year), count as f64))
        .collect::<Vec<_>>();

    let (first_year, _) = app.tables.yearly[0];
    let (last_year, _) = app.tables.yearly[app.tables.yearly.len() - 1];
    let max_count = app
        .tables
        .yearly
        .iter()
        .map(|&(_, count)| count)
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    let datasets = vec![Dataset::default()
        .name("Sightings")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title("Sightings per Year")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title("Year")
                .style(Style::default().fg(Color::Gray))
                .bounds([f64::from(first_year), f64::from(last_year.max(first_year + 1))])
                .labels(vec![
                    Span::raw(first_year.to_string()),
                    Span::raw(last_year.to_string()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Count")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_count])
                .labels(vec![Span::raw("0"), Span::raw(format!("{max_count:.0}"))]),
        );

    f.render_widget(chart, area);
}
