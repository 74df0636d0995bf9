use crate::app::App;
use crate::data::postcodes::{DENMARK_LAT_RANGE, DENMARK_LON_RANGE};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

/// Sighting locations as a scatter plot over the Denmark bounding box,
/// longitude on x and latitude on y. Busier locations get a brighter
/// tier.
pub fn render_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    if app.tables.map_points.is_empty() {
        let block = Block::default()
            .title("Sighting Map")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let paragraph = Paragraph::new("No mappable sightings match the filters")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let max_count = app
        .tables
        .map_points
        .iter()
        .map(|p| p.count)
        .max()
        .unwrap_or(1)
        .max(1);

    let mut quiet = Vec::new();
    let mut busy = Vec::new();
    for point in &app.tables.map_points {
        let coords = (point.longitude, point.latitude);
        if point.count * 2 >= max_count {
            busy.push(coords);
        } else {
            quiet.push(coords);
        }
    }

    let datasets = vec![
        Dataset::default()
            .name("Sightings")
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Cyan))
            .data(&quiet),
        Dataset::default()
            .name("Hotspots")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&busy),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title("Sighting Map (Denmark)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title("Lon")
                .style(Style::default().fg(Color::Gray))
                .bounds([DENMARK_LON_RANGE.0, DENMARK_LON_RANGE.1])
                .labels(vec![
                    Span::raw(format!("{:.1}", DENMARK_LON_RANGE.0)),
                    Span::raw(format!("{:.1}", DENMARK_LON_RANGE.1)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Lat")
                .style(Style::default().fg(Color::Gray))
                .bounds([DENMARK_LAT_RANGE.0, DENMARK_LAT_RANGE.1])
                .labels(vec![
                    Span::raw(format!("{:.1}", DENMARK_LAT_RANGE.0)),
                    Span::raw(format!("{:.1}", DENMARK_LAT_RANGE.1)),
                ]),
        );

    f.render_widget(chart, area);
}

/// The ten busiest postcodes next to the map.
pub fn render_top_postcodes(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Top Postcodes")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.tables.top_postcodes.is_empty() {
        let paragraph = Paragraph::new("No postcodes in the current subset")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let lines = app
        .tables
        .top_postcodes
        .iter()
        .map(|(postnr, count)| {
            let city = app
                .postcodes
                .lookup(postnr)
                .map_or(String::new(), |(lat, lon)| format!("  ({lat:.2}, {lon:.2})"));
            format!("{postnr}: {count}{city}")
        })
        .collect::<Vec<_>>()
        .join("\n");

    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, area);
}
