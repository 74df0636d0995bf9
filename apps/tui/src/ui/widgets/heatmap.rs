use crate::app::App;
use crate::domain::MONTH_LABELS;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Maps a cell count to an intensity color against the subset maximum.
fn cell_style(count: u64, max_count: u64) -> Style {
    if count == 0 {
        return Style::default().fg(Color::DarkGray);
    }
    let ratio = count as f64 / max_count as f64;
    let color = if ratio > 0.75 {
        Color::Red
    } else if ratio > 0.5 {
        Color::LightRed
    } else if ratio > 0.25 {
        Color::Yellow
    } else {
        Color::Green
    };
    Style::default().fg(color)
}

/// Year rows by month columns, every cell shown even when zero.
pub fn render_seasonality(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Seasonality (year x month)")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let density = &app.tables.density;
    if density.is_empty() {
        let paragraph = Paragraph::new("No sightings match the filters")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let max_count = density.max_count().max(1);

    let mut header = vec![Span::raw("      ")];
    for label in MONTH_LABELS {
        header.push(Span::styled(
            format!("{label:>5}"),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let mut lines = vec![TextLine::from(header)];

    // The visible window tracks the end of the span when there are
    // more year rows than terminal rows.
    let visible_rows = area.height.saturating_sub(3) as usize;
    let skip = density.years.len().saturating_sub(visible_rows.max(1));

    for (year, cells) in density.years.iter().zip(&density.cells).skip(skip) {
        let mut row = vec![Span::styled(
            format!("{year:>5} "),
            Style::default().fg(Color::Gray),
        )];
        for &count in cells {
            row.push(Span::styled(
                format!("{count:>5}"),
                cell_style(count, max_count),
            ));
        }
        lines.push(TextLine::from(row));
    }

    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cells_are_dimmed() {
        assert_eq!(cell_style(0, 10).fg, Some(Color::DarkGray));
    }

    #[test]
    fn intensity_scales_with_count() {
        assert_eq!(cell_style(1, 10).fg, Some(Color::Green));
        assert_eq!(cell_style(4, 10).fg, Some(Color::Yellow));
        assert_eq!(cell_style(6, 10).fg, Some(Color::LightRed));
        assert_eq!(cell_style(10, 10).fg, Some(Color::Red));
    }
}
