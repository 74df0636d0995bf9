use crate::app::{App, FilterSection};
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_filters(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Sections
            Constraint::Length(1), // Shortcuts
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title(app, f, layout[0]);

    let sections = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(layout[1]);

    render_year_section(app, f, sections[0]);
    render_option_list(
        app,
        f,
        sections[1],
        "Colors",
        FilterSection::Colors,
        &app.color_options,
        app.color_cursor,
        |app, option| app.filter.colors.contains(option),
    );
    render_option_list(
        app,
        f,
        sections[2],
        "Countries",
        FilterSection::Countries,
        &app.country_options,
        app.country_cursor,
        |app, option| app.filter.countries.contains(option),
    );

    render_shortcuts(f, layout[2]);
}

fn border_style(app: &App, section: FilterSection) -> Style {
    if app.filter_section == section {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn render_title(app: &App, f: &mut Frame<'_>, area: Rect) {
    let summary = format!(
        "{} sightings match | years {}-{} | {} colors | {} countries",
        app.filtered_total(),
        app.filter.year_range.0,
        app.filter.year_range.1,
        app.filter.colors.len(),
        app.filter.countries.len(),
    );

    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Filters",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(summary, Style::default().fg(Color::Gray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(title, area);
}

fn render_year_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let (lo, hi) = app.filter.year_range;
    let (min_year, max_year) = app.year_bounds;

    let bound_style = |cursor: usize| {
        if app.filter_section == FilterSection::Years && app.year_cursor == cursor {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let lines = vec![
        TextLine::from(vec![
            Span::raw("From: "),
            Span::styled(lo.to_string(), bound_style(0)),
        ]),
        TextLine::from(vec![
            Span::raw("To:   "),
            Span::styled(hi.to_string(), bound_style(1)),
        ]),
        TextLine::from(""),
        TextLine::from(Span::styled(
            format!("Dataset spans {min_year}-{max_year}"),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .title(" Years ")
        .borders(Borders::ALL)
        .border_style(border_style(app, FilterSection::Years));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_option_list(
    app: &App,
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    section: FilterSection,
    options: &[String],
    cursor: usize,
    selected: impl Fn(&App, &str) -> bool,
) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_style(app, section));

    if options.is_empty() {
        let paragraph = Paragraph::new("Not present in this dataset")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(paragraph, area);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(options.len(), visible.max(1), cursor);

    let lines = options
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(index, option)| {
            let mark = if selected(app, option) { "[x]" } else { "[ ]" };
            let style = if app.filter_section == section && index == cursor {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            TextLine::from(Span::styled(format!("{mark} {option}"), style))
        })
        .collect::<Vec<_>>();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let hints = Paragraph::new(
        "n: next section | Up/Down: cursor | Left/Right: year bound | Space: toggle | c: clear | Esc: back",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    f.render_widget(hints, area);
}
