use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;

use crate::app::{handle_key_event, App};
use crate::ui;

/// Run the main application event loop.
pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    const EVENT_POLL_TIMEOUT: u64 = 100;

    loop {
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_key_event(app, key);
                    if !app.running {
                        break;
                    }
                }
                // Resized terminals are redrawn on the next pass.
                Ok(_) => {}
                Err(e) => {
                    return Err(color_eyre::eyre::eyre!("Event read error: {e}"));
                }
            }
        }
    }

    Ok(())
}

/// Run without a UI, printing summary statistics for the loaded
/// dataset instead.
pub fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.initialize_store()?;

    if json {
        render_headless_json(app)?;
    } else {
        render_headless_stats(app);
    }

    Ok(())
}

fn render_headless_stats(app: &App) {
    let stats = build_headless_stats(app);

    println!("\nUFO Sightings Stats");
    println!("===================");
    println!("Total records: {}", stats.total_records);
    println!("Skipped rows: {}", stats.skipped_rows);
    println!(
        "Year span: {}-{}",
        stats.year_span.0, stats.year_span.1
    );

    println!("\nSightings per year:");
    for (year, count) in &stats.per_year {
        println!("- {year}: {count}");
    }

    println!("\nTop colors:");
    for (color, count) in &stats.top_colors {
        println!("- {color}: {count}");
    }

    println!("\nBusiest hours:");
    for (hour, count) in &stats.busiest_hours {
        println!("- {hour:02}:00: {count}");
    }

    println!("\nTop postcodes:");
    for (postnr, count) in &stats.top_postcodes {
        println!("- {postnr}: {count}");
    }
}

fn render_headless_json(app: &App) -> Result<()> {
    let stats = build_headless_stats(app);
    let json = serde_json::to_string_pretty(&stats)?;
    println!("{json}");
    Ok(())
}

fn build_headless_stats(app: &App) -> HeadlessStats {
    let (skipped_rows, year_span) = app
        .store
        .as_ref()
        .map_or((0, (0, 0)), |store| (store.skipped(), store.year_bounds()));

    let mut busiest_hours = app.tables.hours.clone();
    busiest_hours.sort_by(|a, b| b.1.cmp(&a.1));
    busiest_hours.truncate(5);

    HeadlessStats {
        total_records: app.filtered_total(),
        skipped_rows,
        year_span,
        per_year: app.tables.yearly.clone(),
        top_colors: app.tables.top_colors.clone(),
        busiest_hours,
        top_postcodes: app.tables.top_postcodes.clone(),
    }
}

#[derive(serde::Serialize)]
struct HeadlessStats {
    total_records: usize,
    skipped_rows: usize,
    year_span: (i32, i32),
    per_year: Vec<(i32, u64)>,
    top_colors: Vec<(String, u64)>,
    busiest_hours: Vec<(u8, u64)>,
    top_postcodes: Vec<(String, u64)>,
}
