mod app;
mod cli;
mod config;
mod data;
mod domain;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = cli::CliArgs::parse();
    args.apply_env_overrides();

    let mut app = App::new();

    // Headless mode when asked for, or when stdout is not a terminal.
    if args.headless || args.json || !is_terminal() {
        return event::run_headless(&mut app, args.json);
    }

    if let Err(e) = app.initialize_store() {
        eprintln!("Error loading dataset: {e}");
        return Err(e);
    }

    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app);

    terminal::cleanup(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
