use color_eyre::Result;
use dotenv::dotenv;
use std::env;

use ufo_dash::config::DEFAULT_DATA_PATH;
use ufo_dash::data::extract::DerivedExtractor;
use ufo_dash::data::sun::SunCalculator;
use ufo_dash::data::SightingStore;

/// Loads the dataset and prints what the parser made of it. Useful
/// when a new dataset export misbehaves.
fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let path = env::var("DATA_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());
    println!("Checking dataset at {path}...");

    let extractor = DerivedExtractor::new(SunCalculator::default())?;
    let store = SightingStore::open(path, extractor)?;

    let schema = store.schema();
    println!("Records: {}", store.len());
    println!("Skipped rows: {}", store.skipped());
    println!("Country column: {}", schema.has_country);
    println!("Coordinate columns: {}", schema.has_coordinates);

    let (min_year, max_year) = store.year_bounds();
    println!("Year span: {min_year}-{max_year}");

    let with_date = store
        .records()
        .iter()
        .filter(|r| r.date.is_value())
        .count();
    let with_hour = store
        .records()
        .iter()
        .filter(|r| r.hour.is_value())
        .count();
    let with_postnr = store
        .records()
        .iter()
        .filter(|r| r.postal_code.is_some())
        .count();
    println!("Parsed dates: {with_date}");
    println!("Parsed hours: {with_hour}");
    println!("Postal codes: {with_postnr}");

    Ok(())
}
