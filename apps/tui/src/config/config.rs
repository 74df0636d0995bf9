use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::data::sun::{
    SunCalculator, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_TWILIGHT_MARGIN_HOURS,
};

/// Default dataset location relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/sufoi_observations_cleaned.csv";

/// Resolved application configuration. Everything comes from the
/// environment (optionally seeded from a `.env` file); the CLI writes
/// its overrides into the environment before this runs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    /// Optional postal-code coordinate override table.
    pub coords_path: Option<PathBuf>,
    /// Directory the filtered-subset export lands in.
    pub export_dir: PathBuf,
    pub sun: SunCalculator,
    pub debug: bool,
}

/// Reads configuration from the environment.
pub fn init_app_config() -> AppConfig {
    // Load environment variables from a .env file when present.
    dotenv().ok();

    let data_path = env::var("DATA_PATH")
        .map_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from);
    let coords_path = env::var("POSTCODE_COORDS").ok().map(PathBuf::from);
    let export_dir = env::var("EXPORT_DIR").map_or_else(|_| PathBuf::from("."), PathBuf::from);

    let latitude = float_var("SUN_LATITUDE", DEFAULT_LATITUDE);
    let longitude = float_var("SUN_LONGITUDE", DEFAULT_LONGITUDE);
    let margin = float_var("TWILIGHT_MARGIN_HOURS", DEFAULT_TWILIGHT_MARGIN_HOURS);

    AppConfig {
        data_path,
        coords_path,
        export_dir,
        sun: SunCalculator::new(latitude, longitude, margin),
        debug: env::var("DEBUG").is_ok(),
    }
}

fn float_var(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|text| text.parse().ok())
        .unwrap_or(default)
}
