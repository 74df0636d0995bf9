use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "ufo-dash", version, about = "SUFOI UFO sightings dashboard")]
pub struct CliArgs {
    /// Print summary stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override dataset path
    #[arg(long, value_name = "PATH")]
    pub data: Option<String>,

    /// Override postal-code coordinate table
    #[arg(long = "coords", value_name = "PATH")]
    pub coords: Option<String>,

    /// Override export directory
    #[arg(long = "export-dir", value_name = "PATH")]
    pub export_dir: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(path) = &self.data {
            std::env::set_var("DATA_PATH", path);
        }
        if let Some(path) = &self.coords {
            std::env::set_var("POSTCODE_COORDS", path);
        }
        if let Some(dir) = &self.export_dir {
            std::env::set_var("EXPORT_DIR", dir);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
