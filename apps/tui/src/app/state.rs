use color_eyre::Result;
use std::path::PathBuf;

use crate::config::init_app_config;
use crate::data::aggregate::{
    self, color_tally, duration_histogram, hour_histogram, map_points, month_density,
    postcode_counts, yearly_counts, MapPoint, MonthDensity,
};
use crate::data::export::export_filtered;
use crate::data::extract::DerivedExtractor;
use crate::data::filter::{search, SightingFilter};
use crate::data::postcodes::PostcodeTable;
use crate::data::{SchemaInfo, Sighting, SightingStore};
use crate::domain::{DurationBucket, DEFAULT_COUNTRY};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppScreen {
    Dashboard,
    Filters,
    DataTable,
}

/// Chart tabs on the dashboard.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ChartTab {
    Map,
    Hours,
    Seasonality,
    Colors,
}

impl ChartTab {
    pub const ALL: [Self; 4] = [Self::Map, Self::Hours, Self::Seasonality, Self::Colors];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Map),
            1 => Some(Self::Hours),
            2 => Some(Self::Seasonality),
            3 => Some(Self::Colors),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Map => "Map",
            Self::Hours => "Hours",
            Self::Seasonality => "Seasonality",
            Self::Colors => "Colors",
        }
    }
}

/// Which block of the filter screen has focus.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FilterSection {
    Years,
    Colors,
    Countries,
}

impl FilterSection {
    pub const fn next(self) -> Self {
        match self {
            Self::Years => Self::Colors,
            Self::Colors => Self::Countries,
            Self::Countries => Self::Years,
        }
    }
}

/// All chart tables for the current working subset, recomputed as one
/// unit on every filter change.
#[derive(Debug, Default)]
pub struct DashboardTables {
    pub map_points: Vec<MapPoint>,
    pub top_postcodes: Vec<(String, u64)>,
    pub hours: Vec<(u8, u64)>,
    pub durations: Vec<(DurationBucket, u64)>,
    pub density: MonthDensity,
    pub top_colors: Vec<(String, u64)>,
    pub yearly: Vec<(i32, u64)>,
}

impl DashboardTables {
    pub fn compute(records: &[Sighting], schema: SchemaInfo, coords: &PostcodeTable) -> Self {
        Self {
            map_points: map_points(records, schema, coords),
            top_postcodes: {
                let mut counts = postcode_counts(records);
                counts.truncate(10);
                counts
            },
            hours: hour_histogram(records),
            durations: duration_histogram(records),
            density: month_density(records),
            top_colors: color_tally(records, 10),
            yearly: yearly_counts(records),
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,
    pub status_message: String,

    pub store: Option<SightingStore>,
    pub postcodes: PostcodeTable,
    pub export_dir: PathBuf,
    pub debug: bool,

    pub filter: SightingFilter,
    pub year_bounds: (i32, i32),
    pub color_options: Vec<String>,
    pub country_options: Vec<String>,

    /// Fresh derivations of the current filter; discarded and rebuilt
    /// on every interaction that changes it.
    pub filtered: Vec<Sighting>,
    pub tables: DashboardTables,

    pub chart_tab_index: usize,
    pub filter_section: FilterSection,
    /// 0 = lower year bound, 1 = upper.
    pub year_cursor: usize,
    pub color_cursor: usize,
    pub country_cursor: usize,

    pub selected_row: usize,
    pub searching: bool,
    pub search_input: String,
    /// The filtered subset narrowed by the search box.
    pub table_rows: Vec<Sighting>,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            screen: AppScreen::Dashboard,
            show_help: false,
            status_message: String::new(),
            store: None,
            postcodes: PostcodeTable::builtin(),
            export_dir: PathBuf::from("."),
            debug: false,
            filter: SightingFilter::all((0, 0)),
            year_bounds: (0, 0),
            color_options: Vec::new(),
            country_options: Vec::new(),
            filtered: Vec::new(),
            tables: DashboardTables::default(),
            chart_tab_index: 0,
            filter_section: FilterSection::Years,
            year_cursor: 0,
            color_cursor: 0,
            country_cursor: 0,
            selected_row: 0,
            searching: false,
            search_input: String::new(),
            table_rows: Vec::new(),
        }
    }

    /// Reads configuration and performs the one load of the session.
    /// A failure here is fatal to the caller; there is nothing to show
    /// without the dataset.
    pub fn initialize_store(&mut self) -> Result<()> {
        let config = init_app_config();
        self.debug = config.debug;
        self.export_dir = config.export_dir.clone();

        self.postcodes = match &config.coords_path {
            Some(path) => PostcodeTable::from_csv(path)?,
            None => PostcodeTable::builtin(),
        };

        let extractor = DerivedExtractor::new(config.sun)?;
        let store = SightingStore::open(&config.data_path, extractor)?;

        if self.debug {
            eprintln!(
                "Loaded {} records from {} ({} skipped)",
                store.len(),
                store.path().display(),
                store.skipped()
            );
        }

        self.year_bounds = store.year_bounds();
        self.color_options = store.distinct_colors();
        self.country_options = store.distinct_countries();
        self.filter = SightingFilter::all(self.year_bounds);
        // The primary country starts selected, as the dashboard always
        // has.
        if self.country_options.iter().any(|c| c == DEFAULT_COUNTRY) {
            self.filter.countries.insert(DEFAULT_COUNTRY.to_string());
        }

        self.store = Some(store);
        self.recompute();
        Ok(())
    }

    /// Explicit re-read of the dataset file; the only cache
    /// invalidation there is.
    pub fn reload(&mut self) {
        let Some(store) = self.store.as_mut() else {
            self.status_message = "No dataset loaded".to_string();
            return;
        };
        match store.reload() {
            Ok(()) => {
                self.year_bounds = store.year_bounds();
                self.color_options = store.distinct_colors();
                self.country_options = store.distinct_countries();
                self.clamp_filter_to_bounds();
                self.recompute();
                self.status_message = format!("Reloaded {} records", self.filtered_total());
            }
            Err(e) => {
                self.status_message = format!("Error: reload failed: {e}");
            }
        }
    }

    pub fn schema(&self) -> SchemaInfo {
        self.store.as_ref().map_or_else(SchemaInfo::default, SightingStore::schema)
    }

    /// Runs the whole pipeline again: filter, aggregate, re-apply the
    /// search. Called after every filter mutation.
    pub fn recompute(&mut self) {
        let schema = self.schema();
        self.filtered = match &self.store {
            Some(store) => self.filter.apply(store.records(), schema),
            None => Vec::new(),
        };
        self.tables = DashboardTables::compute(&self.filtered, schema, &self.postcodes);
        self.refresh_table_rows();
    }

    pub fn refresh_table_rows(&mut self) {
        self.table_rows = search(&self.filtered, &self.search_input);
        if self.selected_row >= self.table_rows.len() {
            self.selected_row = self.table_rows.len().saturating_sub(1);
        }
    }

    pub fn filtered_total(&self) -> usize {
        self.filtered.len()
    }

    /// Moves the focused year bound, clamped to the observed span and
    /// keeping the interval well-formed.
    pub fn adjust_year(&mut self, delta: i32) {
        let (min_year, max_year) = self.year_bounds;
        let (lo, hi) = self.filter.year_range;
        self.filter.year_range = if self.year_cursor == 0 {
            let lo = (lo + delta).clamp(min_year, hi);
            (lo, hi)
        } else {
            let hi = (hi + delta).clamp(lo, max_year);
            (lo, hi)
        };
        self.recompute();
    }

    pub fn toggle_color(&mut self) {
        if let Some(option) = self.color_options.get(self.color_cursor) {
            if !self.filter.colors.remove(option) {
                self.filter.colors.insert(option.clone());
            }
            self.recompute();
        }
    }

    pub fn toggle_country(&mut self) {
        if let Some(option) = self.country_options.get(self.country_cursor) {
            if !self.filter.countries.remove(option) {
                self.filter.countries.insert(option.clone());
            }
            self.recompute();
        }
    }

    pub fn clear_filters(&mut self) {
        self.filter = SightingFilter::all(self.year_bounds);
        self.recompute();
        self.status_message = "Filters cleared".to_string();
    }

    /// Writes the filtered subset (search box not applied) to the
    /// export directory.
    pub fn export(&mut self) {
        match export_filtered(&self.filtered, self.schema(), &self.export_dir) {
            Ok(path) => {
                self.status_message = format!(
                    "Exported {} records to {}",
                    self.filtered.len(),
                    path.display()
                );
            }
            Err(e) => {
                self.status_message = format!("Error: export failed: {e}");
            }
        }
    }

    pub const fn chart_tab(&self) -> ChartTab {
        match ChartTab::from_index(self.chart_tab_index) {
            Some(tab) => tab,
            None => ChartTab::Map,
        }
    }

    pub fn next_chart_tab(&mut self) {
        self.chart_tab_index = (self.chart_tab_index + 1) % ChartTab::ALL.len();
    }

    pub fn prev_chart_tab(&mut self) {
        self.chart_tab_index =
            (self.chart_tab_index + ChartTab::ALL.len() - 1) % ChartTab::ALL.len();
    }

    /// Static reference lines for the hour chart.
    pub const fn sun_reference_hours() -> (u8, u8) {
        (aggregate::AVG_SUNRISE_HOUR, aggregate::AVG_SUNSET_HOUR)
    }

    fn clamp_filter_to_bounds(&mut self) {
        let (min_year, max_year) = self.year_bounds;
        let (lo, hi) = self.filter.year_range;
        let lo = lo.clamp(min_year, max_year);
        let hi = hi.clamp(lo, max_year);
        self.filter.year_range = (lo, hi);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sun::SunCalculator;
    use std::io::Write as _;

    const DATASET: &str = "\
date,start_time,duration_seconds,location,colors,country,year
01-06-2020,22:15,90,\"Algade 5, 8000 Aarhus\",\"rød, blå\",Danmark,2020
15-03-2019,20:00,300,\"Nytorv 2, 9000 Aalborg\",grøn,Danmark,2019
02-02-2021,23:00,45,\"Algade 7, 8000 Aarhus\",rød,Danmark,2021
";

    fn app_with_dataset(name: &str) -> App {
        let path = std::env::temp_dir().join(format!("ufo-dash-app-{name}.csv"));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(DATASET.as_bytes()).unwrap();

        let extractor = DerivedExtractor::new(SunCalculator::default()).unwrap();
        let store = SightingStore::open(&path, extractor).unwrap();

        let mut app = App::new();
        app.year_bounds = store.year_bounds();
        app.color_options = store.distinct_colors();
        app.country_options = store.distinct_countries();
        app.filter = SightingFilter::all(app.year_bounds);
        app.store = Some(store);
        app.recompute();
        app
    }

    #[test]
    fn recompute_rebuilds_every_table() {
        let app = app_with_dataset("recompute");
        assert_eq!(app.filtered_total(), 3);
        assert_eq!(app.tables.yearly, vec![(2019, 1), (2020, 1), (2021, 1)]);
        assert_eq!(app.tables.top_postcodes[0], ("8000".to_string(), 2));
        assert_eq!(app.tables.top_colors[0], ("rød".to_string(), 2));
        assert_eq!(app.tables.density.years, vec![2019, 2020, 2021]);
    }

    #[test]
    fn year_adjustment_clamps_and_narrows() {
        let mut app = app_with_dataset("years");
        app.year_cursor = 0;
        app.adjust_year(1);
        assert_eq!(app.filter.year_range, (2020, 2021));
        assert_eq!(app.filtered_total(), 2);

        // The lower bound cannot pass the upper.
        app.adjust_year(5);
        assert_eq!(app.filter.year_range, (2021, 2021));
        app.adjust_year(-10);
        assert_eq!(app.filter.year_range, (2019, 2021));
    }

    #[test]
    fn color_toggle_filters_and_clear_restores() {
        let mut app = app_with_dataset("colors");
        let at = app
            .color_options
            .iter()
            .position(|c| c == "grøn")
            .unwrap();
        app.color_cursor = at;
        app.toggle_color();
        assert_eq!(app.filtered_total(), 1);
        assert_eq!(app.table_rows.len(), 1);

        app.clear_filters();
        assert_eq!(app.filtered_total(), 3);
    }

    #[test]
    fn search_narrows_the_table_but_not_the_charts() {
        let mut app = app_with_dataset("search");
        app.search_input = "aalborg".to_string();
        app.refresh_table_rows();
        assert_eq!(app.table_rows.len(), 1);
        assert_eq!(app.filtered_total(), 3);
        assert_eq!(app.tables.yearly.len(), 3);
    }

    #[test]
    fn export_writes_the_filtered_subset() {
        let mut app = app_with_dataset("export");
        let dir = std::env::temp_dir().join("ufo-dash-app-export");
        std::fs::create_dir_all(&dir).unwrap();
        app.export_dir.clone_from(&dir);

        app.filter.year_range = (2020, 2020);
        app.recompute();
        app.export();

        assert!(app.status_message.starts_with("Exported 1"));
        let written = std::fs::read_to_string(
            dir.join(crate::data::export::EXPORT_FILE_NAME),
        )
        .unwrap();
        assert!(written.contains("8000"));
        assert!(!written.contains("9000"));
    }

    #[test]
    fn chart_tab_cycle_wraps() {
        let mut app = App::new();
        assert_eq!(app.chart_tab(), ChartTab::Map);
        app.prev_chart_tab();
        assert_eq!(app.chart_tab(), ChartTab::Colors);
        app.next_chart_tab();
        assert_eq!(app.chart_tab(), ChartTab::Map);
    }
}
