//! The sighting store: reads the dataset CSV once at startup, enriches
//! every record, and hands out an immutable slice for the session.
//! Reload is explicit; nothing watches the file.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::extract::DerivedExtractor;
use crate::data::models::{clean_field, RawSighting, Sighting};
use crate::domain::DEFAULT_COUNTRY;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read dataset {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("cannot write export {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("dataset {path} has no usable records")]
    Empty { path: String },
    #[error("bad field pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Which optional columns the loaded file actually carries. Features
/// keyed on an absent column degrade instead of failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaInfo {
    pub has_country: bool,
    pub has_coordinates: bool,
}

#[derive(Debug)]
pub struct SightingStore {
    path: PathBuf,
    extractor: DerivedExtractor,
    records: Vec<Sighting>,
    schema: SchemaInfo,
    skipped: usize,
}

impl SightingStore {
    /// Opens and fully reads the dataset. Records without a parseable
    /// year are skipped and counted; everything else is retained with
    /// derived fields degrading to absent. Failing to open or read the
    /// file at all is the one fatal condition in the system.
    pub fn open(path: impl Into<PathBuf>, extractor: DerivedExtractor) -> Result<Self, DataError> {
        let path = path.into();
        let mut store = Self {
            path,
            extractor,
            records: Vec::new(),
            schema: SchemaInfo::default(),
            skipped: 0,
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-reads the file from disk, replacing the session's records.
    pub fn reload(&mut self) -> Result<(), DataError> {
        let path_text = self.path.display().to_string();

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|source| {
                if matches!(source.kind(), csv::ErrorKind::Io(_)) {
                    DataError::Read {
                        path: path_text.clone(),
                        source: io_of(source),
                    }
                } else {
                    DataError::Csv {
                        path: path_text.clone(),
                        source,
                    }
                }
            })?;

        let headers = reader.headers().map_err(|source| DataError::Csv {
            path: path_text.clone(),
            source,
        })?;
        let has = |name: &str| headers.iter().any(|h| h == name);
        let schema = SchemaInfo {
            has_country: has("country"),
            has_coordinates: has("latitude") && has("longitude"),
        };

        let mut records = Vec::new();
        let mut skipped = 0_usize;
        for row in reader.deserialize::<RawSighting>() {
            let Ok(raw) = row else {
                // A structurally broken row; keep going.
                skipped += 1;
                continue;
            };
            let Some(year) = parse_year(raw.year.as_deref()) else {
                skipped += 1;
                continue;
            };
            records.push(self.extractor.enrich(&raw, year, schema.has_country));
        }

        if records.is_empty() {
            return Err(DataError::Empty { path: path_text });
        }

        self.records = records;
        self.schema = schema;
        self.skipped = skipped;
        Ok(())
    }

    pub fn records(&self) -> &[Sighting] {
        &self.records
    }

    pub const fn schema(&self) -> SchemaInfo {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows dropped during the last load (broken CSV rows or no year).
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Observed year span; drives the year filter's bounds.
    pub fn year_bounds(&self) -> (i32, i32) {
        let mut years = self.records.iter().map(|s| s.year);
        let first = years.next().unwrap_or(0);
        years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)))
    }

    /// Distinct raw `colors` values, sorted. The filter options are the
    /// values as reported, not the split tokens.
    pub fn distinct_colors(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|s| s.colors.as_deref())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Distinct country values, sorted; the fixed default when the
    /// column is absent from the schema.
    pub fn distinct_countries(&self) -> Vec<String> {
        if !self.schema.has_country {
            return vec![DEFAULT_COUNTRY.to_string()];
        }
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|s| s.country.as_deref())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }
}

fn parse_year(raw: Option<&str>) -> Option<i32> {
    let text = clean_field(raw)?;
    if let Ok(year) = text.parse::<i32>() {
        return Some(year);
    }
    // Cleaned exports sometimes carry years as floats ("2020.0").
    #[allow(clippy::cast_possible_truncation)]
    text.parse::<f64>().ok().map(|y| y as i32)
}

fn io_of(error: csv::Error) -> std::io::Error {
    match error.into_kind() {
        csv::ErrorKind::Io(io) => io,
        other => std::io::Error::other(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sun::SunCalculator;
    use crate::domain::DayPeriod;
    use std::io::Write as _;

    fn extractor() -> DerivedExtractor {
        DerivedExtractor::new(SunCalculator::default()).unwrap()
    }

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ufo-dash-loader-{name}.csv"));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const BASIC: &str = "\
date,start_time,duration_seconds,location,colors,country,year
01-06-2020,22:15,90,\"Algade 5, 8000 Aarhus\",\"rød, blå\",Danmark,2020
15-03-2019,bad,300,Unknown area,,Danmark,2019
??-07-2018,05:30,,\"Vestergade 2, 5000 Odense\",grøn,,2018
02-02-2021,23:00,45,Somewhere,hvid,Danmark,not-a-year
";

    #[test]
    fn load_keeps_bad_fields_and_skips_missing_years() {
        let path = write_temp("basic", BASIC);
        let store = SightingStore::open(&path, extractor()).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.skipped(), 1);
        assert!(store.schema().has_country);
        assert!(!store.schema().has_coordinates);
        assert_eq!(store.year_bounds(), (2018, 2020));

        let first = &store.records()[0];
        assert_eq!(first.postal_code.as_deref(), Some("8000"));
        assert_eq!(first.hour.get(), Some(22));

        // Parse failures degrade, the record survives.
        let second = &store.records()[1];
        assert_eq!(second.hour.get(), None);
        assert_eq!(second.postal_code, None);
        assert_eq!(second.colors, None);

        // Blank country takes the default because the column exists.
        let third = &store.records()[2];
        assert_eq!(third.country.as_deref(), Some("Danmark"));
        assert_eq!(third.month, Some(7));
        assert_eq!(third.day_period, DayPeriod::Unknown);
    }

    #[test]
    fn schema_absence_disables_country() {
        let path = write_temp(
            "no-country",
            "date,start_time,duration_seconds,location,colors,year\n\
             01-06-2020,22:15,90,Aarhus,rød,2020\n",
        );
        let store = SightingStore::open(&path, extractor()).unwrap();
        assert!(!store.schema().has_country);
        assert_eq!(store.records()[0].country, None);
        assert_eq!(store.distinct_countries(), vec!["Danmark".to_string()]);
    }

    #[test]
    fn missing_file_is_fatal_and_names_the_path() {
        let err = SightingStore::open("/no/such/file.csv", extractor()).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.csv"));
    }

    #[test]
    fn empty_dataset_is_fatal() {
        let path = write_temp("empty", "date,year\n");
        let err = SightingStore::open(&path, extractor()).unwrap_err();
        assert!(matches!(err, DataError::Empty { .. }));
    }

    #[test]
    fn distinct_colors_are_raw_values() {
        let path = write_temp("colors", BASIC);
        let store = SightingStore::open(&path, extractor()).unwrap();
        assert_eq!(
            store.distinct_colors(),
            vec!["grøn".to_string(), "rød, blå".to_string()]
        );
    }
}
