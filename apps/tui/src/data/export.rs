//! CSV export of the currently filtered subset: the input schema plus
//! the derived columns, under a fixed filename. Raw field text is
//! written back untouched so a re-load reproduces the same derivations.

use std::path::{Path, PathBuf};

use crate::data::loader::{DataError, SchemaInfo};
use crate::data::models::Sighting;

/// Fixed export filename, matching what the download has always been
/// called.
pub const EXPORT_FILE_NAME: &str = "ufo_observationer_filtreret.csv";

const DERIVED_HEADERS: [&str; 5] = ["postnr", "hour", "minute", "month", "day_period"];

/// The input columns for the loaded schema, base first, the optional
/// country and coordinate columns only when the source file had them.
/// Reloading an export must report the same `SchemaInfo` as the source.
fn input_headers(schema: SchemaInfo) -> Vec<&'static str> {
    let mut headers = vec![
        "date",
        "start_time",
        "duration_seconds",
        "location",
        "colors",
    ];
    if schema.has_country {
        headers.push("country");
    }
    headers.push("year");
    if schema.has_coordinates {
        headers.extend(["latitude", "longitude", "by"]);
    }
    headers
}

/// Writes the subset into `dir` and returns the full path.
pub fn export_filtered(
    records: &[Sighting],
    schema: SchemaInfo,
    dir: &Path,
) -> Result<PathBuf, DataError> {
    let path = dir.join(EXPORT_FILE_NAME);
    let path_text = path.display().to_string();
    let wrap = |source: csv::Error| DataError::Write {
        path: path_text.clone(),
        source,
    };

    let mut headers = input_headers(schema);
    headers.extend(DERIVED_HEADERS);

    let mut writer = csv::Writer::from_path(&path).map_err(wrap)?;
    writer.write_record(&headers).map_err(wrap)?;

    for s in records {
        let mut row = vec![
            text(s.date_raw.as_deref()),
            text(s.start_time.as_deref()),
            text(s.duration_raw.as_deref()),
            text(s.location.as_deref()),
            text(s.colors.as_deref()),
        ];
        if schema.has_country {
            row.push(text(s.country.as_deref()));
        }
        row.push(s.year.to_string());
        if schema.has_coordinates {
            row.push(number(s.latitude));
            row.push(number(s.longitude));
            row.push(text(s.city.as_deref()));
        }
        row.extend([
            text(s.postal_code.as_deref()),
            s.hour.get().map(|h| h.to_string()).unwrap_or_default(),
            s.minute.map(|m| m.to_string()).unwrap_or_default(),
            s.month.map(|m| m.to_string()).unwrap_or_default(),
            s.day_period.as_str().to_string(),
        ]);
        writer.write_record(&row).map_err(wrap)?;
    }
    writer.flush().map_err(|source| DataError::Write {
        path: path_text.clone(),
        source: csv::Error::from(source),
    })?;
    Ok(path)
}

fn text(field: Option<&str>) -> String {
    field.unwrap_or_default().to_string()
}

fn number(field: Option<f64>) -> String {
    field.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::extract::DerivedExtractor;
    use crate::data::loader::SightingStore;
    use crate::data::sun::SunCalculator;
    use std::io::Write as _;

    fn extractor() -> DerivedExtractor {
        DerivedExtractor::new(SunCalculator::default()).unwrap()
    }

    #[test]
    fn export_round_trips_through_the_loader() {
        let source_path = std::env::temp_dir().join("ufo-dash-export-source.csv");
        let mut file = std::fs::File::create(&source_path).unwrap();
        file.write_all(
            b"date,start_time,duration_seconds,location,colors,country,year\n\
              01-06-2020,22:15,90,\"Algade 5, 8000 Aarhus\",\"r\xc3\xb8d, bl\xc3\xa5\",Danmark,2020\n\
              15-03-2019,bad,300,Unknown area,,Danmark,2019\n",
        )
        .unwrap();

        let store = SightingStore::open(&source_path, extractor()).unwrap();
        let dir = std::env::temp_dir().join("ufo-dash-export-out");
        std::fs::create_dir_all(&dir).unwrap();
        let exported = export_filtered(store.records(), store.schema(), &dir).unwrap();
        assert!(exported.ends_with(EXPORT_FILE_NAME));

        let reloaded = SightingStore::open(&exported, extractor()).unwrap();
        assert_eq!(reloaded.len(), store.len());
        for (a, b) in store.records().iter().zip(reloaded.records()) {
            assert_eq!(a.year, b.year);
            assert_eq!(a.postal_code, b.postal_code);
            assert_eq!(a.hour.get(), b.hour.get());
            assert_eq!(a.month, b.month);
            assert_eq!(a.day_period, b.day_period);
            assert_eq!(a.colors, b.colors);
        }
    }

    #[test]
    fn export_preserves_the_source_schema() {
        // No country, no coordinate columns in the source.
        let source_path = std::env::temp_dir().join("ufo-dash-export-schema.csv");
        let mut file = std::fs::File::create(&source_path).unwrap();
        file.write_all(
            b"date,start_time,duration_seconds,location,colors,year\n\
              01-06-2020,22:15,90,\"Algade 5, 8000 Aarhus\",hvid,2020\n",
        )
        .unwrap();

        let store = SightingStore::open(&source_path, extractor()).unwrap();
        assert!(!store.schema().has_country);
        assert!(!store.schema().has_coordinates);

        let dir = std::env::temp_dir().join("ufo-dash-export-schema-out");
        std::fs::create_dir_all(&dir).unwrap();
        let exported = export_filtered(store.records(), store.schema(), &dir).unwrap();

        let written = std::fs::read_to_string(&exported).unwrap();
        let header = written.lines().next().unwrap();
        assert_eq!(
            header,
            "date,start_time,duration_seconds,location,colors,year,\
             postnr,hour,minute,month,day_period"
        );

        // The reload must see the same schema, so the map view keeps
        // the postal-code fallback instead of flipping to empty
        // coordinate columns.
        let reloaded = SightingStore::open(&exported, extractor()).unwrap();
        assert!(!reloaded.schema().has_country);
        assert!(!reloaded.schema().has_coordinates);
    }

    #[test]
    fn coordinate_columns_survive_when_the_source_has_them() {
        let source_path = std::env::temp_dir().join("ufo-dash-export-coords.csv");
        let mut file = std::fs::File::create(&source_path).unwrap();
        file.write_all(
            b"date,start_time,duration_seconds,location,colors,country,year,latitude,longitude,postnr,by\n\
              01-06-2020,22:15,90,8000 Aarhus C,hvid,Danmark,2020,56.153,10.204,8000,Aarhus C\n",
        )
        .unwrap();

        let store = SightingStore::open(&source_path, extractor()).unwrap();
        let dir = std::env::temp_dir().join("ufo-dash-export-coords-out");
        std::fs::create_dir_all(&dir).unwrap();
        let exported = export_filtered(store.records(), store.schema(), &dir).unwrap();

        let reloaded = SightingStore::open(&exported, extractor()).unwrap();
        assert!(reloaded.schema().has_country);
        assert!(reloaded.schema().has_coordinates);
        assert_eq!(reloaded.records()[0].latitude, Some(56.153));
        assert_eq!(reloaded.records()[0].city.as_deref(), Some("Aarhus C"));
    }
}
