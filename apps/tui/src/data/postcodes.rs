//! Postal-code → coordinate reference used by the map view when the
//! dataset carries no per-record coordinates. Shipped as a versioned
//! builtin covering the larger Danish towns, overridable with a CSV
//! (`postnr,latitude,longitude`) via `POSTCODE_COORDS`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::data::loader::DataError;

/// Bounding box approximating Danish territory; map points outside it
/// are discarded as bad coordinates.
pub const DENMARK_LAT_RANGE: (f64, f64) = (54.5, 58.0);
pub const DENMARK_LON_RANGE: (f64, f64) = (8.0, 13.0);

pub fn within_denmark(latitude: f64, longitude: f64) -> bool {
    (DENMARK_LAT_RANGE.0..=DENMARK_LAT_RANGE.1).contains(&latitude)
        && (DENMARK_LON_RANGE.0..=DENMARK_LON_RANGE.1).contains(&longitude)
}

#[derive(Debug, Deserialize)]
struct CoordRow {
    postnr: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PostcodeTable {
    entries: BTreeMap<String, (f64, f64)>,
}

impl PostcodeTable {
    /// Hand-maintained coordinates for the postal codes that dominate
    /// the report stream. Codes missing here simply stay off the map.
    pub fn builtin() -> Self {
        const COORDS: [(&str, f64, f64); 40] = [
            ("1050", 55.679, 12.585), // København K
            ("1550", 55.674, 12.564), // København V
            ("2100", 55.709, 12.580), // København Ø
            ("2200", 55.694, 12.549), // København N
            ("2300", 55.661, 12.598), // København S
            ("2500", 55.662, 12.503), // Valby
            ("2600", 55.663, 12.401), // Glostrup
            ("2650", 55.657, 12.473), // Hvidovre
            ("2700", 55.704, 12.498), // Brønshøj
            ("2750", 55.731, 12.363), // Ballerup
            ("2770", 55.631, 12.656), // Kastrup
            ("2800", 55.770, 12.503), // Kongens Lyngby
            ("2900", 55.731, 12.572), // Hellerup
            ("3000", 56.036, 12.612), // Helsingør
            ("3400", 55.927, 12.301), // Hillerød
            ("3700", 55.100, 14.700), // Rønne (outside the box, kept for the table view)
            ("4000", 55.642, 12.081), // Roskilde
            ("4100", 55.443, 11.790), // Ringsted
            ("4200", 55.403, 11.355), // Slagelse
            ("4300", 55.718, 11.712), // Holbæk
            ("4400", 55.679, 11.089), // Kalundborg
            ("4700", 55.230, 11.761), // Næstved
            ("4800", 54.769, 11.871), // Nykøbing Falster
            ("5000", 55.396, 10.388), // Odense C
            ("5700", 55.060, 10.607), // Svendborg
            ("6000", 55.490, 9.472),  // Kolding
            ("6400", 54.909, 9.792),  // Sønderborg
            ("6700", 55.467, 8.452),  // Esbjerg
            ("7000", 55.566, 9.753),  // Fredericia
            ("7100", 55.709, 9.536),  // Vejle
            ("7400", 56.139, 8.974),  // Herning
            ("7500", 56.360, 8.616),  // Holstebro
            ("7700", 56.955, 8.694),  // Thisted
            ("8000", 56.153, 10.204), // Aarhus C
            ("8600", 56.170, 9.545),  // Silkeborg
            ("8700", 55.861, 9.850),  // Horsens
            ("8800", 56.451, 9.402),  // Viborg
            ("8900", 56.461, 10.036), // Randers
            ("9000", 57.048, 9.919),  // Aalborg
            ("9900", 57.441, 10.534), // Frederikshavn
        ];

        let entries = COORDS
            .iter()
            .map(|(code, lat, lon)| ((*code).to_string(), (*lat, *lon)))
            .collect();
        Self { entries }
    }

    /// Loads an override table. Rows that fail to parse are skipped,
    /// matching the loader's best-effort posture; an unreadable file is
    /// an error because the operator asked for it explicitly.
    pub fn from_csv(path: &Path) -> Result<Self, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)
            .map_err(|source| DataError::Csv {
                path: path.display().to_string(),
                source,
            })?;

        let mut entries = BTreeMap::new();
        for row in reader.deserialize::<CoordRow>().flatten() {
            entries.insert(row.postnr, (row.latitude, row.longitude));
        }
        Ok(Self { entries })
    }

    pub fn lookup(&self, code: &str) -> Option<(f64, f64)> {
        self.entries.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_knows_aarhus() {
        let table = PostcodeTable::builtin();
        let (lat, lon) = table.lookup("8000").unwrap();
        assert!(within_denmark(lat, lon));
        assert_eq!(table.lookup("0000"), None);
    }

    #[test]
    fn bounding_box_clips() {
        assert!(within_denmark(55.676, 12.568));
        assert!(!within_denmark(59.3, 18.1)); // Stockholm
        assert!(!within_denmark(55.1, 14.7)); // Bornholm is east of the box
    }
}
