use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::DayPeriod;

/// Outcome of parsing one optional field, keeping "the source had no
/// value" distinct from "the source had a value we could not read".
/// Downstream aggregations treat both as excluded, but exports and the
/// table view can show the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parse<T> {
    Value(T),
    Missing,
    Invalid,
}

impl<T> Parse<T> {
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Missing | Self::Invalid => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Missing | Self::Invalid => None,
        }
    }

    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Maps a cleaned source field through `parse`: absent input stays
    /// `Missing`, a failed parse becomes `Invalid`.
    pub fn from_field(raw: Option<&str>, parse: impl FnOnce(&str) -> Option<T>) -> Self {
        match raw {
            None => Self::Missing,
            Some(text) => parse(text).map_or(Self::Invalid, Self::Value),
        }
    }
}

impl<T: Copy> Parse<T> {
    pub fn get(&self) -> Option<T> {
        self.value().copied()
    }
}

/// One CSV row exactly as read. Every column is optional text so that a
/// malformed field can never reject the record; typing happens in the
/// extractor. The coordinate-enriched dataset variant adds `latitude`,
/// `longitude`, `postnr` and `by` (city).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSighting {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub colors: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub postnr: Option<String>,
    #[serde(default)]
    pub by: Option<String>,
}

/// A sighting report with raw text preserved for export and the
/// derived fields computed once at load. Immutable for the session;
/// filtering and aggregation produce fresh derivations.
#[derive(Debug, Clone)]
pub struct Sighting {
    /// Authoritative grouping key; records without it are skipped at load.
    pub year: i32,
    pub date_raw: Option<String>,
    pub date: Parse<NaiveDate>,
    pub start_time: Option<String>,
    pub duration_raw: Option<String>,
    pub duration_seconds: Parse<f64>,
    pub location: Option<String>,
    pub colors: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    // Derived fields. Raw columns above are never mutated.
    pub postal_code: Option<String>,
    pub hour: Parse<u8>,
    pub minute: Option<u8>,
    pub month: Option<u32>,
    pub day_period: DayPeriod,
}

impl Sighting {
    pub fn duration_minutes(&self) -> Option<f64> {
        self.duration_seconds.get().map(|s| s / 60.0)
    }
}

/// Trims a raw field and collapses the empty string and pandas' "nan"
/// artifacts to an absent value. The old string sentinel for missing
/// postal codes is not carried forward.
pub fn clean_field(raw: Option<&str>) -> Option<String> {
    let text = raw?.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("nan") {
        return None;
    }
    Some(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_field_drops_empty_and_nan() {
        assert_eq!(clean_field(None), None);
        assert_eq!(clean_field(Some("")), None);
        assert_eq!(clean_field(Some("  ")), None);
        assert_eq!(clean_field(Some("nan")), None);
        assert_eq!(clean_field(Some("NaN")), None);
        assert_eq!(clean_field(Some(" 8000 ")), Some("8000".to_string()));
    }

    #[test]
    fn parse_field_distinguishes_missing_from_invalid() {
        let missing: Parse<u8> = Parse::from_field(None, |t| t.parse().ok());
        let invalid: Parse<u8> = Parse::from_field(Some("bad"), |t| t.parse().ok());
        let value: Parse<u8> = Parse::from_field(Some("5"), |t| t.parse().ok());
        assert_eq!(missing, Parse::Missing);
        assert_eq!(invalid, Parse::Invalid);
        assert_eq!(value, Parse::Value(5));
        assert_eq!(value.get(), Some(5));
        assert_eq!(invalid.get(), None);
    }
}
