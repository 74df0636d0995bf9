//! Derives the auxiliary fields every chart depends on: postal code,
//! hour of day, calendar month and day period. Each derivation is
//! independent and fails soft; a record is never dropped here.

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::data::loader::DataError;
use crate::data::models::{clean_field, Parse, RawSighting, Sighting};
use crate::data::sun::SunCalculator;
use crate::domain::{DayPeriod, DEFAULT_COUNTRY};

/// Dataset dates are written day-first.
const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug)]
pub struct DerivedExtractor {
    postal_re: Regex,
    month_re: Regex,
    sun: SunCalculator,
}

impl DerivedExtractor {
    pub fn new(sun: SunCalculator) -> Result<Self, DataError> {
        Ok(Self {
            // First run of four consecutive digits anywhere in the
            // location text. No validation against real postal ranges.
            postal_re: Regex::new(r"\d{4}")?,
            // Fallback month extraction from an unparsable date string.
            month_re: Regex::new(r"-(\d{2})-")?,
            sun,
        })
    }

    /// Builds the typed, enriched record. `has_country` reflects the
    /// file schema: when the column exists, blank values take the
    /// dataset's default country; when it does not, country stays
    /// absent and the country filter degrades to a no-op.
    pub fn enrich(&self, raw: &RawSighting, year: i32, has_country: bool) -> Sighting {
        let date_raw = clean_field(raw.date.as_deref());
        let start_time = clean_field(raw.start_time.as_deref());
        let duration_raw = clean_field(raw.duration_seconds.as_deref());
        let location = clean_field(raw.location.as_deref());

        let date = Parse::from_field(date_raw.as_deref(), |text| {
            NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
        });
        let (hour, minute) = self.clock_fields(start_time.as_deref());
        let duration_seconds =
            Parse::from_field(duration_raw.as_deref(), |text| text.parse::<f64>().ok());

        let month = self.month_of(date, date_raw.as_deref());
        let day_period = self.day_period_of(date, hour, minute);

        // Location text is authoritative; the enriched dataset's own
        // postnr column only fills in when the text has no digit run.
        let postal_code = location
            .as_deref()
            .and_then(|text| self.postal_code(text))
            .or_else(|| {
                clean_field(raw.postnr.as_deref()).and_then(|text| self.postal_code(&text))
            });

        let country = if has_country {
            clean_field(raw.country.as_deref()).or_else(|| Some(DEFAULT_COUNTRY.to_string()))
        } else {
            None
        };

        Sighting {
            year,
            postal_code,
            date_raw,
            date,
            start_time,
            duration_raw,
            duration_seconds,
            location,
            colors: clean_field(raw.colors.as_deref()),
            country,
            latitude: clean_field(raw.latitude.as_deref()).and_then(|t| t.parse().ok()),
            longitude: clean_field(raw.longitude.as_deref()).and_then(|t| t.parse().ok()),
            city: clean_field(raw.by.as_deref()),
            hour,
            minute,
            month,
            day_period,
        }
    }

    /// First 4-digit run in the location text, if any.
    pub fn postal_code(&self, location: &str) -> Option<String> {
        self.postal_re
            .find(location)
            .map(|m| m.as_str().to_string())
    }

    /// Hour is the text before the first `:`; minute is best-effort
    /// and only feeds the day-period classification.
    fn clock_fields(&self, start_time: Option<&str>) -> (Parse<u8>, Option<u8>) {
        let hour = Parse::from_field(start_time, |text| {
            let (hh, _) = text.split_once(':')?;
            hh.trim().parse::<u8>().ok().filter(|h| *h <= 23)
        });
        let minute = start_time.and_then(|text| {
            let (_, mm) = text.split_once(':')?;
            mm.trim().parse::<u8>().ok().filter(|m| *m <= 59)
        });
        (hour, minute)
    }

    /// Calendar month of the parsed date, else a 2-digit run between
    /// hyphens in the raw text, else absent.
    fn month_of(&self, date: Parse<NaiveDate>, date_raw: Option<&str>) -> Option<u32> {
        if let Some(d) = date.get() {
            return Some(d.month());
        }
        let captures = self.month_re.captures(date_raw?)?;
        let month: u32 = captures.get(1)?.as_str().parse().ok()?;
        (1..=12).contains(&month).then_some(month)
    }

    fn day_period_of(&self, date: Parse<NaiveDate>, hour: Parse<u8>, minute: Option<u8>) -> DayPeriod {
        match (date.get(), hour.get()) {
            (Some(d), Some(h)) => self.sun.classify(d, h, minute.unwrap_or(0)),
            _ => DayPeriod::Unknown,
        }
    }
}
