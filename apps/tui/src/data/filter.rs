//! The filter pipeline: a pure conjunction of year range, color
//! membership and country membership, plus the table view's free-text
//! search. Output order always follows input order.

use std::collections::BTreeSet;

use crate::data::loader::SchemaInfo;
use crate::data::models::Sighting;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SightingFilter {
    /// Inclusive year interval.
    pub year_range: (i32, i32),
    /// Selected raw color values; empty means no color filter. A record
    /// matches when its colors text contains any selected value,
    /// case-sensitively. Records without colors never match a non-empty
    /// selection.
    pub colors: BTreeSet<String>,
    /// Selected countries; empty means no country filter, and the whole
    /// predicate is a no-op when the dataset has no country column.
    pub countries: BTreeSet<String>,
}

impl SightingFilter {
    /// The widest filter for the observed year span.
    pub const fn all(year_bounds: (i32, i32)) -> Self {
        Self {
            year_range: year_bounds,
            colors: BTreeSet::new(),
            countries: BTreeSet::new(),
        }
    }

    pub fn matches(&self, sighting: &Sighting, schema: SchemaInfo) -> bool {
        let (lo, hi) = self.year_range;
        if sighting.year < lo || sighting.year > hi {
            return false;
        }

        if !self.colors.is_empty() {
            let Some(colors) = sighting.colors.as_deref() else {
                return false;
            };
            if !self.colors.iter().any(|sel| colors.contains(sel.as_str())) {
                return false;
            }
        }

        if !self.countries.is_empty() && schema.has_country {
            let Some(country) = sighting.country.as_deref() else {
                return false;
            };
            if !self.countries.contains(country) {
                return false;
            }
        }

        true
    }

    /// Produces the working subset as a fresh, order-preserving copy.
    /// An empty result is a normal outcome, not an error.
    pub fn apply(&self, records: &[Sighting], schema: SchemaInfo) -> Vec<Sighting> {
        records
            .iter()
            .filter(|s| self.matches(s, schema))
            .cloned()
            .collect()
    }
}

/// Case-insensitive substring match across the string representation
/// of every column, raw and derived. Any single matching column keeps
/// the row.
pub fn matches_search(sighting: &Sighting, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    searchable_text(sighting)
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn search(records: &[Sighting], term: &str) -> Vec<Sighting> {
    records
        .iter()
        .filter(|s| matches_search(s, term))
        .cloned()
        .collect()
}

fn searchable_text(s: &Sighting) -> Vec<String> {
    let mut fields = vec![s.year.to_string(), s.day_period.label().to_string()];
    for text in [
        s.date_raw.as_deref(),
        s.start_time.as_deref(),
        s.duration_raw.as_deref(),
        s.location.as_deref(),
        s.colors.as_deref(),
        s.country.as_deref(),
        s.city.as_deref(),
        s.postal_code.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        fields.push(text.to_string());
    }
    if let Some(hour) = s.hour.get() {
        fields.push(hour.to_string());
    }
    if let Some(month) = s.month {
        fields.push(month.to_string());
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::extract::DerivedExtractor;
    use crate::data::models::RawSighting;
    use crate::data::sun::SunCalculator;

    fn sighting(year: i32, colors: Option<&str>, country: Option<&str>) -> Sighting {
        let raw = RawSighting {
            colors: colors.map(str::to_string),
            country: country.map(str::to_string),
            location: Some("Algade 5, 8000 Aarhus".to_string()),
            ..RawSighting::default()
        };
        DerivedExtractor::new(SunCalculator::default())
            .unwrap()
            .enrich(&raw, year, country.is_some())
    }

    fn schema(has_country: bool) -> SchemaInfo {
        SchemaInfo {
            has_country,
            has_coordinates: false,
        }
    }

    fn dataset() -> Vec<Sighting> {
        vec![
            sighting(2018, Some("rød, blå"), Some("Danmark")),
            sighting(2019, Some("grøn"), Some("Danmark")),
            sighting(2020, None, Some("Sverige")),
            sighting(2021, Some("rød"), Some("Danmark")),
        ]
    }

    #[test]
    fn year_interval_is_inclusive() {
        let mut filter = SightingFilter::all((2018, 2021));
        filter.year_range = (2019, 2020);
        let subset = filter.apply(&dataset(), schema(true));
        assert_eq!(subset.len(), 2);
        assert_eq!(subset[0].year, 2019);
        assert_eq!(subset[1].year, 2020);
    }

    #[test]
    fn color_selection_is_substring_and_case_sensitive() {
        let mut filter = SightingFilter::all((2018, 2021));
        filter.colors.insert("rød".to_string());
        let subset = filter.apply(&dataset(), schema(true));
        // "rød, blå" contains "rød"; the colorless record never matches.
        assert_eq!(subset.iter().map(|s| s.year).collect::<Vec<_>>(), [2018, 2021]);

        filter.colors.clear();
        filter.colors.insert("RØD".to_string());
        assert!(filter.apply(&dataset(), schema(true)).is_empty());
    }

    #[test]
    fn country_filter_degrades_without_the_column() {
        let mut filter = SightingFilter::all((2018, 2021));
        filter.countries.insert("Danmark".to_string());

        let with_column = filter.apply(&dataset(), schema(true));
        assert_eq!(with_column.len(), 3);

        // Same selection is a no-op when the schema lacks the column.
        let no_column = filter.apply(&dataset(), schema(false));
        assert_eq!(no_column.len(), 4);
    }

    #[test]
    fn narrowing_never_grows_the_subset() {
        let records = dataset();
        let wide = SightingFilter::all((2018, 2021)).apply(&records, schema(true));

        let mut narrower = SightingFilter::all((2019, 2021));
        let step1 = narrower.apply(&records, schema(true));
        narrower.colors.insert("grøn".to_string());
        let step2 = narrower.apply(&records, schema(true));
        narrower.countries.insert("Sverige".to_string());
        let step3 = narrower.apply(&records, schema(true));

        assert!(wide.len() >= step1.len());
        assert!(step1.len() >= step2.len());
        assert!(step2.len() >= step3.len());
        assert!(step3.is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = dataset();
        let mut filter = SightingFilter::all((2018, 2021));
        filter.colors.insert("rød".to_string());

        let once = filter.apply(&records, schema(true));
        let twice = filter.apply(&once, schema(true));
        assert_eq!(once.len(), twice.len());
        assert!(once
            .iter()
            .zip(twice.iter())
            .all(|(a, b)| a.year == b.year && a.colors == b.colors));
    }

    #[test]
    fn search_is_case_insensitive_and_spans_columns() {
        let records = dataset();
        assert_eq!(search(&records, "AARHUS").len(), 4);
        assert_eq!(search(&records, "sverige").len(), 1);
        assert_eq!(search(&records, "2019").len(), 1);
        assert_eq!(search(&records, "8000").len(), 4);
        assert!(search(&records, "mars").is_empty());
        // Empty term keeps everything.
        assert_eq!(search(&records, "").len(), 4);
    }
}
