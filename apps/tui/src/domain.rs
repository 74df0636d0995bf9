//! Core vocabulary for sighting reports: duration buckets, day periods
//! and the display ordering used by the charts.

use serde::Serialize;

/// Fixed duration buckets for the duration histogram.
///
/// Bucket edges are minutes: {0, 1, 5, 15, 30, 60, 120}. Reports of
/// zero or negative duration and reports of two hours or more are
/// treated as unreliable and excluded entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DurationBucket {
    Under1Min,
    OneToFive,
    FiveToFifteen,
    FifteenToThirty,
    ThirtyToSixty,
    OneToTwoHours,
}

impl DurationBucket {
    /// Chart ordering, shortest first. Never sorted alphabetically.
    pub const ALL: [Self; 6] = [
        Self::Under1Min,
        Self::OneToFive,
        Self::FiveToFifteen,
        Self::FifteenToThirty,
        Self::ThirtyToSixty,
        Self::OneToTwoHours,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Under1Min => "<1 min",
            Self::OneToFive => "1-5 min",
            Self::FiveToFifteen => "5-15 min",
            Self::FifteenToThirty => "15-30 min",
            Self::ThirtyToSixty => "30-60 min",
            Self::OneToTwoHours => "1-2 hours",
        }
    }

    /// Buckets a duration in minutes. Intervals are right-closed, so a
    /// report of exactly 1.0 minutes still lands in `<1 min`. Returns
    /// `None` for non-positive durations and for outliers of 120
    /// minutes or more.
    pub fn from_minutes(minutes: f64) -> Option<Self> {
        if !minutes.is_finite() || minutes <= 0.0 || minutes >= 120.0 {
            return None;
        }
        let bucket = if minutes <= 1.0 {
            Self::Under1Min
        } else if minutes <= 5.0 {
            Self::OneToFive
        } else if minutes <= 15.0 {
            Self::FiveToFifteen
        } else if minutes <= 30.0 {
            Self::FifteenToThirty
        } else if minutes <= 60.0 {
            Self::ThirtyToSixty
        } else {
            Self::OneToTwoHours
        };
        Some(bucket)
    }
}

/// Where a sighting falls relative to sunrise and sunset at the
/// reference location. `Unknown` covers any missing or unparsable
/// date/time input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayPeriod {
    Night,
    Dawn,
    Day,
    Dusk,
    Unknown,
}

impl DayPeriod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Night => "night",
            Self::Dawn => "dawn",
            Self::Day => "day",
            Self::Dusk => "dusk",
            Self::Unknown => "unknown",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Night => "Night",
            Self::Dawn => "Dawn",
            Self::Day => "Day",
            Self::Dusk => "Dusk",
            Self::Unknown => "Unknown",
        }
    }
}

/// Month labels in chart order, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Color names the dataset is known to use. Reports are free text, so
/// this is a display vocabulary, not a validation list; unknown names
/// fall back to an automatic palette in the UI.
pub const KNOWN_COLOR_NAMES: [&str; 13] = [
    "rød", "grøn", "blå", "gul", "hvid", "sort", "orange", "lilla", "brun", "grå", "turkis",
    "pink", "sølv",
];

/// Country value assumed when the dataset carries a country column but
/// a record leaves it blank.
pub const DEFAULT_COUNTRY: &str = "Danmark";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ninety_seconds_is_one_to_five() {
        // 90 s = 1.5 min
        assert_eq!(DurationBucket::from_minutes(1.5), Some(DurationBucket::OneToFive));
    }

    #[test]
    fn zero_and_outliers_are_excluded() {
        assert_eq!(DurationBucket::from_minutes(0.0), None);
        assert_eq!(DurationBucket::from_minutes(-3.0), None);
        // 7500 s = 125 min
        assert_eq!(DurationBucket::from_minutes(125.0), None);
        assert_eq!(DurationBucket::from_minutes(120.0), None);
        assert_eq!(DurationBucket::from_minutes(f64::NAN), None);
    }

    #[test]
    fn edges_are_right_closed() {
        assert_eq!(DurationBucket::from_minutes(1.0), Some(DurationBucket::Under1Min));
        assert_eq!(DurationBucket::from_minutes(5.0), Some(DurationBucket::OneToFive));
        assert_eq!(DurationBucket::from_minutes(60.0), Some(DurationBucket::ThirtyToSixty));
        assert_eq!(DurationBucket::from_minutes(119.9), Some(DurationBucket::OneToTwoHours));
    }

    #[test]
    fn bucket_order_is_shortest_first() {
        let labels: Vec<_> = DurationBucket::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(
            labels,
            ["<1 min", "1-5 min", "5-15 min", "15-30 min", "30-60 min", "1-2 hours"]
        );
    }
}
