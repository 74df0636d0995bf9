//! Approximate sunrise/sunset times for the day-period classification.
//!
//! This is the classic declination / hour-angle / equation-of-time
//! approximation, good to a few minutes at Danish latitudes, which is
//! plenty for labelling a report as night, dawn, day or dusk. All
//! times are local clock hours at a fixed UTC offset; daylight saving
//! is deliberately ignored.

use chrono::{Datelike, NaiveDate};
use std::f64::consts::PI;

use crate::domain::DayPeriod;

/// Reference location when none is configured: Copenhagen.
pub const DEFAULT_LATITUDE: f64 = 55.676;
pub const DEFAULT_LONGITUDE: f64 = 12.568;

/// Denmark observes CET; see module note on daylight saving.
const UTC_OFFSET_HOURS: f64 = 1.0;

/// Default half-width of the dawn/dusk windows around each transition.
pub const DEFAULT_TWILIGHT_MARGIN_HOURS: f64 = 1.0;

/// Local sunrise/sunset in fractional clock hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunTimes {
    pub sunrise: f64,
    pub sunset: f64,
}

/// Computes sun times for one fixed reference location.
#[derive(Debug, Clone, Copy)]
pub struct SunCalculator {
    latitude: f64,
    longitude: f64,
    twilight_margin: f64,
}

impl SunCalculator {
    pub const fn new(latitude: f64, longitude: f64, twilight_margin: f64) -> Self {
        Self {
            latitude,
            longitude,
            twilight_margin,
        }
    }

    /// Sunrise and sunset for the given date, or `None` when the sun
    /// never rises or never sets (not reachable at Danish latitudes,
    /// but the math allows it).
    pub fn times(&self, date: NaiveDate) -> Option<SunTimes> {
        let doy = f64::from(date.ordinal());

        // Solar declination, degrees.
        let declination = 23.45 * (2.0 * PI * (284.0 + doy) / 365.0).sin();

        let cos_hour_angle =
            -self.latitude.to_radians().tan() * declination.to_radians().tan();
        if !(-1.0..=1.0).contains(&cos_hour_angle) {
            return None;
        }
        let half_day_hours = cos_hour_angle.acos().to_degrees() / 15.0;

        // Equation of time, minutes.
        let b = 2.0 * PI * (doy - 81.0) / 364.0;
        let eot = 9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin();

        let solar_noon = 12.0 + UTC_OFFSET_HOURS - self.longitude / 15.0 - eot / 60.0;

        Some(SunTimes {
            sunrise: solar_noon - half_day_hours,
            sunset: solar_noon + half_day_hours,
        })
    }

    /// Classifies a local timestamp. Any failure inside the sun math
    /// degrades to `Unknown` rather than surfacing an error.
    pub fn classify(&self, date: NaiveDate, hour: u8, minute: u8) -> DayPeriod {
        let Some(times) = self.times(date) else {
            return DayPeriod::Unknown;
        };
        let t = f64::from(hour) + f64::from(minute) / 60.0;
        let margin = self.twilight_margin;

        if (times.sunrise - margin..=times.sunrise + margin).contains(&t) {
            DayPeriod::Dawn
        } else if (times.sunset - margin..=times.sunset + margin).contains(&t) {
            DayPeriod::Dusk
        } else if t > times.sunrise + margin && t < times.sunset - margin {
            DayPeriod::Day
        } else {
            DayPeriod::Night
        }
    }
}

impl Default for SunCalculator {
    fn default() -> Self {
        Self::new(
            DEFAULT_LATITUDE,
            DEFAULT_LONGITUDE,
            DEFAULT_TWILIGHT_MARGIN_HOURS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn midsummer_day_is_long() {
        let sun = SunCalculator::default();
        let times = sun.times(date(2020, 6, 21)).unwrap();
        // Copenhagen midsummer: sun up well over 17 hours.
        assert!(times.sunset - times.sunrise > 17.0);
        assert!(times.sunrise < 4.5);
        assert!(times.sunset > 20.5);
    }

    #[test]
    fn midwinter_day_is_short() {
        let sun = SunCalculator::default();
        let times = sun.times(date(2020, 12, 21)).unwrap();
        let length = times.sunset - times.sunrise;
        assert!(length > 6.0 && length < 8.0);
    }

    #[test]
    fn classification_covers_the_day() {
        let sun = SunCalculator::default();
        let midsummer = date(2020, 6, 21);
        assert_eq!(sun.classify(midsummer, 1, 0), DayPeriod::Night);
        assert_eq!(sun.classify(midsummer, 13, 0), DayPeriod::Day);

        let equinox = date(2020, 3, 20);
        let times = sun.times(equinox).unwrap();
        // A quarter hour after computed sunrise is inside the ±1 h margin.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let sunrise_hour = times.sunrise as u8;
        assert_eq!(sun.classify(equinox, sunrise_hour, 15), DayPeriod::Dawn);
    }

    #[test]
    fn polar_night_degrades_to_unknown() {
        let arctic = SunCalculator::new(80.0, 12.0, 1.0);
        assert_eq!(arctic.classify(date(2020, 12, 21), 12, 0), DayPeriod::Unknown);
    }
}
