//! Chart aggregations. Each one is a pure function from the filtered
//! subset to a small summary table, independent of the others. Empty
//! or all-absent input degenerates to an empty table; nothing here can
//! fail.

use std::collections::HashMap;

use crate::data::loader::SchemaInfo;
use crate::data::models::Sighting;
use crate::data::postcodes::{within_denmark, PostcodeTable};
use crate::domain::DurationBucket;

/// Static reference lines on the hour histogram. Illustrative yearly
/// averages, deliberately not computed from the data.
pub const AVG_SUNRISE_HOUR: u8 = 5;
pub const AVG_SUNSET_HOUR: u8 = 21;

/// One plotted location with its report count.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub count: u64,
    pub postal_code: Option<String>,
    pub city: Option<String>,
}

/// Map aggregation. With per-record coordinates in the schema, points
/// are grouped by exact (lat, lon, postal code, city) tuple and clipped
/// to the Denmark bounding box. Otherwise reports are counted per
/// postal code and joined against the reference table; codes absent
/// from the table are simply unmapped.
pub fn map_points(
    records: &[Sighting],
    schema: SchemaInfo,
    table: &PostcodeTable,
) -> Vec<MapPoint> {
    if schema.has_coordinates {
        return coordinate_points(records);
    }

    postcode_counts(records)
        .into_iter()
        .filter_map(|(code, count)| {
            let (latitude, longitude) = table.lookup(&code)?;
            Some(MapPoint {
                latitude,
                longitude,
                count,
                postal_code: Some(code),
                city: None,
            })
        })
        .collect()
}

fn coordinate_points(records: &[Sighting]) -> Vec<MapPoint> {
    let mut order: Vec<MapPoint> = Vec::new();
    let mut index: HashMap<(u64, u64, Option<String>, Option<String>), usize> = HashMap::new();

    for s in records {
        let (Some(lat), Some(lon)) = (s.latitude, s.longitude) else {
            continue;
        };
        if !within_denmark(lat, lon) {
            continue;
        }
        let key = (
            lat.to_bits(),
            lon.to_bits(),
            s.postal_code.clone(),
            s.city.clone(),
        );
        match index.get(&key) {
            Some(&at) => order[at].count += 1,
            None => {
                index.insert(key, order.len());
                order.push(MapPoint {
                    latitude: lat,
                    longitude: lon,
                    count: 1,
                    postal_code: s.postal_code.clone(),
                    city: s.city.clone(),
                });
            }
        }
    }
    order
}

/// Reports per postal code, count-descending with encounter-order
/// ties. Records without a postal code are excluded, never errors.
pub fn postcode_counts(records: &[Sighting]) -> Vec<(String, u64)> {
    let mut order: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for code in records.iter().filter_map(|s| s.postal_code.as_deref()) {
        match index.get(code) {
            Some(&at) => order[at].1 += 1,
            None => {
                index.insert(code, order.len());
                order.push((code.to_string(), 1));
            }
        }
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}

/// Reports per hour of day, ascending, absent hours excluded. Only
/// observed hours appear; the chart zero-fills the rest.
pub fn hour_histogram(records: &[Sighting]) -> Vec<(u8, u64)> {
    let mut counts = [0_u64; 24];
    for hour in records.iter().filter_map(|s| s.hour.get()) {
        counts[usize::from(hour)] += 1;
    }
    counts
        .iter()
        .enumerate()
        .filter(|(_, c)| **c > 0)
        .map(|(h, c)| (h as u8, *c))
        .collect()
}

/// Reports per duration bucket in fixed label order. Non-positive
/// durations and two-hour outliers are dropped before bucketing; when
/// nothing buckets, the table is empty rather than six zero rows.
pub fn duration_histogram(records: &[Sighting]) -> Vec<(DurationBucket, u64)> {
    let mut counts = [0_u64; 6];
    let mut total = 0_u64;
    for minutes in records.iter().filter_map(Sighting::duration_minutes) {
        if let Some(bucket) = DurationBucket::from_minutes(minutes) {
            let at = DurationBucket::ALL
                .iter()
                .position(|b| *b == bucket)
                .unwrap_or(0);
            counts[at] += 1;
            total += 1;
        }
    }
    if total == 0 {
        return Vec::new();
    }
    DurationBucket::ALL
        .iter()
        .zip(counts)
        .map(|(bucket, count)| (*bucket, count))
        .collect()
}

/// Dense year×month grid: one row per year in the observed span with
/// all 12 months zero-filled, January first. Records without a month
/// still anchor their year row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthDensity {
    pub years: Vec<i32>,
    pub cells: Vec<[u64; 12]>,
}

impl MonthDensity {
    pub fn max_count(&self) -> u64 {
        self.cells
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

pub fn month_density(records: &[Sighting]) -> MonthDensity {
    let Some(first) = records.first() else {
        return MonthDensity::default();
    };
    let (lo, hi) = records
        .iter()
        .map(|s| s.year)
        .fold((first.year, first.year), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });

    let years: Vec<i32> = (lo..=hi).collect();
    let mut cells = vec![[0_u64; 12]; years.len()];
    for s in records {
        let Some(month) = s.month else { continue };
        let row = (s.year - lo) as usize;
        cells[row][(month - 1) as usize] += 1;
    }
    MonthDensity { years, cells }
}

/// Flattened color tally: each report's colors text split on commas,
/// tokens trimmed, empties dropped, duplicates counted per occurrence.
/// Top `limit` by count, ties staying in first-encounter order.
pub fn color_tally(records: &[Sighting], limit: usize) -> Vec<(String, u64)> {
    let mut order: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for colors in records.iter().filter_map(|s| s.colors.as_deref()) {
        for token in colors.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match index.get(token) {
                Some(&at) => order[at].1 += 1,
                None => {
                    index.insert(token.to_string(), order.len());
                    order.push((token.to_string(), 1));
                }
            }
        }
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(limit);
    order
}

/// Reports per observed year, ascending.
pub fn yearly_counts(records: &[Sighting]) -> Vec<(i32, u64)> {
    let mut counts: HashMap<i32, u64> = HashMap::new();
    for s in records {
        *counts.entry(s.year).or_default() += 1;
    }
    let mut rows: Vec<(i32, u64)> = counts.into_iter().collect();
    rows.sort_unstable_by_key(|(year, _)| *year);
    rows
}
