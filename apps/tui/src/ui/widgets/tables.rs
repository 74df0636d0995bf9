use crate::data::Sighting;

/// First row index shown so that the selected row stays visible.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

fn text_or_dash(field: Option<&String>) -> &str {
    field.map_or("-", String::as_str)
}

/// One display row for the data table, raw text preserved and derived
/// columns appended.
pub fn table_cells(record: &Sighting) -> [String; 8] {
    let hour = record
        .hour
        .value()
        .map_or_else(|| "-".to_string(), |h| format!("{h:02}"));
    let month = record
        .month
        .map_or_else(|| "-".to_string(), |m| format!("{m:02}"));
    [
        record.year.to_string(),
        text_or_dash(record.date_raw.as_ref()).to_string(),
        hour,
        month,
        text_or_dash(record.location.as_ref()).to_string(),
        text_or_dash(record.postal_code.as_ref()).to_string(),
        text_or_dash(record.colors.as_ref()).to_string(),
        record.day_period.label().to_string(),
    ]
}

pub const TABLE_HEADERS: [&str; 8] = [
    "Year", "Date", "Hour", "Month", "Location", "Postnr", "Colors", "Period",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_scroll_when_everything_fits() {
        assert_eq!(scroll_offset(5, 10, 4), 0);
    }

    #[test]
    fn scrolls_to_keep_selection_visible() {
        assert_eq!(scroll_offset(100, 10, 0), 0);
        assert_eq!(scroll_offset(100, 10, 9), 0);
        assert_eq!(scroll_offset(100, 10, 10), 1);
        assert_eq!(scroll_offset(100, 10, 99), 90);
    }
}
