use chrono::NaiveDate;

const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Reads the value of an `<input type="date">`. Empty or garbled input clears the date.
pub fn parse_date_input(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), INPUT_FORMAT).ok()
}

pub fn format_date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(INPUT_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn format_display_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%a %d %b %Y").to_string(),
        None => "-".to_string(),
    }
}
