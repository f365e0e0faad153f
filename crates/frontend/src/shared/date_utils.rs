/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{DateTime, NaiveDate, Utc};

/// Format date to DD.MM.YYYY
/// Example: 2021-01-20 -> "20.01.2021"
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Format optional date, "-" when absent
pub fn format_date_opt(date: &Option<NaiveDate>) -> String {
    date.as_ref().map(format_date).unwrap_or_else(|| "-".to_string())
}

/// Format UTC timestamp to DD.MM.YYYY HH:MM
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y %H:%M").to_string()
}

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_iso_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}.{}.{}", day, month, year);
        }
    }
    date_str.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 20).unwrap();
        assert_eq!(format_date(&date), "20.01.2021");
        assert_eq!(format_date_opt(&Some(date)), "20.01.2021");
        assert_eq!(format_date_opt(&None), "-");
    }

    #[test]
    fn test_format_datetime() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_datetime(&ts), "15.03.2024 14:02");
    }

    #[test]
    fn test_format_iso_date() {
        assert_eq!(format_iso_date("2025-01-01"), "01.01.2025");
        assert_eq!(format_iso_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
        assert_eq!(format_iso_date("invalid"), "invalid");
    }
}
