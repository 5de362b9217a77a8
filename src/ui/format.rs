use chrono::{DateTime, Local, NaiveDateTime};

/// Layouts the backend and the datetime input are known to produce.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a backend timestamp into local wall-clock time. Offset-carrying
/// values are converted to the local zone; naive ones are taken as local.
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
}

/// Display form, `dd/mm/yyyy, HH:MM`. Unparseable input is shown as is.
pub fn format_date_time(raw: &str) -> String {
    match parse_date_time(raw) {
        Some(date_time) => date_time.format("%d/%m/%Y, %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// Value for a `datetime-local` input, `YYYY-MM-DDTHH:mm`, or empty when the
/// input cannot be parsed.
pub fn format_for_input(raw: &str) -> String {
    parse_date_time(raw)
        .map(|date_time| date_time.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_date_time_variants() {
        assert_eq!(format_date_time("2026-02-01T10:00:00"), "01/02/2026, 10:00");
        assert_eq!(format_date_time("2026-02-01T10:05"), "01/02/2026, 10:05");
        assert_eq!(format_date_time("2026-12-31T23:59:59.123456"), "31/12/2026, 23:59");
    }

    #[test]
    fn test_unparseable_dates_fall_back() {
        assert_eq!(format_date_time("next tuesday"), "next tuesday");
        assert_eq!(format_date_time(""), "");
        assert_eq!(format_for_input("next tuesday"), "");
        assert_eq!(format_for_input(""), "");
    }

    #[test]
    fn test_format_for_input() {
        assert_eq!(format_for_input("2026-02-01T10:00:00"), "2026-02-01T10:00");
        assert_eq!(format_for_input("2026-02-01T09:30:45.5"), "2026-02-01T09:30");
    }

    #[test]
    fn test_offset_timestamps_use_local_time() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 0).unwrap();
        let expected = instant.with_timezone(&Local).format("%Y-%m-%dT%H:%M").to_string();
        assert_eq!(format_for_input("2026-03-04T05:06:00Z"), expected);
    }
}
