//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Detail-page form, e.g. `Tue 05, 21, 2019 9:30PM`
pub fn format_medium(value: &DateTime<Utc>) -> String {
    value.format("%a %m, %d, %Y %-I:%M%p").to_string()
}

/// Plain `YYYY-MM-DD HH:MM:SS` used by the show listing
pub fn format_plain(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap()
    }

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800);
    }

    #[test]
    fn test_format_medium() {
        assert_eq!(format_medium(&sample()), "Tue 05, 21, 2019 9:30PM");
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(format_plain(&sample()), "2019-05-21 21:30:00");
    }

    #[test]
    fn test_morning_hour_has_no_padding() {
        let morning = Utc.with_ymd_and_hms(2035, 4, 1, 8, 5, 0).unwrap();
        assert_eq!(format_medium(&morning), "Sun 04, 01, 2035 8:05AM");
    }
}
