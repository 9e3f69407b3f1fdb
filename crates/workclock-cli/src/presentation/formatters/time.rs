use chrono::{Duration, NaiveDateTime};
use workclock_core::format;

/// "Wednesday May 15"
pub fn format_date(instant: NaiveDateTime) -> String {
    instant.format("%A %b %-d").to_string()
}

/// Wall-clock time as "HH:MM:SS".
pub fn format_clock(instant: NaiveDateTime) -> String {
    instant.format("%H:%M:%S").to_string()
}

/// A span in the user's chosen style.
pub fn format_span(span: Duration, human_readable: bool) -> String {
    format::duration(span, human_readable)
}

/// A time of day as "H:mm:ss" regardless of the chosen style.
pub fn format_time_of_day(offset: Duration) -> String {
    format::digit_duration(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(instant()), "Wednesday May 15");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(instant()), "09:05:07");
    }

    #[test]
    fn test_format_time_of_day_ignores_style() {
        let arrival = Duration::hours(8) + Duration::minutes(30);
        assert_eq!(format_time_of_day(arrival), "8:30:00");
        assert_eq!(format_span(arrival, true), " 8 hours, 30 min");
    }
}
