use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// A bounded span of wall-clock time: a workday, a meeting, one calendar hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug_assert!(end >= start, "interval ends before it starts");
        Self { start, end }
    }

    pub fn starting_at(start: NaiveDateTime, length: Duration) -> Self {
        Self::new(start, start + length)
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// Negative before the interval starts.
    pub fn since_start(&self, now: NaiveDateTime) -> Duration {
        now - self.start
    }

    /// Negative once the interval is over.
    pub fn until_end(&self, now: NaiveDateTime) -> Duration {
        self.end - now
    }

    /// Elapsed share of the interval, unclamped: below 0 before it starts,
    /// above 1 once it is over. `None` for a zero-length interval.
    pub fn completion(&self, now: NaiveDateTime) -> Option<f64> {
        let total = self.length().num_milliseconds();
        if total == 0 {
            return None;
        }
        Some(self.since_start(now).num_milliseconds() as f64 / total as f64)
    }

    /// Half-open overlap with `[start, end)`; touching boundaries do not overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && self.end > start
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// The instant `time_of_day` after midnight on `date`.
pub fn at(date: NaiveDate, time_of_day: Duration) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + time_of_day
}

/// Offset of `instant` from its own midnight.
pub fn time_of_day(instant: NaiveDateTime) -> Duration {
    instant.time().signed_duration_since(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_completion_is_unclamped() {
        let day = Interval::new(dt(8, 0), dt(16, 0));
        assert_eq!(day.completion(dt(12, 0)), Some(0.5));
        assert_eq!(day.completion(dt(4, 0)), Some(-0.5));
        assert_eq!(day.completion(dt(20, 0)), Some(1.5));
    }

    #[test]
    fn test_zero_length_has_no_completion() {
        let empty = Interval::new(dt(9, 0), dt(9, 0));
        assert_eq!(empty.completion(dt(9, 0)), None);
    }

    #[test]
    fn test_since_start_and_until_end() {
        let meeting = Interval::starting_at(dt(13, 0), Duration::hours(1));
        assert_eq!(meeting.since_start(dt(13, 15)), Duration::minutes(15));
        assert_eq!(meeting.until_end(dt(13, 15)), Duration::minutes(45));
        assert_eq!(meeting.until_end(dt(14, 30)), -Duration::minutes(30));
    }

    #[test]
    fn test_half_open_overlap() {
        let meeting = Interval::new(dt(13, 0), dt(14, 0));
        assert!(meeting.overlaps(dt(13, 30), dt(14, 30)));
        assert!(meeting.overlaps(dt(12, 0), dt(15, 0)));
        assert!(!meeting.overlaps(dt(14, 0), dt(15, 0)));
        assert!(!meeting.overlaps(dt(12, 0), dt(13, 0)));
    }

    #[test]
    fn test_at_and_time_of_day() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let instant = at(date, Duration::hours(16) + Duration::minutes(30));
        assert_eq!(instant, dt(16, 30));
        assert_eq!(time_of_day(instant), Duration::minutes(16 * 60 + 30));
    }
}
