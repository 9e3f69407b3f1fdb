use chrono::Duration;

/// Fixed shape of a working week. Times of day are offsets from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub day_start: Duration,
    pub day_end: Duration,
    pub core_start: Duration,
    pub core_end: Duration,
    pub lunch_start: Duration,
    pub lunch_end: Duration,
    /// Lead time before lunch or a meeting where it counts as "soon"
    pub soon: Duration,
    pub end_warning_yellow: Duration,
    pub end_warning_red: Duration,
    pub end_warning_blink: Duration,
    /// Shift applied to today's end when `--adjust` is given
    pub end_adjustment: Duration,
    /// Lunch break subtracted from registerable hours
    pub lunch_deduction: Duration,
    pub week_length: u32,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            day_start: time_of_day(8, 0),
            day_end: time_of_day(16, 0),
            core_start: time_of_day(9, 0),
            core_end: time_of_day(14, 0),
            lunch_start: time_of_day(11, 30),
            lunch_end: time_of_day(12, 0),
            soon: Duration::minutes(10),
            end_warning_yellow: Duration::minutes(30),
            end_warning_red: Duration::minutes(15),
            end_warning_blink: Duration::minutes(5),
            end_adjustment: -Duration::minutes(30),
            lunch_deduction: Duration::minutes(30),
            week_length: 5,
        }
    }
}

impl Schedule {
    /// Length of a nominal workday.
    pub fn day_length(&self) -> Duration {
        self.day_end - self.day_start
    }

    pub fn week_total(&self) -> Duration {
        self.day_length() * self.week_length as i32
    }
}

/// Offset from midnight for the given wall-clock time.
pub fn time_of_day(hours: i64, minutes: i64) -> Duration {
    Duration::hours(hours) + Duration::minutes(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_shape() {
        let schedule = Schedule::default();
        assert_eq!(schedule.day_length(), Duration::hours(8));
        assert_eq!(schedule.week_total(), Duration::hours(40));
        assert!(schedule.lunch_start < schedule.lunch_end);
        assert!(schedule.core_start >= schedule.day_start);
        assert!(schedule.core_end <= schedule.day_end);
    }

    #[test]
    fn test_end_warnings_escalate() {
        let schedule = Schedule::default();
        assert!(schedule.end_warning_yellow > schedule.end_warning_red);
        assert!(schedule.end_warning_red > schedule.end_warning_blink);
    }
}
