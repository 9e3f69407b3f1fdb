use crate::interval::{self, Interval};
use crate::meeting::Meeting;
use crate::schedule::Schedule;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

/// Everything the dashboard knows about the user's day.
///
/// Built once from the command line before the first frame and only read
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub schedule: Schedule,
    /// Positive when arriving late, negative when arriving early
    pub arrival_offset: Duration,
    /// Apply [`Schedule::end_adjustment`] to today's end
    pub adjust_end: bool,
    /// "2 hours, 15 min" instead of "2:15:00"
    pub human_readable: bool,
    pub meetings: Vec<Meeting>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Schedule::default())
    }
}

impl Config {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            arrival_offset: Duration::zero(),
            adjust_end: false,
            human_readable: true,
            meetings: Vec::new(),
        }
    }

    /// Today's start after the arrival offset.
    pub fn today_start(&self) -> Duration {
        self.schedule.day_start + self.arrival_offset
    }

    /// Today's end after the arrival offset, before any adjustment.
    pub fn today_end_unadjusted(&self) -> Duration {
        self.schedule.day_end + self.arrival_offset
    }

    pub fn today_end(&self) -> Duration {
        if self.adjust_end {
            self.today_end_unadjusted() + self.schedule.end_adjustment
        } else {
            self.today_end_unadjusted()
        }
    }

    /// Today's effective workday.
    pub fn today_span(&self, now: NaiveDateTime) -> Interval {
        let today = now.date();
        Interval::new(
            interval::at(today, self.today_start()),
            interval::at(today, self.today_end()),
        )
    }

    /// The nominal workday on `date`.
    pub fn day_span(&self, date: NaiveDate) -> Interval {
        Interval::new(
            interval::at(date, self.schedule.day_start),
            interval::at(date, self.schedule.day_end),
        )
    }

    /// Monday's start through the last workday's end of the week containing `now`.
    pub fn week(&self, now: NaiveDateTime) -> Interval {
        let monday = week_start(now.date());
        let last_day = monday + Duration::days(i64::from(self.schedule.week_length) - 1);
        Interval::new(
            interval::at(monday, self.schedule.day_start),
            interval::at(last_day, self.schedule.day_end),
        )
    }

    /// Work time accumulated this week: a full nominal day for each earlier
    /// workday plus what has elapsed since today's effective start. Weekends
    /// count as the whole week.
    pub fn completed_this_week(&self, now: NaiveDateTime) -> Duration {
        let days_before = now.date().weekday().num_days_from_monday();
        if days_before >= self.schedule.week_length {
            return self.total_this_week();
        }

        let elapsed_today = self
            .today_span(now)
            .since_start(now)
            .max(Duration::zero());

        self.schedule.day_length() * days_before as i32 + elapsed_today
    }

    pub fn total_this_week(&self) -> Duration {
        self.schedule.week_total()
    }

    /// Whether any meeting overlaps the half-open span `[start, end)`.
    pub fn in_meeting(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.meetings
            .iter()
            .any(|meeting| meeting.interval().overlaps(start, end))
    }

    /// The running meeting, or failing that the next one to start.
    pub fn current_or_next_meeting(&self, now: NaiveDateTime) -> Option<&Meeting> {
        self.meetings
            .iter()
            .filter(|meeting| meeting.end() > now)
            .min_by_key(|meeting| meeting.start())
    }

    /// Hours worked today that can be booked: rounded to the nearest half
    /// hour, without the lunch break once lunch is over.
    pub fn registerable_hours_worked(&self, now: NaiveDateTime) -> f64 {
        let clock = interval::time_of_day(now);
        let mut worked = clock - self.today_start();

        if clock >= self.schedule.lunch_end {
            worked -= self.schedule.lunch_deduction;
        }

        round_to_half_hours(worked.max(Duration::zero()))
    }

    /// Bookable hours left until the unadjusted end of the day, without the
    /// lunch break while lunch is still ahead.
    pub fn registerable_hours_left(&self, now: NaiveDateTime) -> f64 {
        let clock = interval::time_of_day(now);
        let mut left = self.today_end_unadjusted() - clock;

        if clock < self.schedule.lunch_end {
            left -= self.schedule.lunch_deduction;
        }

        round_to_half_hours(left.max(Duration::zero()))
    }

    /// Overtime beyond the unadjusted end of the day, rounded to half hours.
    pub fn registerable_overtime(&self, now: NaiveDateTime) -> f64 {
        let clock = interval::time_of_day(now);
        round_to_half_hours((clock - self.today_end_unadjusted()).max(Duration::zero()))
    }
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// `weekday` in the Monday-anchored week containing `date`.
pub fn date_at_weekday(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    week_start(date) + Duration::days(i64::from(weekday.num_days_from_monday()))
}

fn round_to_half_hours(span: Duration) -> f64 {
    let hours = span.num_seconds() as f64 / 3600.0;
    (hours * 2.0).round() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // 2024-05-15 is a Wednesday
    fn wednesday(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn meeting(start: NaiveDateTime, end: NaiveDateTime) -> Meeting {
        Meeting::new(start, end).unwrap()
    }

    #[test]
    fn test_effective_day_bounds() {
        let mut config = Config::default();
        assert_eq!(config.today_start(), Duration::hours(8));
        assert_eq!(config.today_end(), Duration::hours(16));

        config.arrival_offset = Duration::minutes(30);
        assert_eq!(config.today_start(), Duration::minutes(8 * 60 + 30));
        assert_eq!(config.today_end(), Duration::minutes(16 * 60 + 30));

        config.adjust_end = true;
        assert_eq!(config.today_end(), Duration::hours(16));
        assert_eq!(config.today_end_unadjusted(), Duration::minutes(16 * 60 + 30));
    }

    #[test]
    fn test_week_interval_is_monday_to_friday() {
        let config = Config::default();
        let week = config.week(wednesday(10, 0));
        assert_eq!(week.start, date(13).and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(week.end, date(17).and_hms_opt(16, 0, 0).unwrap());
    }

    #[test]
    fn test_sunday_belongs_to_preceding_monday() {
        assert_eq!(week_start(date(19)), date(13));
        assert_eq!(week_start(date(13)), date(13));
        assert_eq!(date_at_weekday(date(19), Weekday::Fri), date(17));
    }

    #[test]
    fn test_completed_this_week_at_wednesday_start() {
        let config = Config::default();
        assert_eq!(
            config.completed_this_week(wednesday(8, 0)),
            Duration::hours(16)
        );
    }

    #[test]
    fn test_completed_this_week_counts_today_and_floors_at_zero() {
        let config = Config::default();
        assert_eq!(
            config.completed_this_week(wednesday(10, 30)),
            Duration::hours(18) + Duration::minutes(30)
        );
        assert_eq!(
            config.completed_this_week(wednesday(6, 0)),
            Duration::hours(16)
        );
    }

    #[test]
    fn test_completed_this_week_uses_effective_start() {
        let mut config = Config::default();
        config.arrival_offset = Duration::hours(1);
        assert_eq!(
            config.completed_this_week(wednesday(10, 0)),
            Duration::hours(17)
        );
    }

    #[test]
    fn test_weekend_counts_full_week() {
        let config = Config::default();
        let saturday = date(18).and_hms_opt(11, 0, 0).unwrap();
        let sunday = date(19).and_hms_opt(11, 0, 0).unwrap();
        assert_eq!(config.completed_this_week(saturday), Duration::hours(40));
        assert_eq!(config.completed_this_week(sunday), Duration::hours(40));
        assert_eq!(config.total_this_week(), Duration::hours(40));
    }

    #[test]
    fn test_in_meeting_is_half_open() {
        let mut config = Config::default();
        config.meetings.push(meeting(wednesday(13, 0), wednesday(14, 0)));

        assert!(config.in_meeting(wednesday(13, 30), wednesday(14, 30)));
        assert!(!config.in_meeting(wednesday(14, 0), wednesday(15, 0)));
        assert!(!config.in_meeting(wednesday(12, 0), wednesday(13, 0)));
    }

    #[test]
    fn test_overlapping_meetings_stay_separate() {
        let mut config = Config::default();
        config.meetings.push(meeting(wednesday(13, 0), wednesday(14, 0)));
        config.meetings.push(meeting(wednesday(13, 30), wednesday(15, 0)));

        assert_eq!(config.meetings.len(), 2);
        assert!(config.in_meeting(wednesday(14, 15), wednesday(14, 30)));
        assert!(!config.in_meeting(wednesday(15, 0), wednesday(15, 30)));

        let current = config.current_or_next_meeting(wednesday(13, 45)).unwrap();
        assert_eq!(current.start(), wednesday(13, 0));
        assert_eq!(current.end(), wednesday(14, 0));

        let later = config.current_or_next_meeting(wednesday(14, 0)).unwrap();
        assert_eq!(later.start(), wednesday(13, 30));
        assert_eq!(later.end(), wednesday(15, 0));
    }

    #[test]
    fn test_current_or_next_meeting() {
        let mut config = Config::default();
        config.meetings.push(meeting(wednesday(15, 0), wednesday(16, 0)));
        config.meetings.push(meeting(wednesday(9, 0), wednesday(10, 0)));
        config.meetings.push(meeting(wednesday(13, 0), wednesday(14, 0)));

        let next = config.current_or_next_meeting(wednesday(11, 0)).unwrap();
        assert_eq!(next.start(), wednesday(13, 0));

        let current = config.current_or_next_meeting(wednesday(13, 30)).unwrap();
        assert_eq!(current.start(), wednesday(13, 0));

        assert!(config.current_or_next_meeting(wednesday(17, 0)).is_none());
    }

    #[test]
    fn test_registerable_hours() {
        let config = Config::default();
        assert_eq!(config.registerable_hours_worked(wednesday(10, 20)), 2.5);
        assert_eq!(config.registerable_hours_worked(wednesday(13, 0)), 4.5);
        assert_eq!(config.registerable_hours_left(wednesday(10, 0)), 5.5);
        assert_eq!(config.registerable_hours_left(wednesday(13, 0)), 3.0);
        assert_eq!(config.registerable_overtime(wednesday(17, 10)), 1.0);
        assert_eq!(config.registerable_overtime(wednesday(15, 0)), 0.0);
    }

    #[test]
    fn test_registerable_hours_never_negative() {
        let mut early = Config::default();
        early.arrival_offset = -Duration::hours(5);
        // 15 minutes left with lunch still ahead
        assert_eq!(early.registerable_hours_left(wednesday(10, 45)), 0.0);

        let mut late = Config::default();
        late.arrival_offset = Duration::hours(5);
        // 13:00 start, checked just after lunch ended
        assert_eq!(late.registerable_hours_worked(wednesday(12, 15)), 0.0);
    }
}
