//! Meetings and the small grammar used to declare them on the command line.
//!
//! A specification is `[day ]time[-end]`:
//!
//! | part  | accepted forms                                                        |
//! |-------|-----------------------------------------------------------------------|
//! | day   | `today`, `yesterday`, `tomorrow`, `monday`/`mon` … `friday`/`fri`      |
//! | time  | `noon`, `midnight`, `start`, `end`, `lunch`, `0`–`23`, `16:30`, `4pm` |
//! | end   | a time as above, or a length in hours such as `2h` or `1.5`           |
//!
//! Without an end the meeting lasts one hour. `start` and `end` follow the
//! arrival offset when the meeting is today and the nominal schedule on other
//! days.

use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::interval::{self, Interval};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::fmt;

const DEFAULT_END: &str = "1h";

/// Longest meeting accepted, in hours.
const MAX_LENGTH_HOURS: f64 = 24.0 * 7.0;

const CLOCK_FORMATS: [&str; 4] = ["%H:%M:%S", "%H:%M", "%I:%M:%S%p", "%I:%M%p"];

/// A declared, immutable block of occupied time.
///
/// Every meeting satisfies `start < end`; a specification whose end falls on
/// or before its start is rejected instead of wrapped past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Meeting {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Meeting {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end <= start {
            return Err(Error::invalid_format(format!(
                "meeting ends at {} which is not after its start at {}",
                end.format("%a %H:%M"),
                start.format("%a %H:%M")
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    /// Parses a meeting specification relative to `now`.
    pub fn parse(input: &str, now: NaiveDateTime, config: &Config) -> Result<Self> {
        let input = input.trim().to_lowercase();

        let (start_part, end_part) = match input.split_once('-') {
            Some((start, end)) => (start.trim(), end.trim()),
            None => (input.as_str(), DEFAULT_END),
        };

        if end_part.contains('-') {
            return Err(Error::invalid_format(format!(
                "'{}' has more than one '-'",
                input
            )));
        }

        let (day_part, time_part) = match start_part.split_once(' ') {
            Some((day, time)) => (day.trim(), time.trim()),
            None => ("today", start_part),
        };

        let date = resolve_day(day_part, now)?;
        let anchors = Anchors {
            config,
            is_today: date == now.date(),
        };

        let start = interval::at(date, anchors.time_of_day(time_part)?);
        let end = match anchors.time_of_day(end_part) {
            Ok(end) => interval::at(date, end),
            Err(_) => start + parse_length(end_part)?,
        };

        let meeting = Self::new(start, end)?;
        log::debug!("parsed meeting '{}' as {}", input, meeting);
        Ok(meeting)
    }

    pub fn try_parse(input: &str, now: NaiveDateTime, config: &Config) -> Option<Self> {
        Self::parse(input, now, config).ok()
    }
}

impl fmt::Display for Meeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%a %Y-%m-%d %H:%M"),
            self.end.format("%H:%M")
        )
    }
}

fn resolve_day(token: &str, now: NaiveDateTime) -> Result<NaiveDate> {
    let today = now.date();

    let weekday = match token {
        "today" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        "tomorrow" => return Ok(today + Duration::days(1)),
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        _ => {
            return Err(Error::invalid_format(format!("unknown day '{}'", token)));
        }
    };

    Ok(config::date_at_weekday(today, weekday))
}

/// Resolves the named times of day, which depend on the schedule and on
/// whether the meeting's date is today.
struct Anchors<'a> {
    config: &'a Config,
    is_today: bool,
}

impl Anchors<'_> {
    fn time_of_day(&self, token: &str) -> Result<Duration> {
        let schedule = &self.config.schedule;

        match token {
            "noon" => return Ok(Duration::hours(12)),
            "midnight" => return Ok(Duration::zero()),
            "start" if self.is_today => return Ok(self.config.today_start()),
            "start" => return Ok(schedule.day_start),
            "end" if self.is_today => return Ok(self.config.today_end()),
            "end" => return Ok(schedule.day_end),
            "lunch" => return Ok(schedule.lunch_start),
            _ => {}
        }

        if let Ok(hour) = token.parse::<i64>() {
            return if (0..24).contains(&hour) {
                Ok(Duration::hours(hour))
            } else {
                Err(Error::invalid_format(format!(
                    "hour {} is outside 0-23",
                    hour
                )))
            };
        }

        if let Some(time) = CLOCK_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(token, format).ok())
        {
            return Ok(time.signed_duration_since(NaiveTime::MIN));
        }

        if let Some(hour) = strip_any_suffix(token, &["am", "a"]) {
            return match hour.parse::<i64>() {
                Ok(hour @ 1..=11) => Ok(Duration::hours(hour)),
                Ok(12) => Ok(Duration::zero()),
                _ => Err(invalid_time(token)),
            };
        }

        if let Some(hour) = strip_any_suffix(token, &["pm", "p"]) {
            return match hour.parse::<i64>() {
                Ok(hour @ 1..=11) => Ok(Duration::hours(hour + 12)),
                Ok(12) => Ok(Duration::hours(12)),
                _ => Err(invalid_time(token)),
            };
        }

        Err(invalid_time(token))
    }
}

fn strip_any_suffix<'t>(token: &'t str, suffixes: &[&str]) -> Option<&'t str> {
    suffixes
        .iter()
        .find_map(|suffix| token.strip_suffix(suffix))
        .map(str::trim_end)
}

fn invalid_time(token: &str) -> Error {
    Error::invalid_format(format!("'{}' is not a time of day", token))
}

/// A meeting length in hours, with an optional trailing `h`.
fn parse_length(token: &str) -> Result<Duration> {
    let number = token.strip_suffix('h').unwrap_or(token).trim();
    let hours: f64 = number.parse().map_err(|_| {
        Error::invalid_format(format!("'{}' is neither a time nor a length", token))
    })?;

    if !hours.is_finite() || hours <= 0.0 {
        return Err(Error::invalid_format(format!(
            "meeting length '{}' must be a positive number of hours",
            token
        )));
    }

    if hours > MAX_LENGTH_HOURS {
        return Err(Error::out_of_range(format!(
            "meeting length of {} hours exceeds {} hours",
            hours, MAX_LENGTH_HOURS
        )));
    }

    Ok(Duration::milliseconds((hours * 3_600_000.0).round() as i64))
}
