//! The week grid: one column per workday, one row per hour, each cell a
//! progress bar of that hour.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use workclock_core::config::week_start;
use workclock_core::interval::{self, Interval};
use workclock_core::{Cell, CellSpan, Color, Config, ProgressBar, Result};

/// Narrowest day column: a three-cell bar plus its separator.
pub const MIN_DAY_WIDTH: usize = ProgressBar::MIN_WIDTH + 1;

const HOUR_LABEL_WIDTH: usize = 3;

pub fn day_width(width: usize, week_length: u32) -> usize {
    let days = week_length.max(1) as usize;
    (width.saturating_sub(HOUR_LABEL_WIDTH) / days).max(MIN_DAY_WIDTH)
}

pub fn render(config: &Config, now: NaiveDateTime, width: usize) -> Result<Vec<String>> {
    let day_width = day_width(width, config.schedule.week_length);
    let days = week_days(config, now);

    let mut lines = vec![header(&days, now, day_width)];

    for hour in hour_range(config, now) {
        let mut line = hour_label(config, now, hour);
        line.push(' ');

        for &date in &days {
            line.push_str(&hour_cell(config, now, date, hour, day_width)?);
            line.push(' ');
        }

        lines.push(line);
    }

    Ok(lines)
}

fn week_days(config: &Config, now: NaiveDateTime) -> Vec<NaiveDate> {
    let monday = week_start(now.date());
    (0..config.schedule.week_length)
        .map(|offset| monday + Duration::days(i64::from(offset)))
        .collect()
}

fn header(days: &[NaiveDate], now: NaiveDateTime, day_width: usize) -> String {
    let mut line = " ".repeat(HOUR_LABEL_WIDTH + 1);

    for &date in days {
        let mut name = date.format("%A").to_string();
        if name.len() > day_width {
            name = date.format("%a").to_string();
        }

        let padding = " ".repeat(day_width.saturating_sub(name.len()));
        if date == now.date() {
            line.push_str(&format!("{}{}{}{}", Color::Cyan, name, Color::DEFAULT, padding));
        } else {
            line.push_str(&name);
            line.push_str(&padding);
        }
    }

    line
}

/// Hours from the start of the nominal day until whichever is latest: the
/// nominal end, the current time or today's effective end.
fn hour_range(config: &Config, now: NaiveDateTime) -> std::ops::Range<i64> {
    let schedule = &config.schedule;
    let clock = Duration::minutes(interval::time_of_day(now).num_minutes());

    let last = [schedule.day_end, clock, config.today_end()]
        .into_iter()
        .map(ceil_hours)
        .max()
        .unwrap_or(0)
        .min(24);

    schedule.day_start.num_hours()..last
}

fn ceil_hours(span: Duration) -> i64 {
    let seconds = span.num_seconds();
    seconds.div_euclid(3600) + i64::from(seconds.rem_euclid(3600) > 0)
}

fn hour_label(config: &Config, now: NaiveDateTime, hour: i64) -> String {
    let after_end = Duration::hours(hour) >= config.schedule.day_end;
    let current = i64::from(now.hour()) == hour;

    let color = match (current, after_end) {
        (true, true) => Color::Yellow,
        (true, false) => Color::Cyan,
        (false, true) => Color::DarkYellow,
        (false, false) => Color::DEFAULT,
    };

    if color == Color::DEFAULT {
        format!("{:02}", hour)
    } else {
        format!("{}{:02}{}", color, hour, Color::DEFAULT)
    }
}

fn hour_cell(
    config: &Config,
    now: NaiveDateTime,
    date: NaiveDate,
    hour: i64,
    day_width: usize,
) -> Result<String> {
    let hour_start = Duration::hours(hour);
    let is_today = date == now.date();

    if hour_start >= config.schedule.day_end && !is_today {
        return Ok(" ".repeat(day_width - 1));
    }

    let span = Interval::starting_at(interval::at(date, hour_start), Duration::hours(1));
    let fraction = span.completion(now).unwrap_or(0.0);

    let cell_bounds = move |cell: CellSpan| {
        (
            hour_start + fraction_of_hour(cell.lo),
            hour_start + fraction_of_hour(cell.hi),
        )
    };
    let in_meeting = move |lo: Duration, hi: Duration| {
        config.in_meeting(interval::at(date, lo), interval::at(date, hi))
    };

    let bar = ProgressBar::new(fraction, day_width - 1)?
        .fill_rule(move |cell| {
            let (lo, hi) = cell_bounds(cell);
            let overtime = is_today && hi > config.today_end();

            if is_today && hi <= config.today_start() {
                Cell::new(Color::DarkRed, 'X')
            } else if in_meeting(lo, hi) {
                Cell::new(if overtime { Color::Green } else { Color::Cyan }, '>')
            } else if lo >= config.schedule.lunch_start && hi <= config.schedule.lunch_end {
                Cell::new(Color::DarkGray, '@')
            } else if overtime {
                Cell::new(Color::Green, '+')
            } else {
                Cell::new(Color::Gray, '#')
            }
        })
        .empty_rule(move |cell| {
            let (lo, hi) = cell_bounds(cell);
            if in_meeting(lo, hi) {
                Cell::new(Color::DarkGray, '.')
            } else {
                Cell::new(Color::Gray, ' ')
            }
        });

    Ok(bar.render())
}

fn fraction_of_hour(fraction: f64) -> Duration {
    Duration::milliseconds((fraction * 3_600_000.0).round() as i64)
}
