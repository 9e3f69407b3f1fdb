//! The table under the calendar: clock, lunch, meetings and how much of
//! the day and the week is done.

use crate::presentation::formatters::text::{
    blink, percentage_and_bar, rainbow, registerable, yes_no,
};
use crate::presentation::formatters::time::{
    format_clock, format_date, format_span, format_time_of_day,
};
use chrono::{Datelike, Duration, NaiveDateTime};
use workclock_core::config::week_start;
use workclock_core::interval::{self, Interval};
use workclock_core::{Color, Config, Result, Table};

const ALIGNMENT: [bool; 4] = [false, true, true, false];

pub fn render(config: &Config, now: NaiveDateTime) -> Result<Vec<String>> {
    let mut table = Table::new().with_alignment(&ALIGNMENT).with_spacing(1);

    table.add(["Today".to_string(), format_date(now)]);
    table.add(["Current Time".to_string(), format_clock(now)]);

    let weekday = now.date().weekday().num_days_from_monday();
    if weekday >= config.schedule.week_length {
        add_weekend(&mut table, config, now)?;
        return Ok(table.render_lines());
    }

    add_lunch(&mut table, config, now);
    table.separator();

    if add_meeting(&mut table, config, now)? {
        table.separator();
    }

    table.add([
        "Arrived At".to_string(),
        format_time_of_day(config.today_start()),
    ]);
    table.add(["Leave At".to_string(), format_time_of_day(config.today_end())]);
    table.separator();

    add_today(&mut table, config, now)?;
    table.separator();

    add_week(&mut table, config, now)?;

    Ok(table.render_lines())
}

fn add_weekend(table: &mut Table, config: &Config, now: NaiveDateTime) -> Result<()> {
    let monday = week_start(now.date());
    let last_day = monday + Duration::days(i64::from(config.schedule.week_length) - 1);
    let weekend = Interval::new(
        interval::at(last_day, config.schedule.day_end),
        interval::at(monday + Duration::days(7), config.schedule.day_start),
    );

    table.add([
        "Next Workweek In".to_string(),
        format_span(weekend.until_end(now), config.human_readable),
        percentage_and_bar(weekend.completion(now).unwrap_or(0.0), false, false)?,
    ]);
    table.separator();
    table.separator();
    table.add([rainbow("Have a nice weekend!!", now)]);

    Ok(())
}

fn add_lunch(table: &mut Table, config: &Config, now: NaiveDateTime) {
    let schedule = &config.schedule;
    let clock = interval::time_of_day(now);

    let (state, color) = if clock < schedule.lunch_start - schedule.soon {
        ("Before".to_string(), None)
    } else if clock < schedule.lunch_start {
        ("Soon".to_string(), Some(Color::DarkYellow))
    } else if clock > schedule.lunch_end {
        ("After".to_string(), Some(Color::DarkGray))
    } else {
        (blink("In Progress", now), Some(Color::Red))
    };
    let prefix = color.map(|color| color.to_string()).unwrap_or_default();

    table.add(["Lunch".to_string(), format!("{}{}", prefix, state)]);

    if clock < schedule.lunch_start {
        table.add([
            "   In".to_string(),
            format!(
                "{}{}",
                prefix,
                format_span(schedule.lunch_start - clock, config.human_readable)
            ),
        ]);
    }

    let in_core = clock > schedule.core_start && clock < schedule.core_end;
    table.add([
        "In Core Workhours".to_string(),
        yes_no(in_core, "Yes", &format!("{}No", Color::DarkGray)),
    ]);

    if clock > schedule.lunch_end && clock < schedule.core_end {
        table.add([
            "           End In".to_string(),
            format_span(schedule.core_end - clock, config.human_readable),
        ]);
    }
}

/// Adds rows for the running or next meeting if it is today. Returns whether
/// anything was added.
fn add_meeting(table: &mut Table, config: &Config, now: NaiveDateTime) -> Result<bool> {
    let Some(meeting) = config
        .current_or_next_meeting(now)
        .filter(|meeting| meeting.start().date() == now.date())
    else {
        return Ok(false);
    };

    let span = meeting.interval();
    let since_start = span.since_start(now);

    if since_start > Duration::zero() {
        table.add([
            "Meeting Ends At".to_string(),
            format!("{}{}", Color::Cyan, format_clock(meeting.end())),
        ]);
        table.add([
            "Meeting Ends In".to_string(),
            format!(
                "{}{}",
                Color::Cyan,
                format_span(span.until_end(now), config.human_readable)
            ),
            percentage_and_bar(span.completion(now).unwrap_or(0.0), false, false)?,
        ]);
    } else {
        let color = if since_start >= -config.schedule.soon {
            Color::DarkYellow
        } else {
            Color::Gray
        };
        table.add([
            "Next Meeting At".to_string(),
            format!("{}{}", color, format_clock(meeting.start())),
        ]);
        table.add([
            "Next Meeting In".to_string(),
            format!(
                "{}{}",
                color,
                format_span(-since_start, config.human_readable)
            ),
        ]);
    }

    Ok(true)
}

fn add_today(table: &mut Table, config: &Config, now: NaiveDateTime) -> Result<()> {
    let schedule = &config.schedule;
    let today = config.today_span(now);
    let since_start = today.since_start(now);
    let until_end = today.until_end(now);
    let completion = today.completion(now).unwrap_or(1.0);

    if since_start < Duration::zero() {
        table.add([
            "Time Until Work".to_string(),
            format_span(since_start, config.human_readable),
        ]);
    } else {
        table.add([
            "Time At Work".to_string(),
            format_span(since_start, config.human_readable),
            percentage_and_bar(completion, false, false)?,
            registerable('+', config.registerable_hours_worked(now)),
        ]);
    }

    if until_end > Duration::zero() {
        let warning = if until_end < schedule.end_warning_red {
            Color::Red.to_string()
        } else if until_end < schedule.end_warning_yellow {
            Color::DarkYellow.to_string()
        } else {
            String::new()
        };

        let mut left = format!(
            "{}{}",
            warning,
            format_span(until_end, config.human_readable)
        );
        if until_end < schedule.end_warning_blink {
            left = blink(&left, now);
        }

        table.add([
            "Time Left".to_string(),
            left,
            percentage_and_bar(1.0 - completion, false, true)?,
            registerable('-', config.registerable_hours_left(now)),
        ]);
    } else {
        table.add([
            "Overtime Worked".to_string(),
            format!(
                "{}{}",
                Color::Green,
                format_span(until_end, config.human_readable)
            ),
            String::new(),
            format!(
                "{}{}",
                Color::Green,
                registerable('+', config.registerable_overtime(now))
            ),
        ]);
    }

    Ok(())
}

fn add_week(table: &mut Table, config: &Config, now: NaiveDateTime) -> Result<()> {
    let total = config.total_this_week();
    let completed = config.completed_this_week(now);
    let fraction = if total > Duration::zero() {
        completed.num_milliseconds() as f64 / total.num_milliseconds() as f64
    } else {
        1.0
    };

    table.add([
        "Time This Week".to_string(),
        format_span(completed.min(total), config.human_readable),
        percentage_and_bar(fraction, true, false)?,
    ]);
    table.add([
        "Time Left This Week".to_string(),
        format_span((total - completed).max(Duration::zero()), config.human_readable),
        percentage_and_bar(1.0 - fraction, true, true)?,
    ]);

    Ok(())
}
