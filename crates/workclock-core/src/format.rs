use chrono::Duration;

/// Formats a span either as "2 hours, 15 min" or as "2:15:00".
///
/// Negative spans are shown by magnitude; callers pick the wording
/// ("Time Until Work", "Overtime Worked") that carries the sign.
pub fn duration(span: Duration, human_readable: bool) -> String {
    if human_readable {
        human_duration(span)
    } else {
        digit_duration(span)
    }
}

/// `H:mm:ss` of the absolute value. Hours are not wrapped at 24.
pub fn digit_duration(span: Duration) -> String {
    let seconds = magnitude(span).num_seconds();
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// The largest non-zero unit together with the next smaller one.
///
/// Counts are padded to two columns and units to their longest spelling,
/// so a ticking value keeps its width from one frame to the next.
pub fn human_duration(span: Duration) -> String {
    let seconds = magnitude(span).num_seconds();
    let (hours, minutes, secs) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);

    if seconds < 1 {
        "Zero".to_string()
    } else if hours > 0 {
        format!("{}{}", unit(hours, "hour, ", "hours, "), unit(minutes, "min", "min"))
    } else if minutes > 0 {
        format!(
            "{}{}",
            unit(minutes, "minute, ", "minutes, "),
            unit(secs, "sec", "sec")
        )
    } else {
        unit(secs, "second", "seconds")
    }
}

fn unit(count: i64, singular: &str, plural: &str) -> String {
    let width = singular.len().max(plural.len());
    let name = if count == 1 { singular } else { plural };
    format!("{:>2} {:<width$}", count, name, width = width)
}

fn magnitude(span: Duration) -> Duration {
    if span < Duration::zero() { -span } else { span }
}
