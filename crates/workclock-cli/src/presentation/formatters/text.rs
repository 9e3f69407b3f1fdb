use chrono::{NaiveDateTime, Timelike};
use workclock_core::{Color, ProgressBar, Result, color};

const RAINBOW: [Color; 6] = [
    Color::DarkRed,
    Color::DarkYellow,
    Color::Green,
    Color::Blue,
    Color::Cyan,
    Color::Magenta,
];

/// Width of the bar drawn next to a percentage, caps included.
pub const PERCENT_BAR_WIDTH: usize = 20;

/// Shows `text` during the first half of every second and the same number
/// of blanks during the second half.
pub fn blink(text: &str, now: NaiveDateTime) -> String {
    if now.nanosecond() / 1_000_000 % 1000 < 500 {
        text.to_string()
    } else {
        " ".repeat(color::visible_len(text))
    }
}

/// Prefixes `text` with a color that advances every half second.
pub fn rainbow(text: &str, now: NaiveDateTime) -> String {
    let step = now.and_utc().timestamp_millis().div_euclid(500);
    let color = RAINBOW[step.rem_euclid(RAINBOW.len() as i64) as usize];
    format!("{}{}", color, text)
}

pub fn yes_no(value: bool, yes: &str, no: &str) -> String {
    if value { yes.to_string() } else { no.to_string() }
}

/// Whole percent, truncated toward zero and right-aligned to three digits.
pub fn percentage(fraction: f64, clamp: bool) -> String {
    let fraction = if clamp {
        fraction.clamp(0.0, 1.0)
    } else {
        fraction
    };
    format!("{:>3}%", (fraction * 100.0) as i64)
}

/// "` 42% [########          ]`"
pub fn percentage_and_bar(fraction: f64, clamp: bool, right_align: bool) -> Result<String> {
    let bar = ProgressBar::new(fraction, PERCENT_BAR_WIDTH)?.right_aligned(right_align);
    Ok(format!("{} {}", percentage(fraction, clamp), bar.render()))
}

/// Bookable hours with an explicit sign, e.g. "+2.5h".
pub fn registerable(sign: char, hours: f64) -> String {
    format!("{}{:.1}h", sign, hours)
}
