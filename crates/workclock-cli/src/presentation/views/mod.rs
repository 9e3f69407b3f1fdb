pub mod calendar;
pub mod summary;

use chrono::NaiveDateTime;
use workclock_core::{Config, Result};

/// The whole dashboard for one instant: the calendar, two blank lines and
/// the summary table.
pub fn dashboard(config: &Config, now: NaiveDateTime, width: usize) -> Result<Vec<String>> {
    let mut lines = calendar::render(config, now, width)?;
    lines.push(String::new());
    lines.push(String::new());
    lines.extend(summary::render(config, now)?);
    Ok(lines)
}
