use super::args::Cli;
use super::handlers;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use is_terminal::IsTerminal;
use workclock_core::{Clock, ColorMode, Config, Meeting, Schedule, SystemClock};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(&cli);

    let clock = SystemClock;
    let config = build_config(&cli, clock.now())?;
    let mode = color_mode();

    log::debug!(
        "offset {} min, adjust {}, {} meeting(s), color {:?}",
        config.arrival_offset.num_minutes(),
        config.adjust_end,
        config.meetings.len(),
        mode
    );

    if cli.once {
        handlers::dashboard::handle_once(&config, clock, mode)
    } else {
        handlers::dashboard::handle(&config, clock, mode)
    }
}

fn init_logging(cli: &Cli) {
    // RUST_LOG, when set, overrides --log-level
    let _ = env_logger::Builder::new()
        .filter_level(cli.log_level.into())
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Offsets are applied before meetings are parsed so `start` and `end`
/// anchors resolve against the effective day.
pub(crate) fn build_config(cli: &Cli, now: NaiveDateTime) -> Result<Config> {
    let mut config = Config::new(Schedule::default());
    config.arrival_offset = cli.arrival_offset();
    config.adjust_end = cli.adjust;
    config.human_readable = !cli.digits;

    for token in &cli.meetings {
        let meeting = Meeting::parse(token, now, &config)
            .with_context(|| format!("'{}' is not a valid meeting", token))?;
        config.meetings.push(meeting);
    }

    Ok(config)
}

fn color_mode() -> ColorMode {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
    if std::io::stdout().is_terminal() && !no_color {
        ColorMode::Ansi
    } else {
        ColorMode::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use clap::Parser;

    fn wednesday(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("workclock").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_build_config_from_flags() {
        let config = build_config(&cli(&["-aL", "--digits"]), wednesday(9, 0)).unwrap();
        assert!(config.adjust_end);
        assert!(!config.human_readable);
        assert_eq!(config.arrival_offset, Duration::hours(1));
        assert!(config.meetings.is_empty());
    }

    #[test]
    fn test_meetings_use_effective_day() {
        let config = build_config(&cli(&["-l", "start"]), wednesday(9, 0)).unwrap();
        assert_eq!(config.meetings.len(), 1);
        assert_eq!(config.meetings[0].start(), wednesday(8, 30));
        assert_eq!(config.meetings[0].end(), wednesday(9, 30));
    }

    #[test]
    fn test_invalid_meeting_names_the_token() {
        let err = build_config(&cli(&["13", "lunchtime"]), wednesday(9, 0)).unwrap_err();
        assert_eq!(err.to_string(), "'lunchtime' is not a valid meeting");
        assert!(err.downcast_ref::<workclock_core::Error>().is_some());
    }
}
