use crate::types::LogLevel;
use chrono::Duration;
use clap::{ArgAction, CommandFactory, Parser};

const MEETING_HELP: &str = "\
Meetings:
  Every other argument is a meeting, written as [DAY ]TIME[-END]

  DAY   today, yesterday, tomorrow, monday/mon ... friday/fri (default: today)
  TIME  noon, midnight, start, end, lunch, 0-23, 16:30, 9am, 4pm
  END   a time as above, or a length such as 2h or 1.5 (default: 1h)

Examples:
  workclock 13 \"1pm-2pm\" \"friday noon\" \"thursday start-end\"
  workclock -ad --late 0.5 \"monday 16:30\"";

/// Longest arrival offset accepted by --late/--early.
const MAX_OFFSET_HOURS: f64 = 12.0;

#[derive(Parser, Debug)]
#[command(name = "workclock")]
#[command(about = "Track progress through the workday, the workweek and today's meetings", long_about = None)]
#[command(version, disable_help_flag = true, after_help = MEETING_HELP)]
pub struct Cli {
    #[arg(short = 'a', long = "adjust", visible_alias = "adj", help = "Leave 30 minutes before the regular end of the day")]
    pub adjust: bool,

    #[arg(
        long,
        value_name = "HOURS",
        value_parser = parse_hours,
        overrides_with_all = ["early", "late_half", "late_hour", "early_half", "early_hour"],
        help = "Arrived this many hours late"
    )]
    pub late: Option<f64>,

    #[arg(
        long,
        value_name = "HOURS",
        value_parser = parse_hours,
        overrides_with_all = ["late", "late_half", "late_hour", "early_half", "early_hour"],
        help = "Arrived this many hours early"
    )]
    pub early: Option<f64>,

    #[arg(
        short = 'l',
        overrides_with_all = ["late", "early", "late_hour", "early_half", "early_hour"],
        help = "Arrived half an hour late"
    )]
    pub late_half: bool,

    #[arg(
        short = 'L',
        overrides_with_all = ["late", "early", "late_half", "early_half", "early_hour"],
        help = "Arrived an hour late"
    )]
    pub late_hour: bool,

    #[arg(
        short = 'e',
        overrides_with_all = ["late", "early", "late_half", "late_hour", "early_hour"],
        help = "Arrived half an hour early"
    )]
    pub early_half: bool,

    #[arg(
        short = 'E',
        overrides_with_all = ["late", "early", "late_half", "late_hour", "early_half"],
        help = "Arrived an hour early"
    )]
    pub early_hour: bool,

    #[arg(short = 'd', long, help = "Show durations as H:mm:ss instead of words")]
    pub digits: bool,

    #[arg(long, help = "Draw a single frame and exit")]
    pub once: bool,

    #[arg(long, default_value = "warn")]
    pub log_level: LogLevel,

    #[allow(dead_code)]
    #[arg(short = 'h', long, short_alias = '?', action = ArgAction::Help, help = "Print help")]
    help: Option<bool>,

    #[arg(value_name = "MEETING")]
    pub meetings: Vec<String>,
}

impl Cli {
    /// Arrival offset selected by the last offset flag on the command line.
    pub fn arrival_offset(&self) -> Duration {
        let hours = if let Some(hours) = self.late {
            hours
        } else if let Some(hours) = self.early {
            -hours
        } else if self.late_half {
            0.5
        } else if self.late_hour {
            1.0
        } else if self.early_half {
            -0.5
        } else if self.early_hour {
            -1.0
        } else {
            0.0
        };

        Duration::milliseconds((hours * 3_600_000.0).round() as i64)
    }
}

fn parse_hours(value: &str) -> Result<f64, String> {
    let hours: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number of hours", value))?;

    if !hours.is_finite() || hours.abs() > MAX_OFFSET_HOURS {
        return Err(format!(
            "offset must be between -{0} and {0} hours",
            MAX_OFFSET_HOURS
        ));
    }

    Ok(hours)
}

/// Usage line plus a pointer to the full help.
pub fn usage() -> String {
    format!(
        "{}\n\nFor more information, try '--help'.",
        Cli::command().render_usage()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("workclock").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_bundled_short_flags() {
        let cli = parse(&["-ad"]);
        assert!(cli.adjust);
        assert!(cli.digits);
    }

    #[test]
    fn test_adjust_aliases() {
        assert!(parse(&["--adjust"]).adjust);
        assert!(parse(&["--adj"]).adjust);
    }

    #[test]
    fn test_fixed_offsets() {
        assert_eq!(parse(&["-l"]).arrival_offset(), Duration::minutes(30));
        assert_eq!(parse(&["-L"]).arrival_offset(), Duration::hours(1));
        assert_eq!(parse(&["-e"]).arrival_offset(), -Duration::minutes(30));
        assert_eq!(parse(&["-E"]).arrival_offset(), -Duration::hours(1));
        assert_eq!(parse(&[]).arrival_offset(), Duration::zero());
    }

    #[test]
    fn test_late_and_early_hours() {
        assert_eq!(
            parse(&["--late", "0.25"]).arrival_offset(),
            Duration::minutes(15)
        );
        assert_eq!(
            parse(&["--early", "2"]).arrival_offset(),
            -Duration::hours(2)
        );
    }

    #[test]
    fn test_last_offset_flag_wins() {
        assert_eq!(
            parse(&["-l", "--early", "1"]).arrival_offset(),
            -Duration::hours(1)
        );
        assert_eq!(
            parse(&["--late", "2", "-E"]).arrival_offset(),
            -Duration::hours(1)
        );
    }

    #[test]
    fn test_rejects_bad_offsets() {
        for args in [["--late", "soon"], ["--early", "inf"], ["--late", "30"]] {
            let argv = std::iter::once("workclock").chain(args.iter().copied());
            assert!(Cli::try_parse_from(argv).is_err());
        }
    }

    #[test]
    fn test_meetings_are_positional() {
        let cli = parse(&["13", "1pm-2pm", "friday noon", "-d"]);
        assert_eq!(cli.meetings, vec!["13", "1pm-2pm", "friday noon"]);
        assert!(cli.digits);
    }

    #[test]
    fn test_question_mark_is_help() {
        let err = Cli::try_parse_from(["workclock", "-?"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_help_lists_meeting_grammar() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("[DAY ]TIME[-END]"));
        assert!(help.contains("--adjust"));
    }
}
