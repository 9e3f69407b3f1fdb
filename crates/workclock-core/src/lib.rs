//! Core of workclock: the time model behind the dashboard and the text
//! primitives it is drawn with.
//!
//! Nothing in this crate touches the terminal. Rendering produces strings
//! carrying inline [`color`] markers; the CLI decides how to emit them.
//!
//! - [`color`]: inline color markers and visible-length measurement
//! - [`bar`]: fixed-width progress bars driven by per-cell rules
//! - [`table`]: column-aligned rows of encoded cells
//! - [`schedule`], [`config`], [`interval`], [`clock`], [`format`]: the time model
//! - [`meeting`]: meetings and their command-line grammar

pub mod bar;
pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod interval;
pub mod meeting;
pub mod schedule;
pub mod table;

pub use bar::{Cell, CellSpan, ProgressBar};
pub use clock::{Clock, FixedClock, SystemClock};
pub use color::{Color, ColorMode};
pub use config::Config;
pub use error::{Error, Result};
pub use interval::Interval;
pub use meeting::Meeting;
pub use schedule::Schedule;
pub use table::Table;
