//! # Presentation Layer
//!
//! Turns the time model into the dashboard frame and puts it on screen.
//!
//! ```text
//! [ Handler ] --> [ Views ] ==(encoded lines)==> [ Renderer ] --> [ TerminalWriter ]
//!                (calendar, summary)            (refresh loop)     (crossterm / mock)
//! ```
//!
//! Views produce lines carrying inline color markers and never touch the
//! terminal. Renderers decide when to clear, translate markers for the
//! selected [`ColorMode`](workclock_core::ColorMode) and flush.
//!
//! - `formatters/`: small string helpers shared by the views
//! - `views/`: the calendar grid, the summary table and the composed frame
//! - `renderers/`: terminal backends and the redraw loop

pub mod formatters;
pub mod renderers;
pub mod views;
