//! Inline color encoding for plain strings.
//!
//! A color change is written into the text itself as a two-character marker:
//! the control character [`CONTROL`] followed by one hex digit naming one of
//! the sixteen console colors. Formatting code can then build colored output
//! with ordinary `format!` calls and defer the terminal escape sequences to a
//! single [`render`] call at the output boundary.
//!
//! ```
//! use workclock_core::color::{self, Color, ColorMode};
//!
//! let text = format!("{}Time Left {}1:05:00", Color::DarkGray, Color::Red);
//! assert_eq!(color::visible_len(&text), 17);
//! assert_eq!(color::render(&text, ColorMode::Plain).unwrap(), "Time Left 1:05:00");
//! ```

use crate::error::{Error, Result};
use owo_colors::{AnsiColors, OwoColorize};
use std::fmt::{self, Write};

/// Reserved character that starts every color marker.
pub const CONTROL: char = '§';

/// The sixteen console colors, in console palette order. The discriminant is
/// the hex digit used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0x0,
    DarkBlue = 0x1,
    DarkGreen = 0x2,
    DarkCyan = 0x3,
    DarkRed = 0x4,
    DarkMagenta = 0x5,
    DarkYellow = 0x6,
    Gray = 0x7,
    DarkGray = 0x8,
    Blue = 0x9,
    Green = 0xa,
    Cyan = 0xb,
    Red = 0xc,
    Magenta = 0xd,
    Yellow = 0xe,
    White = 0xf,
}

impl Color {
    /// Color every run falls back to once its marker's segment ends.
    pub const DEFAULT: Color = Color::Gray;

    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::DarkBlue,
        Color::DarkGreen,
        Color::DarkCyan,
        Color::DarkRed,
        Color::DarkMagenta,
        Color::DarkYellow,
        Color::Gray,
        Color::DarkGray,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Yellow,
        Color::White,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Result<Self> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or_else(|| Error::invalid_format(format!("color id {} is not in 0-15", id)))
    }

    fn from_digit(digit: char) -> Result<Self> {
        let id = digit.to_digit(16).ok_or_else(|| {
            Error::invalid_format(format!("'{}' is not a hex color digit", digit))
        })?;
        Self::from_id(id as u8)
    }

    /// Terminal color used when rendering with ANSI escapes.
    pub fn ansi(self) -> AnsiColors {
        match self {
            Color::Black => AnsiColors::Black,
            Color::DarkBlue => AnsiColors::Blue,
            Color::DarkGreen => AnsiColors::Green,
            Color::DarkCyan => AnsiColors::Cyan,
            Color::DarkRed => AnsiColors::Red,
            Color::DarkMagenta => AnsiColors::Magenta,
            Color::DarkYellow => AnsiColors::Yellow,
            Color::Gray => AnsiColors::White,
            Color::DarkGray => AnsiColors::BrightBlack,
            Color::Blue => AnsiColors::BrightBlue,
            Color::Green => AnsiColors::BrightGreen,
            Color::Cyan => AnsiColors::BrightCyan,
            Color::Red => AnsiColors::BrightRed,
            Color::Magenta => AnsiColors::BrightMagenta,
            Color::Yellow => AnsiColors::BrightYellow,
            Color::White => AnsiColors::BrightWhite,
        }
    }
}

/// Displays as the color's marker, so `format!("{}late", Color::Red)` encodes.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:x}", CONTROL, self.id())
    }
}

/// How [`render`] turns markers into output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Markers become ANSI foreground escapes.
    Ansi,
    /// Markers are dropped.
    Plain,
}

pub fn encode(color: Color) -> String {
    color.to_string()
}

/// Decodes a single marker. The input must be exactly the control character
/// followed by one hex digit.
pub fn decode(marker: &str) -> Result<Color> {
    let mut chars = marker.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(CONTROL), Some(digit), None) => Color::from_digit(digit),
        _ => Err(Error::invalid_format(format!(
            "'{}' is not a color marker",
            marker
        ))),
    }
}

/// Number of characters the string occupies on screen. Each marker
/// contributes nothing.
pub fn visible_len(encoded: &str) -> usize {
    let (total, markers) = encoded.chars().fold((0usize, 0usize), |(total, markers), c| {
        (total + 1, markers + usize::from(c == CONTROL))
    });
    total.saturating_sub(markers * 2)
}

/// Renders an encoded string.
///
/// The text before the first marker is written in [`Color::DEFAULT`]; every
/// following segment starts with its color digit and keeps that color until
/// the next marker. Output always ends back in the terminal's default color.
pub fn render(encoded: &str, mode: ColorMode) -> Result<String> {
    let mut out = String::with_capacity(encoded.len());
    let mut segments = encoded.split(CONTROL);

    if let Some(leading) = segments.next() {
        push_run(&mut out, leading, Color::DEFAULT, mode);
    }

    for segment in segments {
        let mut chars = segment.chars();
        let digit = chars
            .next()
            .ok_or_else(|| Error::invalid_format("color marker without a color digit"))?;
        let color = Color::from_digit(digit)?;
        push_run(&mut out, chars.as_str(), color, mode);
    }

    Ok(out)
}

/// Removes every marker, validating them on the way.
pub fn strip(encoded: &str) -> Result<String> {
    render(encoded, ColorMode::Plain)
}

fn push_run(out: &mut String, text: &str, color: Color, mode: ColorMode) {
    if text.is_empty() {
        return;
    }

    match mode {
        ColorMode::Plain => out.push_str(text),
        ColorMode::Ansi => {
            let _ = write!(out, "{}", text.color(color.ansi()));
        }
    }
}
