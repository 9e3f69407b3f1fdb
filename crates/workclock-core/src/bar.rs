//! Fixed-width progress bar with caller-supplied cell rules.
//!
//! The bar itself only decides *which* content cells are filled. What each
//! cell looks like comes from two closures, one for filled cells and one for
//! empty cells, so the same primitive draws a plain percentage bar, an hour of
//! the calendar grid with lunch and meeting overlays, or anything else.

use crate::color::Color;
use crate::error::{Error, Result};
use std::fmt::Write;

/// Fractional span of one content cell, `[lo, hi)`, plus its index counted
/// from the side the bar fills from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSpan {
    pub lo: f64,
    pub hi: f64,
    pub index: usize,
}

/// What a rule draws in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub color: Color,
    pub glyph: char,
}

impl Cell {
    pub const fn new(color: Color, glyph: char) -> Self {
        Self { color, glyph }
    }
}

pub type CellRule<'a> = Box<dyn Fn(CellSpan) -> Cell + 'a>;

pub struct ProgressBar<'a> {
    fraction: f64,
    total_width: usize,
    right_align: bool,
    start_cap: char,
    end_cap: char,
    cap_color: Color,
    fill_rule: CellRule<'a>,
    empty_rule: CellRule<'a>,
}

impl<'a> ProgressBar<'a> {
    /// Two caps plus at least one content cell.
    pub const MIN_WIDTH: usize = 3;

    /// Creates a bar `total_width` characters wide, caps included.
    ///
    /// `fraction` is clamped to `[0, 1]`; NaN counts as 0.
    pub fn new(fraction: f64, total_width: usize) -> Result<Self> {
        if total_width < Self::MIN_WIDTH {
            return Err(Error::out_of_range(format!(
                "bar width {} is below the minimum of {}",
                total_width,
                Self::MIN_WIDTH
            )));
        }

        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        Ok(Self {
            fraction,
            total_width,
            right_align: false,
            start_cap: '[',
            end_cap: ']',
            cap_color: Color::DEFAULT,
            fill_rule: Box::new(|_| Cell::new(Color::DEFAULT, '#')),
            empty_rule: Box::new(|_| Cell::new(Color::DEFAULT, ' ')),
        })
    }

    /// Fill from the end cap instead of the start cap.
    pub fn right_aligned(mut self, right_align: bool) -> Self {
        self.right_align = right_align;
        self
    }

    pub fn fill_rule(mut self, rule: impl Fn(CellSpan) -> Cell + 'a) -> Self {
        self.fill_rule = Box::new(rule);
        self
    }

    pub fn empty_rule(mut self, rule: impl Fn(CellSpan) -> Cell + 'a) -> Self {
        self.empty_rule = Box::new(rule);
        self
    }

    pub fn caps(mut self, start: char, end: char) -> Self {
        self.start_cap = start;
        self.end_cap = end;
        self
    }

    pub fn cap_color(mut self, color: Color) -> Self {
        self.cap_color = color;
        self
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn total_width(&self) -> usize {
        self.total_width
    }

    pub fn content_width(&self) -> usize {
        self.total_width - 2
    }

    pub fn filled_cells(&self) -> usize {
        (0..self.content_width())
            .filter(|&index| self.span(index).hi <= self.fraction)
            .count()
    }

    fn span(&self, index: usize) -> CellSpan {
        let width = self.content_width() as f64;
        CellSpan {
            lo: index as f64 / width,
            hi: (index + 1) as f64 / width,
            index,
        }
    }

    /// Renders the bar as a color-encoded string whose visible length is
    /// always `total_width`.
    pub fn render(&self) -> String {
        let content_width = self.content_width();
        let mut out = String::with_capacity(self.total_width * 3);
        let _ = write!(out, "{}{}", self.cap_color, self.start_cap);

        let mut last_color = self.cap_color;

        for position in 0..content_width {
            let index = if self.right_align {
                content_width - 1 - position
            } else {
                position
            };

            let span = self.span(index);
            let cell = if span.hi <= self.fraction {
                (self.fill_rule)(span)
            } else {
                (self.empty_rule)(span)
            };

            if cell.color != last_color {
                let _ = write!(out, "{}", cell.color);
                last_color = cell.color;
            }
            out.push(cell.glyph);
        }

        let _ = write!(out, "{}{}", self.cap_color, self.end_cap);
        out
    }
}

impl std::fmt::Debug for ProgressBar<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressBar")
            .field("fraction", &self.fraction)
            .field("total_width", &self.total_width)
            .field("right_align", &self.right_align)
            .finish_non_exhaustive()
    }
}
