use crate::color::{self, Color};

/// Column-aligned block of color-encoded cells.
///
/// Widths are measured with [`color::visible_len`], so cells carrying color
/// markers still line up. A row without cells renders as a blank line.
#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<Vec<String>>,
    right_align: Vec<bool>,
    spacing: usize,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            right_align: Vec::new(),
            spacing: 1,
        }
    }

    /// Per-column alignment flags; columns past the end are left-aligned.
    pub fn with_alignment(mut self, right_align: &[bool]) -> Self {
        self.right_align = right_align.to_vec();
        self
    }

    /// Blank characters written after every cell.
    pub fn with_spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn add<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn separator(&mut self) {
        self.rows.push(Vec::new());
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest visible cell per column, over the rows that reach that column.
    pub fn column_widths(&self) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0; columns];

        for row in &self.rows {
            for (column, cell) in row.iter().enumerate() {
                widths[column] = widths[column].max(color::visible_len(cell));
            }
        }

        widths
    }

    fn is_right_aligned(&self, column: usize) -> bool {
        self.right_align.get(column).copied().unwrap_or(false)
    }

    /// Renders one encoded line per row.
    pub fn render_lines(&self) -> Vec<String> {
        let widths = self.column_widths();

        self.rows
            .iter()
            .map(|row| {
                let mut line = String::new();
                for (column, cell) in row.iter().enumerate() {
                    let padding = " ".repeat(widths[column] - color::visible_len(cell));

                    if self.is_right_aligned(column) {
                        line.push_str(&padding);
                        line.push_str(cell);
                    } else {
                        line.push_str(cell);
                        line.push_str(&padding);
                    }

                    line.push_str(&color::encode(Color::DEFAULT));
                    line.push_str(&" ".repeat(self.spacing));
                }
                line
            })
            .collect()
    }

    /// Renders the whole table as one encoded string, one row per line.
    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        let mut out = self.render_lines().join("\n");
        out.push('\n');
        out
    }
}
