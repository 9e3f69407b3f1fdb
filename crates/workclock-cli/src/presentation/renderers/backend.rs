use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{self, Stdout, Write};

/// Columns assumed when the terminal cannot be measured.
pub const FALLBACK_WIDTH: usize = 80;
pub const FALLBACK_HEIGHT: usize = 24;

pub trait TerminalWriter {
    fn clear_screen(&mut self);
    /// Moves the cursor to the top-left corner without clearing.
    fn move_home(&mut self);
    fn write_line(&mut self, line: &str);
    fn set_cursor_visible(&mut self, visible: bool);
    fn flush(&mut self);
    /// Columns and rows, or `None` when not attached to a terminal.
    fn size(&self) -> Option<(usize, usize)>;
}

pub struct MockTerminal {
    pub lines: Vec<String>,
    pub clear_count: usize,
    pub home_count: usize,
    pub flush_count: usize,
    pub cursor_visible: bool,
    pub size: Option<(usize, usize)>,
}

impl Default for MockTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTerminal {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            clear_count: 0,
            home_count: 0,
            flush_count: 0,
            cursor_visible: true,
            size: Some((FALLBACK_WIDTH, FALLBACK_HEIGHT)),
        }
    }
}

impl TerminalWriter for MockTerminal {
    fn clear_screen(&mut self) {
        self.clear_count += 1;
        self.lines.clear();
    }

    fn move_home(&mut self) {
        self.home_count += 1;
        self.lines.clear();
    }

    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    fn flush(&mut self) {
        self.flush_count += 1;
    }

    fn size(&self) -> Option<(usize, usize)> {
        self.size
    }
}

/// Writes to stdout through crossterm. Each line also clears whatever a
/// longer previous frame left to its right.
pub struct CrosstermTerminal {
    stdout: Stdout,
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl TerminalWriter for CrosstermTerminal {
    fn clear_screen(&mut self) {
        let _ = queue!(self.stdout, Clear(ClearType::All), cursor::MoveTo(0, 0));
    }

    fn move_home(&mut self) {
        let _ = queue!(self.stdout, cursor::MoveTo(0, 0));
    }

    fn write_line(&mut self, line: &str) {
        let _ = queue!(
            self.stdout,
            Print(line),
            Clear(ClearType::UntilNewLine),
            Print("\n")
        );
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        let _ = if visible {
            queue!(self.stdout, cursor::Show)
        } else {
            queue!(self.stdout, cursor::Hide)
        };
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn size(&self) -> Option<(usize, usize)> {
        terminal_size::terminal_size()
            .map(|(terminal_size::Width(w), terminal_size::Height(h))| (w as usize, h as usize))
    }
}
