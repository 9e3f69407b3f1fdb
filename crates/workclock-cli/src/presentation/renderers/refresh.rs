use super::backend::{FALLBACK_HEIGHT, FALLBACK_WIDTH, TerminalWriter};
use crate::presentation::views;
use anyhow::Result;
use chrono::NaiveDateTime;
use std::thread;
use std::time::Duration;
use workclock_core::{Clock, ColorMode, Config, color};

pub const REFRESH_INTERVAL: Duration = Duration::from_millis(500);

/// Redraws the dashboard in place.
///
/// The screen is cleared only when the terminal is resized or the minute
/// rolls over; every other frame overwrites the previous one from the
/// top-left corner.
pub struct Dashboard<'a, C: Clock> {
    config: &'a Config,
    clock: C,
    mode: ColorMode,
    terminal: Box<dyn TerminalWriter>,
    last_size: Option<(usize, usize)>,
    last_minute: Option<i64>,
    cursor_hidden: bool,
}

impl<'a, C: Clock> Dashboard<'a, C> {
    pub fn new(
        config: &'a Config,
        clock: C,
        mode: ColorMode,
        terminal: Box<dyn TerminalWriter>,
    ) -> Self {
        Self {
            config,
            clock,
            mode,
            terminal,
            last_size: None,
            last_minute: None,
            cursor_hidden: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.terminal.set_cursor_visible(false);
        self.cursor_hidden = true;
        loop {
            self.draw()?;
            thread::sleep(REFRESH_INTERVAL);
        }
    }

    /// Draws the frame for the clock's current time.
    pub fn draw(&mut self) -> Result<()> {
        let now = self.clock.now();
        self.draw_at(now)
    }

    pub fn draw_at(&mut self, now: NaiveDateTime) -> Result<()> {
        let size = self.size();
        let minute = now.and_utc().timestamp().div_euclid(60);

        if self.last_size != Some(size) || self.last_minute != Some(minute) {
            log::trace!("clearing screen at {} for {:?}", now, size);
            self.terminal.clear_screen();
            self.last_size = Some(size);
            self.last_minute = Some(minute);
        } else {
            self.terminal.move_home();
        }

        self.write_frame(now, size.0)
    }

    /// Writes one frame where the cursor is, without clearing.
    pub fn draw_once(&mut self) -> Result<()> {
        let now = self.clock.now();
        let (width, _) = self.size();
        self.write_frame(now, width)
    }

    fn write_frame(&mut self, now: NaiveDateTime, width: usize) -> Result<()> {
        for line in views::dashboard(self.config, now, width)? {
            let rendered = color::render(&line, self.mode)?;
            self.terminal.write_line(&rendered);
        }
        self.terminal.flush();
        Ok(())
    }

    fn size(&self) -> (usize, usize) {
        self.terminal
            .size()
            .unwrap_or((FALLBACK_WIDTH, FALLBACK_HEIGHT))
    }
}

impl<C: Clock> Drop for Dashboard<'_, C> {
    fn drop(&mut self) {
        if self.cursor_hidden {
            self.terminal.set_cursor_visible(true);
            self.terminal.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::renderers::backend::MockTerminal;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;
    use workclock_core::FixedClock;

    fn wednesday(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    /// Forwards to a mock that the test keeps a handle on.
    struct SharedTerminal(Rc<RefCell<MockTerminal>>);

    impl TerminalWriter for SharedTerminal {
        fn clear_screen(&mut self) {
            self.0.borrow_mut().clear_screen();
        }

        fn move_home(&mut self) {
            self.0.borrow_mut().move_home();
        }

        fn write_line(&mut self, line: &str) {
            self.0.borrow_mut().write_line(line);
        }

        fn set_cursor_visible(&mut self, visible: bool) {
            self.0.borrow_mut().set_cursor_visible(visible);
        }

        fn flush(&mut self) {
            self.0.borrow_mut().flush();
        }

        fn size(&self) -> Option<(usize, usize)> {
            self.0.borrow().size()
        }
    }

    fn dashboard(
        config: &Config,
        mode: ColorMode,
    ) -> (Dashboard<'_, FixedClock>, Rc<RefCell<MockTerminal>>) {
        let mock = Rc::new(RefCell::new(MockTerminal::new()));
        let terminal = Box::new(SharedTerminal(Rc::clone(&mock)));
        let clock = FixedClock(wednesday(10, 0, 0));
        (Dashboard::new(config, clock, mode, terminal), mock)
    }

    #[test]
    fn test_clears_only_on_minute_or_size_change() {
        let config = Config::default();
        let (mut dashboard, mock) = dashboard(&config, ColorMode::Plain);

        dashboard.draw_at(wednesday(10, 0, 0)).unwrap();
        dashboard.draw_at(wednesday(10, 0, 30)).unwrap();
        assert_eq!(mock.borrow().clear_count, 1);
        assert_eq!(mock.borrow().home_count, 1);

        dashboard.draw_at(wednesday(10, 1, 0)).unwrap();
        assert_eq!(mock.borrow().clear_count, 2);

        mock.borrow_mut().size = Some((100, 40));
        dashboard.draw_at(wednesday(10, 1, 10)).unwrap();
        assert_eq!(mock.borrow().clear_count, 3);
        assert_eq!(mock.borrow().flush_count, 4);
    }

    #[test]
    fn test_plain_frame_has_no_markers_or_escapes() {
        let config = Config::default();
        let (mut dashboard, mock) = dashboard(&config, ColorMode::Plain);
        dashboard.draw().unwrap();

        let lines = mock.borrow().lines.clone();
        assert!(lines.iter().any(|line| line.starts_with("Current Time")));
        assert!(
            lines
                .iter()
                .all(|line| !line.contains(color::CONTROL) && !line.contains('\x1b'))
        );
    }

    #[test]
    fn test_ansi_frame_has_escapes() {
        let config = Config::default();
        let (mut dashboard, mock) = dashboard(&config, ColorMode::Ansi);
        dashboard.draw().unwrap();

        assert!(mock.borrow().lines.iter().any(|line| line.contains('\x1b')));
    }

    #[test]
    fn test_unsized_terminal_falls_back_to_default_width() {
        let config = Config::default();
        let (mut dashboard, mock) = dashboard(&config, ColorMode::Plain);
        mock.borrow_mut().size = None;
        dashboard.draw_once().unwrap();

        let lines = mock.borrow().lines.clone();
        // 08:00 row of an 80-column frame: 3 + 5 * 15
        assert_eq!(lines[1].chars().count(), 78);
        assert_eq!(mock.borrow().clear_count, 0);
    }

    #[test]
    fn test_drop_restores_hidden_cursor() {
        let config = Config::default();
        let (mut dashboard, mock) = dashboard(&config, ColorMode::Plain);
        dashboard.terminal.set_cursor_visible(false);
        dashboard.cursor_hidden = true;
        drop(dashboard);
        assert!(mock.borrow().cursor_visible);
    }

    #[test]
    fn test_single_frame_leaves_cursor_alone() {
        let config = Config::default();
        let (mut dashboard, mock) = dashboard(&config, ColorMode::Plain);
        dashboard.draw_once().unwrap();
        let flushes = mock.borrow().flush_count;
        drop(dashboard);
        assert_eq!(mock.borrow().flush_count, flushes);
    }
}
