use std::fmt;

use glam::IVec2;
use util::StrExt;

use crate::{Buffer, Window};

/// Text output position in a window.
pub struct Cursor<'a> {
    c: &'a mut Buffer,
    win: Window,
    pub pos: IVec2,
}

impl<'a> Cursor<'a> {
    pub fn new(c: &'a mut Buffer, win: Window) -> Self {
        Cursor {
            c,
            win,
            pos: Default::default(),
        }
    }

    /// Print text word-wrapped to the window width, starting from a new
    /// line if the cursor isn't at the start of one.
    pub fn print_wrapped(&mut self, text: &str) {
        if self.pos.x > 0 {
            self.newline();
        }
        let width = self.win.width().max(1) as usize;
        for line in text.lines_of(width) {
            self.win.write(self.c, self.pos, line);
            self.newline();
        }
    }

    pub fn newline(&mut self) {
        self.pos.y += 1;
        self.pos.x = 0;
    }

    /// Cursor has moved past the bottom of the window.
    pub fn is_full(&self) -> bool {
        self.pos.y >= self.win.height()
    }
}

impl fmt::Write for Cursor<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for (i, line) in s.lines().enumerate() {
            // Newlines
            if i > 0 {
                self.newline();
            }
            self.pos = self.win.write(self.c, self.pos, line);
        }
        // .lines() doesn't catch the final newline.
        if s.ends_with('\n') {
            self.newline();
        }
        Ok(())
    }
}
