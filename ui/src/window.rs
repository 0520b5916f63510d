use glam::IVec2;
use navni::{prelude::*, X256Color as X};
use util::Rect;

use crate::Buffer;

/// A view structure through which things can be drawn on a buffer.
#[derive(Copy, Clone, Default)]
pub struct Window {
    /// The window's bounds in the coordinates of the screen buffer.
    pub bounds: Rect,
    pub foreground_col: X256Color,
    pub background_col: X256Color,
}

impl From<&Buffer> for Window {
    fn from(c: &Buffer) -> Self {
        Window::new(c.area(), X::FOREGROUND, X::BACKGROUND)
    }
}

impl Window {
    pub fn new(
        region: Rect,
        foreground_col: X256Color,
        background_col: X256Color,
    ) -> Window {
        Window {
            bounds: region,
            foreground_col,
            background_col,
        }
    }

    /// Area rectangle of the window in window-local coordinates, anchored to
    /// origin.
    pub fn area(&self) -> Rect {
        Rect::sized(self.bounds.dim())
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    pub fn dim(&self) -> IVec2 {
        self.bounds.dim()
    }

    /// Return whether window contains a point in absolute screen coordinates.
    pub fn contains(&self, pos: impl Into<IVec2>) -> bool {
        self.bounds.contains(pos)
    }

    pub fn fill(&self, c: &mut Buffer, cell: CharCell) {
        for p in self.area() {
            self.put(c, p, cell);
        }
    }

    pub fn clear(&self, c: &mut Buffer) {
        self.fill(
            c,
            CharCell::new('\0', self.foreground_col, self.background_col),
        );
    }

    /// Put method that can go outside the window's borders.
    fn unbound_put(&self, c: &mut Buffer, pos: IVec2, cell: CharCell) {
        if let Some(a) = c.get_mut(pos + self.bounds.min()) {
            *a = cell;
        }
    }

    pub fn put(&self, c: &mut Buffer, pos: impl Into<IVec2>, cell: CharCell) {
        let pos = pos.into();
        if self.area().contains(pos) {
            self.unbound_put(c, pos, cell);
        }
    }

    pub fn putc(&self, c: &mut Buffer, pos: impl Into<IVec2>, ch: char) {
        self.put(
            c,
            pos,
            CharCell::new(ch, self.foreground_col, self.background_col),
        );
    }

    pub fn get(&self, c: &Buffer, pos: impl Into<IVec2>) -> CharCell {
        c.get(pos.into() + self.bounds.min()).unwrap_or_default()
    }

    pub fn split_left(&self, width: i32) -> (Self, Self) {
        let [a, b] = self.area().split([width, 0]);
        (self.sub(a), self.sub(b))
    }

    pub fn split_bottom(&self, height: i32) -> (Self, Self) {
        let [a, b] = self.area().split([0, -height]);
        (self.sub(b), self.sub(a))
    }

    pub fn center(&self, dim: impl Into<IVec2>) -> Self {
        let dim = dim.into();
        let offset = (self.bounds.dim() - dim) / 2;
        self.sub(Rect::sized(dim) + offset)
    }

    /// Draw a box on the outer rim of the window and return a new window for
    /// the area inside the border.
    pub fn box_border(&self, c: &mut Buffer) -> Self {
        let area = self.area();
        let (w, h) = (area.width(), area.height());
        for x in 1..w - 1 {
            self.putc(c, [x, 0], '─');
            self.putc(c, [x, h - 1], '─');
        }

        for y in 1..h - 1 {
            self.putc(c, [0, y], '│');
            self.putc(c, [w - 1, y], '│');
        }

        self.putc(c, [0, 0], '┌');
        self.putc(c, [w - 1, 0], '┐');
        self.putc(c, [0, h - 1], '└');
        self.putc(c, [w - 1, h - 1], '┘');

        let ret = self.sub(area.shrink([1, 1], [1, 1]));
        ret.clear(c);
        ret
    }

    /// Write a caption on the top border line of a window made with
    /// `box_border`.
    pub fn box_caption(&self, c: &mut Buffer, title: &str) {
        let caption_area =
            self.unbound_sub(Rect::new([1, -1], [self.width() - 1, 0]));
        caption_area.write(c, [0, 0], &format!(" {title} "));
    }

    /// Create a sub-window from the area within this window's space.
    pub fn sub(&self, area: Rect) -> Self {
        let area = area + self.bounds.min();
        let area = self.bounds.intersection(&area);

        let mut ret = *self;
        ret.bounds = area;
        ret
    }

    pub fn grow(&self) -> Self {
        let mut ret = *self;
        ret.bounds = ret.bounds.grow([1, 1], [1, 1]);
        ret
    }

    pub fn unbound_sub(&self, area: Rect) -> Self {
        let mut ret = *self;
        ret.bounds = area + self.bounds.min();
        ret
    }

    /// Write text to window, return updated position.
    pub fn write(
        &self,
        c: &mut Buffer,
        pos: impl Into<IVec2>,
        text: &str,
    ) -> IVec2 {
        let mut pos = pos.into();
        for a in text.chars() {
            self.putc(c, pos, a);
            pos.x += 1;
        }

        pos
    }

    pub fn write_center(&self, c: &mut Buffer, y: i32, text: &str) {
        let width = text.chars().count() as i32;
        let x = self.width() / 2 - width / 2;
        self.write(c, [x, y], text);
    }
}
