use std::fmt;

use glam::{ivec2, IVec2};
use navni::{prelude::*, X256Color as X};
use util::Rect;

use crate::{Buffer, Window};

/// Height of one menu item box.
const ITEM_HEIGHT: i32 = 3;

/// A menu of vertically stacked text buttons.
#[derive(Clone, Debug)]
pub struct Menu<T> {
    items: Vec<T>,
    selection: Option<usize>,
    /// Last seen mouse cursor position.
    hover: Option<IVec2>,
}

impl<T: Copy + fmt::Display> Menu<T> {
    /// Create a menu with the first item selected.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let items: Vec<T> = items.into_iter().collect();
        let selection = (!items.is_empty()).then_some(0);
        Menu {
            items,
            selection,
            hover: None,
        }
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn selected(&self) -> Option<T> {
        self.selection.map(|i| self.items[i])
    }

    /// Select item at index. Negative indices count from the end. Indices
    /// out of range are ignored.
    pub fn select_item(&mut self, i: isize) {
        let n = self.items.len() as isize;
        let i = if i < 0 { n + i } else { i };
        if (0..n).contains(&i) {
            self.selection = Some(i as usize);
        }
    }

    /// Select the next item, wrapping around from the last to the first.
    pub fn select_next(&mut self) {
        match self.selection {
            Some(i) if i + 1 < self.items.len() => self.select_item(i as isize + 1),
            _ => self.select_item(0),
        }
    }

    /// Select the previous item, wrapping around from the first to the last.
    pub fn select_prev(&mut self) {
        match self.selection {
            Some(i) if i > 0 => self.select_item(i as isize - 1),
            _ => self.select_item(-1),
        }
    }

    pub fn deselect(&mut self) {
        self.selection = None;
    }

    /// Size of the menu when drawn.
    pub fn dim(&self) -> IVec2 {
        let width = self
            .items
            .iter()
            .map(|a| a.to_string().chars().count() as i32)
            .max()
            .unwrap_or(0);
        ivec2(width + 4, self.items.len() as i32 * ITEM_HEIGHT)
    }

    /// Screen rectangle of item `i` when drawn in the window.
    fn item_bounds(&self, win: &Window, i: usize) -> Rect {
        let area = Rect::sized([win.width(), ITEM_HEIGHT])
            + ivec2(0, i as i32 * ITEM_HEIGHT);
        win.sub(area).bounds
    }

    /// Index of item at screen position.
    pub fn hit_test(&self, win: &Window, pos: impl Into<IVec2>) -> Option<usize> {
        let pos = pos.into();
        (0..self.items.len()).find(|&i| self.item_bounds(win, i).contains(pos))
    }

    /// Update selection from mouse. Return the item that was clicked on if
    /// there was one.
    ///
    /// Hover is reported every frame. Only moving the cursor changes the
    /// selection, so a resting cursor leaves keyboard selection alone.
    pub fn mouse(&mut self, win: &Window, mouse: &MouseState) -> Option<T> {
        match *mouse {
            MouseState::Hover(pos) => {
                let pos: IVec2 = pos.into();
                let moved = self.hover.is_some_and(|p| p != pos);
                self.hover = Some(pos);
                if moved {
                    self.deselect();
                    if let Some(i) = self.hit_test(win, pos) {
                        self.selection = Some(i);
                    }
                }
                None
            }
            MouseState::Release(current_pos, pos, MouseButton::Left) => {
                let i = self.hit_test(win, pos)?;
                (self.hit_test(win, current_pos) == Some(i))
                    .then(|| self.items[i])
            }
            _ => None,
        }
    }

    /// Draw the items with a border around the selected one.
    pub fn draw(&self, c: &mut Buffer, win: &Window) {
        win.clear(c);
        for (i, item) in self.items.iter().enumerate() {
            let mut item_win = *win;
            item_win.bounds = self.item_bounds(win, i);
            let inner = if self.selection == Some(i) {
                item_win.foreground_col = X::YELLOW;
                item_win.box_border(c)
            } else {
                item_win.sub(item_win.area().shrink([1, 1], [1, 1]))
            };
            inner.write_center(c, 0, &item.to_string());
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn menu() -> Menu<&'static str> {
        Menu::new(["New", "Load", "Quit"])
    }

    #[test]
    fn selection() {
        let mut m = menu();
        assert_eq!(m.selected(), Some("New"));

        m.select_prev();
        assert_eq!(m.selected(), Some("Quit"));
        m.select_next();
        assert_eq!(m.selected(), Some("New"));
        m.select_next();
        assert_eq!(m.selected(), Some("Load"));

        m.select_item(-1);
        assert_eq!(m.selection(), Some(2));
        m.select_item(-3);
        assert_eq!(m.selection(), Some(0));
        m.select_item(5);
        assert_eq!(m.selection(), Some(0));

        m.deselect();
        assert_eq!(m.selected(), None);
        m.select_next();
        assert_eq!(m.selected(), Some("New"));
        m.deselect();
        m.select_prev();
        assert_eq!(m.selected(), Some("Quit"));

        assert_eq!(Menu::<&str>::new([]).selected(), None);
    }

    #[test]
    fn hits_and_drawing() {
        let m = menu();
        let mut c = Buffer::new(12, 12);
        let win = Window::from(&c).center(m.dim());
        assert_eq!(m.dim(), ivec2(8, 9));
        assert_eq!(win.bounds, Rect::new([2, 1], [10, 10]));

        assert_eq!(m.hit_test(&win, [2, 1]), Some(0));
        assert_eq!(m.hit_test(&win, [9, 4]), Some(1));
        assert_eq!(m.hit_test(&win, [5, 9]), Some(2));
        assert_eq!(m.hit_test(&win, [5, 10]), None);
        assert_eq!(m.hit_test(&win, [1, 2]), None);

        m.draw(&mut c, &win);
        assert_eq!(c.row_text(1), "  ┌──────┐  ");
        assert_eq!(c.row_text(2), "  │  New │  ");
        assert_eq!(c.row_text(5), "    Load    ");
    }

    #[test]
    fn mouse() {
        let mut m = menu();
        let c = Buffer::new(12, 12);
        let win = Window::from(&c).center(m.dim());
        let hover = |p: IVec2| MouseState::Hover(p.into());

        // Cursor resting off the menu doesn't undo keyboard selection.
        assert_eq!(m.mouse(&win, &hover(ivec2(0, 11))), None);
        m.select_next();
        assert_eq!(m.mouse(&win, &hover(ivec2(0, 11))), None);
        assert_eq!(m.selected(), Some("Load"));

        // Moving onto an item selects it, moving off deselects.
        m.mouse(&win, &hover(ivec2(5, 8)));
        assert_eq!(m.selected(), Some("Quit"));
        m.mouse(&win, &hover(ivec2(0, 0)));
        assert_eq!(m.selected(), None);

        // Click needs both press and release on the same item.
        let release = |now: IVec2, start: IVec2| {
            MouseState::Release(now.into(), start.into(), MouseButton::Left)
        };
        assert_eq!(m.mouse(&win, &release(ivec2(5, 2), ivec2(5, 3))), Some("New"));
        assert_eq!(m.mouse(&win, &release(ivec2(5, 5), ivec2(5, 2))), None);
        assert_eq!(m.mouse(&win, &release(ivec2(0, 0), ivec2(0, 0))), None);
    }
}
