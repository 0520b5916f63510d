use std::fmt::Write;

use engine::prelude::*;
use navni::X256Color as X;
use util::StrExt;

use crate::{Buffer, Cursor, Window};

pub const SCROLL_PROMPT: &str = "-- press space to scroll --";

/// Draw the current page of the message box.
pub fn draw_infobox(c: &mut Buffer, win: &Window, infobox: &InfoBox) {
    win.clear(c);
    let page = infobox.page();
    for (y, line) in page.lines.iter().enumerate() {
        win.write(c, [0, y as i32], line);
    }
    if page.more {
        let mut prompt = *win;
        prompt.foreground_col = X::YELLOW;
        prompt.write_center(c, page.lines.len() as i32, SCROLL_PROMPT);
    }
}

/// List party members and their descriptions.
pub fn draw_party(c: &mut Buffer, win: &Window, w: &World) {
    win.clear(c);
    let mut cur = Cursor::new(c, *win);
    for &e in w.party() {
        if cur.is_full() {
            break;
        }
        let _ = writeln!(cur, "{}", e.name(w).capitalize());
        if let Some(desc) = w.body(e).map(|b| b.description.as_str()) {
            if !desc.is_empty() {
                cur.print_wrapped(desc);
            }
        }
        cur.newline();
    }
}

/// One-line summary of where the player is.
pub fn status_line(w: &World) -> String {
    let room = w.focus().map_or("nowhere", |r| r.name());
    let mut ret = room.capitalize();
    match w.party().len() {
        0 | 1 => {}
        n => {
            let _ = write!(ret, ", party of {n}");
        }
    }
    ret
}
