use engine::prelude::*;
use navni::{prelude::*, X256Color as X};
use util::Rect;

use crate::{anim::Slide, Buffer, Window};

/// Map cells are drawn two characters wide so the map looks square.
pub const CELL_SIZE: IVec2 = IVec2::from_array([2, 1]);

fn entity_cell(w: &World, e: Entity, tick: u64) -> CharCell {
    let col = if e.is_player(w) {
        X::YELLOW
    } else if e.is_walkable(w) {
        X::GRAY
    } else if w.body(e).is_some_and(|b| b.action.is_none()) {
        X::BROWN
    } else {
        X::FOREGROUND
    };
    CharCell::c(e.glyph(w, tick)).col(col)
}

/// Draw the room the player is in, scrolled to keep the player in view.
pub fn draw_map(
    c: &mut Buffer,
    win: &Window,
    w: &World,
    tick: u64,
    slide: Option<&Slide>,
) {
    win.clear(c);
    let Some(room) = w.focus() else {
        return;
    };

    let focus = w
        .player()
        .and_then(|p| w.loc(p))
        .filter(|loc| loc.room == room.name())
        .map_or(room.size() / 2, |loc| loc.xy());
    let map_rect = Rect::sized(room.size() * CELL_SIZE);
    let offset = util::scroll_offset(&win.area(), focus * CELL_SIZE, &map_rect);

    let sliding = slide.map(|s| s.entity);
    for (e, pos) in room.iter() {
        if Some(e) == sliding {
            continue;
        }
        let draw_pos = pos.truncate() * CELL_SIZE - offset;
        win.put(c, draw_pos, entity_cell(w, e, tick));
    }

    // Moving entity goes on top of everything else.
    if let Some(s) = slide {
        if let Some(loc) = w.loc(s.entity).filter(|l| l.room == room.name()) {
            let draw_pos = loc.xy() * CELL_SIZE - offset + s.offset();
            win.put(c, draw_pos, entity_cell(w, s.entity, tick));
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn world() -> World {
        let legend = Legend::from_iter([
            ('#', vec![Body::new("wall", '#')]),
            (
                '@',
                vec![
                    Body::new("floor", '.').walkable(),
                    Body::new("hero", '@').unique("player"),
                ],
            ),
        ]);
        let mut w = World::default();
        w.add_ascii_room(
            "cell",
            "
            ###
            #@#",
            &legend,
        )
        .unwrap();
        let player = w.unique("player").unwrap();
        w.set_player(player).unwrap();
        w
    }

    #[test]
    fn drawing() {
        let w = world();
        let mut c = Buffer::new(10, 4);
        let win = Window::from(&c);

        draw_map(&mut c, &win, &w, 0, None);
        assert_eq!(
            c.text(),
            "          \n  # # #   \n  # @ #   \n          "
        );

        // Player slides in from the left.
        let player = w.player().unwrap();
        let slide = Slide::new(player, ivec2(0, 1), ivec2(1, 1));
        draw_map(&mut c, &win, &w, 0, Some(&slide));
        assert_eq!(c.row_text(2), "  @ . #   ");
    }
}
