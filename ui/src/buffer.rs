use glam::{ivec2, IVec2};
use navni::CharCell;
use util::Rect;

/// Text cell screen buffer.
#[derive(Clone)]
pub struct Buffer {
    width: u32,
    height: u32,
    data: Vec<CharCell>,
}

impl AsRef<[CharCell]> for Buffer {
    fn as_ref(&self) -> &[CharCell] {
        &self.data
    }
}

impl Buffer {
    pub fn new(width: u32, height: u32) -> Self {
        Buffer {
            width,
            height,
            data: vec![Default::default(); (width * height) as usize],
        }
    }

    pub fn dim(&self) -> IVec2 {
        ivec2(self.width as i32, self.height as i32)
    }

    pub fn width(&self) -> i32 {
        self.width as i32
    }

    pub fn height(&self) -> i32 {
        self.height as i32
    }

    pub fn area(&self) -> Rect {
        Rect::sized(self.dim())
    }

    pub fn get(&self, pos: impl Into<IVec2>) -> Option<CharCell> {
        let pos = pos.into();
        let area = self.area();
        area.contains(pos).then(|| self.data[area.idx(pos)])
    }

    pub fn get_mut(&mut self, pos: impl Into<IVec2>) -> Option<&mut CharCell> {
        let pos = pos.into();
        let area = self.area();
        if area.contains(pos) {
            Some(&mut self.data[area.idx(pos)])
        } else {
            None
        }
    }

    /// Characters on a row of the buffer, blanks as spaces.
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width())
            .map(|x| {
                self.get([x, y])
                    .and_then(|cell| char::from_u32(cell.c as u32))
                    .filter(|&c| c != '\0')
                    .unwrap_or(' ')
            })
            .collect()
    }

    /// Whole buffer as text, one line per row.
    pub fn text(&self) -> String {
        (0..self.height())
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
