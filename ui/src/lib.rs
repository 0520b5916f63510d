//! Game user interface machinery

pub mod anim;

mod buffer;
pub use buffer::Buffer;

mod cursor;
pub use cursor::Cursor;

mod game;
pub use game::{Game, Mode, PauseItem, Settings, TitleItem};

mod info_panel;

mod input;
pub use input::{InputAction, InputMap};

mod map_display;

mod menu;
pub use menu::Menu;

mod window;
pub use window::Window;

pub const LIGHT_PALETTE: [navni::Rgba; 16] = {
    use navni::Rgba;
    [
        Rgba::new(0xaa, 0xaa, 0xaa, 0xff), // white
        Rgba::new(0x66, 0x00, 0x00, 0xff), // maroon
        Rgba::new(0x00, 0x66, 0x00, 0xff), // green
        Rgba::new(0x66, 0x33, 0x00, 0xff), // brown
        Rgba::new(0x00, 0x00, 0x88, 0xff), // navy
        Rgba::new(0x66, 0x00, 0x66, 0xff), // purple
        Rgba::new(0x00, 0x66, 0x66, 0xff), // teal
        Rgba::new(0x33, 0x33, 0x33, 0xff), // gray
        Rgba::new(0x77, 0x77, 0x77, 0xff), // silver
        Rgba::new(0xaa, 0x00, 0x00, 0xff), // red
        Rgba::new(0x00, 0xaa, 0x00, 0xff), // lime
        Rgba::new(0xaa, 0x55, 0x00, 0xff), // yellow
        Rgba::new(0x22, 0x22, 0xee, 0xff), // blue
        Rgba::new(0xaa, 0x00, 0xaa, 0xff), // fuchsia
        Rgba::new(0x00, 0x99, 0x99, 0xff), // aqua
        Rgba::new(0x00, 0x00, 0x00, 0xff), // black
    ]
};
