use std::path::PathBuf;

use clap::Parser;
use navni::prelude::*;
use ui::{Game, InputMap, Settings};
use util::KeyboardLayout;

mod scenario;
mod screen;

pub const GAME_NAME: &str = "crystals";

#[derive(Parser, Debug)]
struct Args {
    /// Where the game is saved and loaded from.
    #[arg(long, default_value = "crystals.sav")]
    save_file: PathBuf,

    /// Continue the saved game instead of starting at the title screen.
    #[arg(long)]
    load: bool,

    /// Keyboard layout for the movement keys, detected if not given.
    #[arg(long)]
    layout: Option<KeyboardLayout>,

    /// IDM file with key bindings written for a qwerty keyboard.
    #[arg(long)]
    keymap: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    util::panic_handler();
    navni::logger::start(GAME_NAME);

    let args = Args::parse();

    let layout = args.layout.unwrap_or_else(KeyboardLayout::system_layout);
    log::info!("keyboard layout: {layout}");

    let input_map = match &args.keymap {
        Some(path) => InputMap::load(path, layout)?,
        None => InputMap::for_layout(layout),
    };

    let game = Game::new(
        Settings {
            save_path: args.save_file,
            input_map,
            load: args.load,
        },
        scenario::build,
    );

    run(
        &Config {
            application_name: GAME_NAME.to_string(),
            system_color_palette: Some(ui::LIGHT_PALETTE),
            ..Default::default()
        },
        (game, screen::run),
    );

    Ok(())
}
