use std::path::PathBuf;

use anyhow::Result;
use engine::{prelude::*, savefile, INFOBOX_HEIGHT};
use navni::{prelude::*, X256Color as X};
use strum::{Display, EnumIter, IntoEnumIterator};
use util::StrExt;

use crate::{
    anim::Slide, info_panel, map_display, Buffer, InputAction, InputMap, Menu,
    Window,
};

const WIDTH: u32 = 80;
const HEIGHT: u32 = 30;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Display, EnumIter)]
pub enum TitleItem {
    #[strum(to_string = "New game")]
    NewGame,
    #[strum(to_string = "Load game")]
    LoadGame,
    Quit,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Display, EnumIter)]
pub enum PauseItem {
    Resume,
    Party,
    Save,
    Quit,
}

/// Startup configuration.
#[derive(Clone)]
pub struct Settings {
    pub save_path: PathBuf,
    pub input_map: InputMap,
    /// Start from the save file instead of the title screen.
    pub load: bool,
}

pub enum Mode {
    Title(Menu<TitleItem>),
    Explore,
    Paused(Menu<PauseItem>),
    Party,
    GameOver,
}

impl Mode {
    fn title() -> Self {
        Mode::Title(Menu::new(TitleItem::iter()))
    }

    fn paused() -> Self {
        Mode::Paused(Menu::new(PauseItem::iter()))
    }
}

/// A menu choice made with the mouse while drawing.
enum Choice {
    Title(TitleItem),
    Pause(PauseItem),
}

/// Toplevel context object for game state.
pub struct Game {
    /// Logic level data.
    pub world: World,
    /// Display buffer.
    pub s: Buffer,
    mode: Mode,
    tick: u64,
    slide: Option<Slide>,
    input_map: InputMap,
    save_path: PathBuf,
    new_world: fn() -> Result<World>,
    /// Message line on the title screen.
    notice: String,
    quit: bool,
}

impl Game {
    /// Create the game at the title screen, or straight in the saved game
    /// if settings say so and the save loads.
    pub fn new(settings: Settings, new_world: fn() -> Result<World>) -> Self {
        let mut ret = Game {
            world: Default::default(),
            s: Buffer::new(WIDTH, HEIGHT),
            mode: Mode::title(),
            tick: 0,
            slide: None,
            input_map: settings.input_map,
            save_path: settings.save_path,
            new_world,
            notice: Default::default(),
            quit: false,
        };

        if settings.load {
            ret.choose_title(TitleItem::LoadGame);
        }
        ret
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn notice(&self) -> &str {
        &self.notice
    }

    /// The player has asked to leave the program.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Translate a keypress using the input map.
    pub fn key_action(&self, key: KeyTyped) -> Option<InputAction> {
        self.input_map.get(&key).copied()
    }

    /// Run one main loop iteration worth of logic.
    pub fn update(&mut self, input: Option<InputAction>, n_updates: u32) {
        self.tick += n_updates as u64;
        if let Some(slide) = &mut self.slide {
            if !slide.update(n_updates.max(1)) {
                self.slide = None;
            }
        }

        if matches!(self.mode, Mode::Explore) && self.world.is_over() {
            log::info!("game over: {:?}", self.world.status());
            self.slide = None;
            self.mode = Mode::GameOver;
        }

        if let Some(act) = input {
            self.handle(act);
        }
    }

    /// Respond to player input in the current mode.
    pub fn handle(&mut self, act: InputAction) {
        use InputAction::*;

        if act == QuitGame {
            self.quit = true;
            return;
        }

        match &mut self.mode {
            Mode::Title(menu) => match act {
                North => menu.select_prev(),
                South => menu.select_next(),
                Confirm | Interact => {
                    if let Some(item) = menu.selected() {
                        self.choose_title(item);
                    }
                }
                Cancel => self.quit = true,
                _ => {}
            },
            Mode::Explore => match act {
                Cancel => self.mode = Mode::paused(),
                Party => self.mode = Mode::Party,
                Quicksave => self.save(),
                Quickload => self.load(),
                _ => {
                    if let Ok(cmd) = Command::try_from(act) {
                        self.command(cmd);
                    }
                }
            },
            Mode::Paused(menu) => match act {
                North => menu.select_prev(),
                South => menu.select_next(),
                Confirm | Interact => {
                    if let Some(item) = menu.selected() {
                        self.choose_pause(item);
                    }
                }
                Cancel => self.mode = Mode::Explore,
                _ => {}
            },
            Mode::Party => {
                if matches!(act, Cancel | Confirm | Interact | Party) {
                    self.mode = Mode::Explore;
                }
            }
            Mode::GameOver => {
                if matches!(act, Cancel | Confirm | Interact) {
                    self.notice = match self.world.status() {
                        ScenarioStatus::Won(msg) | ScenarioStatus::Lost(msg) => {
                            msg.clone()
                        }
                        ScenarioStatus::Ongoing => String::new(),
                    };
                    self.mode = Mode::title();
                }
            }
        }
    }

    /// Pass a command to the world and start a slide if the player took a
    /// step.
    fn command(&mut self, cmd: Command) {
        let player = self.world.player();
        let before = player.and_then(|p| self.world.loc(p)).cloned();

        if !self.world.command(cmd) {
            return;
        }

        let (Some(p), Some(before)) = (player, before) else {
            return;
        };
        if let Some(after) = self.world.loc(p) {
            if after.room == before.room
                && (after.xy() - before.xy()).is_adjacent()
            {
                self.slide = Some(Slide::new(p, before.xy(), after.xy()));
            }
        }
    }

    fn start(&mut self, world: World) {
        self.world = world;
        self.slide = None;
        self.notice.clear();
        self.mode = Mode::Explore;
    }

    fn choose_title(&mut self, item: TitleItem) {
        match item {
            TitleItem::NewGame => match (self.new_world)() {
                Ok(world) => {
                    log::info!("starting new game");
                    self.start(world);
                }
                Err(e) => {
                    log::warn!("failed to create world: {e:#}");
                    self.notice = format!("Can't start game: {e}");
                }
            },
            TitleItem::LoadGame => match savefile::load(&self.save_path) {
                Ok(world) => self.start(world),
                Err(e) => {
                    log::warn!("{e:#}");
                    self.notice = format!("Can't load game: {e}");
                }
            },
            TitleItem::Quit => self.quit = true,
        }
    }

    fn choose_pause(&mut self, item: PauseItem) {
        match item {
            PauseItem::Resume => self.mode = Mode::Explore,
            PauseItem::Party => self.mode = Mode::Party,
            PauseItem::Save => {
                self.save();
                self.mode = Mode::Explore;
            }
            PauseItem::Quit => {
                self.notice.clear();
                self.mode = Mode::title();
            }
        }
    }

    fn save(&mut self) {
        match savefile::save(&self.world, &self.save_path) {
            Ok(()) => self.world.infobox_mut().write("Game saved."),
            Err(e) => {
                log::warn!("{e:#}");
                self.world
                    .infobox_mut()
                    .write(&format!("Save failed: {e}"));
            }
        }
    }

    fn load(&mut self) {
        match savefile::load(&self.save_path) {
            Ok(world) => {
                self.start(world);
                self.world.infobox_mut().write("Game loaded.");
            }
            Err(e) => {
                log::warn!("{e:#}");
                self.world
                    .infobox_mut()
                    .write(&format!("Load failed: {e}"));
            }
        }
    }
}

// Display.
impl Game {
    /// Render the current mode into the screen buffer.
    ///
    /// Menus respond to the mouse here, since hit areas are only known once
    /// things are laid out.
    pub fn draw(&mut self, mouse: Option<&MouseState>) {
        let win = Window::from(&self.s);
        win.clear(&mut self.s);

        if matches!(self.mode, Mode::Title(_)) {
            self.draw_title(&win, mouse);
            return;
        }

        let (status, main) = win.split_bottom(1);
        let (info, map) = main.split_bottom(INFOBOX_HEIGHT as i32 + 2);
        self.draw_explore(&status, &info, &map);

        let choice = match &mut self.mode {
            Mode::Paused(menu) => {
                let menu_win = map.center(menu.dim());
                let mut frame = menu_win.grow();
                frame.foreground_col = X::BROWN;
                frame.box_border(&mut self.s);
                menu_win.box_caption(&mut self.s, "Paused");
                let ret = mouse.and_then(|m| menu.mouse(&menu_win, m));
                menu.draw(&mut self.s, &menu_win);
                ret.map(Choice::Pause)
            }
            Mode::Party => {
                let panel = self.panel(&map, [40, 16], "Party");
                info_panel::draw_party(&mut self.s, &panel, &self.world);
                None
            }
            Mode::GameOver => {
                let (title, msg) = match self.world.status() {
                    ScenarioStatus::Won(msg) => ("Victory", msg.as_str()),
                    ScenarioStatus::Lost(msg) => ("Defeat", msg.as_str()),
                    ScenarioStatus::Ongoing => ("", ""),
                };
                let (title, msg) = (title.to_owned(), msg.to_owned());
                let panel = self.panel(&map, [40, 6], &title);
                let mut cur = crate::Cursor::new(&mut self.s, panel);
                cur.print_wrapped(&msg);
                panel.write_center(&mut self.s, 3, "press enter");
                None
            }
            _ => None,
        };

        if let Some(choice) = choice {
            self.choose(choice);
        }
    }

    /// Read input, update and draw to the backend.
    pub fn frame(&mut self, b: &mut dyn Backend, n_updates: u32) {
        let input = self.key_action(navni::keypress());
        let mouse = navni::mouse_state();
        self.update(input, n_updates);
        self.draw(Some(&mouse));
        self.blit(b);
    }

    /// Show the screen buffer on the backend.
    pub fn blit(&self, b: &mut dyn Backend) {
        b.draw_chars(
            self.s.width() as _,
            self.s.height() as _,
            self.s.as_ref(),
        );
    }

    fn choose(&mut self, choice: Choice) {
        match choice {
            Choice::Title(item) => self.choose_title(item),
            Choice::Pause(item) => self.choose_pause(item),
        }
    }

    fn draw_title(&mut self, win: &Window, mouse: Option<&MouseState>) {
        let Mode::Title(menu) = &mut self.mode else {
            return;
        };

        let mut logo = *win;
        logo.foreground_col = X::YELLOW;
        logo.write_center(&mut self.s, 3, "C R Y S T A L S");
        win.write_center(&mut self.s, 5, &self.notice);

        let mut menu_win = win.center(menu.dim());
        menu_win.bounds = menu_win.bounds + ivec2(0, 3);
        let choice = mouse.and_then(|m| menu.mouse(&menu_win, m));
        menu.draw(&mut self.s, &menu_win);

        if let Some(item) = choice {
            self.choose_title(item);
        }
    }

    fn draw_explore(&mut self, status: &Window, info: &Window, map: &Window) {
        let mut frame = *map;
        frame.foreground_col = X::BROWN;
        let inner = frame.box_border(&mut self.s);
        if let Some(room) = self.world.focus() {
            inner.box_caption(&mut self.s, &room.name().capitalize());
        }
        map_display::draw_map(
            &mut self.s,
            &inner,
            &self.world,
            self.tick,
            self.slide.as_ref(),
        );

        let mut frame = *info;
        frame.foreground_col = X::BROWN;
        let inner = frame.box_border(&mut self.s);
        info_panel::draw_infobox(&mut self.s, &inner, self.world.infobox());

        status.write(&mut self.s, [1, 0], &info_panel::status_line(&self.world));
    }

    /// Draw a captioned box in the middle of `win`, return its inside.
    fn panel(&mut self, win: &Window, dim: [i32; 2], caption: &str) -> Window {
        let inner = win.center(dim);
        let mut frame = inner.grow();
        frame.foreground_col = X::BROWN;
        frame.box_border(&mut self.s);
        inner.box_caption(&mut self.s, caption);
        inner
    }
}
