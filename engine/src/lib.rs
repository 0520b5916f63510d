//! Game logic layer machinery.

/// How many update frames each frame of an animated sprite stays up.
pub const FRAME_PERIOD: u64 = 15;

/// Default width of the infobox text area in characters.
pub const INFOBOX_WIDTH: usize = 74;

/// Default height of the infobox text area in lines.
pub const INFOBOX_HEIGHT: usize = 5;

/// How many lines of message history the infobox remembers.
pub const HISTORY_LIMIT: usize = 200;

/// Separator between speaker name and speech in dialogue lines.
pub const TALK_SEPARATOR: &str = ": ";

mod action;
pub use action::Action;

mod command;
pub use command::Command;

mod entity;
pub use entity::{Body, Entity, Sprite};

mod infobox;
pub use infobox::{InfoBox, Page};

mod location;
pub use location::Location;

mod plot;
pub use plot::{Plot, Trigger};

pub mod prelude;

mod room;
pub use room::Room;

pub mod savefile;

mod world;
pub use world::{Legend, World};

/// Whether the game is still going or has ended.
#[derive(
    Clone, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioStatus {
    #[default]
    Ongoing,
    Won(String),
    Lost(String),
}

impl ScenarioStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, ScenarioStatus::Ongoing)
    }
}
