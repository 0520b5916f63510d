//! Game entities and their data.
use std::{fmt, str::FromStr};

use glam::{ivec2, IVec2};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use util::VecExt;

use crate::{Action, Location, World, FRAME_PERIOD};

/// Game entity identifier datatype. All the actual contents live in the
/// world's body table.
#[derive(
    Copy,
    Clone,
    Hash,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Debug,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct Entity(pub(crate) u32);

impl Entity {
    pub fn name<'a>(&self, w: &'a World) -> &'a str {
        w.body(*self).map_or("", |b| b.name.as_str())
    }

    pub fn loc<'a>(&self, w: &'a World) -> Option<&'a Location> {
        w.loc(*self)
    }

    pub fn facing(&self, w: &World) -> IVec2 {
        w.body(*self).map_or(Body::DEFAULT_FACING, |b| b.facing)
    }

    pub fn is_player(&self, w: &World) -> bool {
        w.player() == Some(*self)
    }

    pub fn is_walkable(&self, w: &World) -> bool {
        w.body(*self).is_some_and(|b| b.walkable)
    }

    /// Current display glyph for the entity.
    pub fn glyph(&self, w: &World, tick: u64) -> char {
        w.body(*self)
            .map_or(' ', |b| b.sprite.glyph(b.facing, tick))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for Entity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(n) = s.strip_prefix('#') else {
            return Err("bad entity");
        };
        Ok(Entity(n.parse().map_err(|_| "bad entity")?))
    }
}

/// Everything that the world knows about an entity.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Body {
    pub name: String,
    pub sprite: Sprite,
    /// Can other entities walk into the entity's cell.
    pub walkable: bool,
    /// What happens when the player interacts with the entity.
    pub action: Option<Action>,
    /// Unit vector towards the way the entity is looking.
    pub facing: IVec2,
    /// Unique identifier that scripts can look the entity up with.
    pub id: Option<String>,
    pub description: String,
}

impl Default for Body {
    fn default() -> Self {
        Body {
            name: Default::default(),
            sprite: Default::default(),
            walkable: false,
            action: None,
            facing: Body::DEFAULT_FACING,
            id: None,
            description: Default::default(),
        }
    }
}

impl Body {
    /// Entities start out looking south, towards the player's screen.
    pub const DEFAULT_FACING: IVec2 = ivec2(0, 1);

    pub fn new(name: impl Into<String>, icon: char) -> Self {
        Body {
            name: name.into(),
            sprite: Sprite::new(icon),
            ..Default::default()
        }
    }

    /// Builder method for making the body walkable.
    pub fn walkable(mut self) -> Self {
        self.walkable = true;
        self
    }

    pub fn acting(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn unique(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn described(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Builder method for per-direction glyphs in N, E, S, W order.
    pub fn turning(mut self, glyphs: [char; 4]) -> Self {
        self.sprite.turns = Some(glyphs);
        self
    }

    /// Builder method for an idle animation loop.
    pub fn animated(mut self, frames: impl Into<String>) -> Self {
        self.sprite.frames = frames.into();
        self
    }
}

/// How an entity looks on the map.
#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Sprite {
    pub icon: char,
    /// Separate glyphs for looking N, E, S and W.
    pub turns: Option<[char; 4]>,
    /// Animation frames, cycled through when the sprite has no turn
    /// glyphs.
    pub frames: String,
}

impl Sprite {
    pub fn new(icon: char) -> Self {
        Sprite {
            icon,
            ..Default::default()
        }
    }

    pub fn glyph(&self, facing: IVec2, tick: u64) -> char {
        if let (Some(turns), Some(i)) = (self.turns, facing.dir4_index()) {
            return turns[i];
        }

        let n = self.frames.chars().count() as u64;
        if n > 0 {
            let frame = (tick / FRAME_PERIOD) % n;
            return self.frames.chars().nth(frame as usize).unwrap_or(self.icon);
        }

        self.icon
    }
}
