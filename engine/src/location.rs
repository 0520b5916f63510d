use std::fmt;

use glam::{IVec2, IVec3};

/// Position of an entity in the world.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Location {
    pub room: String,
    /// Tile coordinates and stack layer.
    pub pos: IVec3,
}

impl Location {
    pub fn new(room: impl Into<String>, pos: impl Into<IVec3>) -> Self {
        Location {
            room: room.into(),
            pos: pos.into(),
        }
    }

    /// Tile position in the room.
    pub fn xy(&self) -> IVec2 {
        self.pos.truncate()
    }

    /// Stack layer.
    pub fn z(&self) -> usize {
        self.pos.z as usize
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {})",
            self.room, self.pos.x, self.pos.y, self.pos.z
        )
    }
}
