use glam::IVec2;

/// Logic-level player input.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Command {
    /// Try to walk one tile in the given direction.
    Step(IVec2),
    /// Act on whatever the player is facing, or scroll a full infobox.
    Interact,
}
