use engine::Entity;
use glam::{ivec2, IVec2};

/// Number of frames a sliding step animation lasts.
pub const SLIDE_FRAMES: usize = 6;

/// Helper function for the standard animation countdown logic.
///
/// Decrement `lifetime` `n_updates` times and return whether lifetime stayed
/// above zero.
pub fn countdown(n_updates: u32, lifetime: &mut usize) -> bool {
    debug_assert!(n_updates > 0);
    for _ in 0..n_updates {
        if *lifetime == 0 {
            return false;
        }
        *lifetime -= 1;
    }
    true
}

/// Entity gliding from its previous cell to the one it just stepped into.
///
/// The world has already moved the entity, the slide only offsets where
/// it's drawn.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Slide {
    pub entity: Entity,
    from: IVec2,
    to: IVec2,
    remaining: usize,
}

impl Slide {
    pub fn new(entity: Entity, from: IVec2, to: IVec2) -> Self {
        Slide {
            entity,
            from,
            to,
            remaining: SLIDE_FRAMES,
        }
    }

    /// Screen cell offset from the entity's current drawing position.
    ///
    /// Map cells are two characters wide.
    pub fn offset(&self) -> IVec2 {
        (self.from - self.to) * ivec2(2, 1) * self.remaining as i32
            / SLIDE_FRAMES as i32
    }

    /// Advance the animation, return whether it's still running.
    pub fn update(&mut self, n_updates: u32) -> bool {
        countdown(n_updates, &mut self.remaining) && self.remaining > 0
    }
}
