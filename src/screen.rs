use navni::prelude::*;
use ui::Game;

/// Main loop screen for the game.
pub fn run(
    g: &mut Game,
    b: &mut dyn Backend,
    n: u32,
) -> Option<StackOp<Game>> {
    g.frame(b, n);

    if g.should_quit() {
        log::info!("quitting");
        return Some(StackOp::Pop);
    }
    None
}
