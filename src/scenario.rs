//! The Crystals adventure.
use anyhow::{Context, Result};
use engine::prelude::*;

const VILLAGE: &str = "
    ############
    #..........#
    #.@...E....#
    #..........>
    #...K......#
    #..........#
    ############";

const CAVE: &str = "
    ##########
    <...#....#
    #.#.#.*..#
    #.#...#..#
    #.#####.^#
    ##########";

const SHRINE: &str = "
    #######
    #f.A.f#
    #.....#
    #..v..#
    #######";

fn legend() -> Legend {
    let floor = || Body::new("floor", '.').walkable();
    let stairs = |c| Body::new("stairs", c).walkable();

    Legend::from_iter([
        ('#', vec![Body::new("wall", '#')]),
        ('.', vec![floor()]),
        ('>', vec![stairs('>')]),
        ('<', vec![stairs('<')]),
        ('^', vec![stairs('^')]),
        ('v', vec![stairs('v')]),
        (
            '@',
            vec![
                floor(),
                Body::new("hero", '@')
                    .unique("player")
                    .turning(['^', '>', 'v', '<'])
                    .described("A wanderer from the hills."),
            ],
        ),
        (
            'E',
            vec![
                floor(),
                Body::new("elder", 'E').unique("elder").acting(Action::iter([
                    Action::talk("Welcome to the vale, traveller."),
                    Action::sequence([
                        Action::talk(
                            "Thieves hid our crystal in the cave east of \
                             here. Please bring it back to the shrine.",
                        ),
                        Action::update_plot(["met-elder"]),
                    ]),
                    Action::talk("The shrine lies beyond the cave."),
                ])),
            ],
        ),
        (
            'K',
            vec![
                floor(),
                Body::new("knight", 'K')
                    .unique("knight")
                    .described("Sworn to guard the shrine road.")
                    .acting(Action::iter([
                        Action::talk("The roads are not safe to walk alone."),
                        Action::sequence([
                            Action::talk("I'll come with you."),
                            Action::JoinParty,
                        ]),
                        Action::looping([
                            Action::talk("Lead on."),
                            Action::talk("Stay sharp."),
                        ]),
                    ])),
            ],
        ),
        (
            '*',
            vec![
                floor(),
                Body::new("crystal", '*').animated("*+").acting(Action::iter(
                    [
                        Action::sequence([
                            Action::alert("You pick up the glowing crystal."),
                            Action::update_plot(["found-crystal"]),
                        ]),
                        Action::alert("Only a dent in the rock remains."),
                    ],
                )),
            ],
        ),
        (
            'A',
            vec![
                floor(),
                Body::new("altar", 'A').acting(Action::sequence([
                    Action::alert(
                        "An empty socket sits in the middle of the altar.",
                    ),
                    Action::update_plot(["at-altar"]),
                ])),
            ],
        ),
        ('f', vec![floor(), Body::new("brazier", 'f').animated("^*")]),
    ])
}

fn plot() -> Plot {
    Plot::new(
        Vec::<String>::new(),
        [
            Trigger::new(
                ["met-elder"],
                Action::alert("Find the crystal in the cave east of the village."),
            ),
            Trigger::new(
                ["found-crystal", "at-altar"],
                Action::sequence([
                    Action::alert(
                        "The crystal flares as it meets the altar. Light \
                         floods the vale.",
                    ),
                    Action::Victory("The crystal is restored.".into()),
                ]),
            ),
        ],
    )
}

/// Build a fresh game world.
pub fn build() -> Result<World> {
    let mut w = World::default();
    let legend = legend();
    w.add_ascii_room("village", VILLAGE, &legend)?;
    w.add_ascii_room("cave", CAVE, &legend)?;
    w.add_ascii_room("shrine", SHRINE, &legend)?;

    w.link("village", [11, 3], "cave", [0, 1])?;
    w.link("cave", [8, 4], "shrine", [3, 3])?;

    let player = w.unique("player").context("scenario has no player")?;
    w.set_player(player)?;
    w.set_plot(plot());
    w.infobox_mut()
        .write("The vale has gone dark. Perhaps the elder knows why.");

    w.validate()?;
    Ok(w)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn walk(w: &mut World, path: &str) {
        for c in path.chars() {
            let dir = DIR_4["NESW".find(c).unwrap()];
            assert!(w.step_player(dir), "blocked at {c} of {path}");
        }
    }

    fn room(w: &World) -> &str {
        w.focus().unwrap().name()
    }

    #[test]
    fn knight_joins() {
        let mut w = build().unwrap();
        walk(&mut w, "SSE");
        // Bump into knight.
        assert!(!w.step_player(ivec2(1, 0)));
        w.interact();
        w.interact();

        let knight = w.unique("knight").unwrap();
        assert_eq!(w.party(), &[w.player().unwrap(), knight]);
        assert_eq!(
            w.infobox().history().last().map(String::as_str),
            Some("> Knight joins the party.")
        );
    }

    #[test]
    fn play_to_victory() {
        let mut w = build().unwrap();
        let player = w.player().unwrap();
        assert_eq!(player.glyph(&w, 0), 'v');

        walk(&mut w, "EEE");
        assert!(!w.step_player(ivec2(1, 0)));
        w.interact();
        assert!(!w.plot().contains("met-elder"));
        w.interact();
        assert!(w.plot().contains("met-elder"));

        walk(&mut w, "SEEEEEE");
        assert_eq!(room(&w), "cave");
        assert_eq!(w.loc(player).unwrap().xy(), ivec2(0, 1));

        walk(&mut w, "EEESSEEN");
        assert!(!w.step_player(ivec2(1, 0)));
        assert_eq!(player.glyph(&w, 0), '>');
        w.interact();
        assert!(w.plot().contains("found-crystal"));

        walk(&mut w, "NEESSSE");
        assert_eq!(room(&w), "shrine");

        walk(&mut w, "N");
        assert!(!w.is_over());
        assert!(!w.step_player(ivec2(0, -1)));
        w.interact();
        assert!(w.is_over());
        assert_eq!(
            w.status(),
            &ScenarioStatus::Won("The crystal is restored.".into())
        );
        assert!(w.plot().is_finished());
    }

    #[test]
    fn survives_save() {
        let w = build().unwrap();
        let bytes = engine::savefile::to_bytes(&w).unwrap();
        let w2 = engine::savefile::from_bytes(&bytes).unwrap();
        assert_eq!(w2.rooms().count(), 3);
        assert_eq!(w2.focus().map(|r| r.name()), Some("village"));
    }
}
