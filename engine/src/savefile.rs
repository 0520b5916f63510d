//! Saving and loading game worlds.
use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::World;

/// Bump when the save format changes incompatibly.
pub const SAVE_VERSION: u32 = 1;

#[derive(Serialize)]
struct SaveOut<'a> {
    version: u32,
    world: &'a World,
}

#[derive(Deserialize)]
struct Header {
    version: u32,
}

#[derive(Deserialize)]
struct SaveIn {
    world: World,
}

/// Serialize a world into compressed save data.
pub fn to_bytes(world: &World) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(&SaveOut {
        version: SAVE_VERSION,
        world,
    })?;
    Ok(snap::raw::Encoder::new().compress_vec(&json)?)
}

/// Restore a world from compressed save data.
pub fn from_bytes(bytes: &[u8]) -> Result<World> {
    let json = snap::raw::Decoder::new()
        .decompress_vec(bytes)
        .context("not a save file")?;

    let header: Header =
        serde_json::from_slice(&json).context("corrupt save file")?;
    if header.version != SAVE_VERSION {
        bail!(
            "save file version {} is not supported, expected {}",
            header.version,
            SAVE_VERSION
        );
    }

    let save: SaveIn =
        serde_json::from_slice(&json).context("corrupt save file")?;
    save.world.validate().context("invalid save file")?;
    Ok(save.world)
}

pub fn save(world: &World, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_bytes(world)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("saved game to {}", path.display());
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<World> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let world = from_bytes(&bytes)
        .with_context(|| format!("failed to load {}", path.display()))?;
    log::info!("loaded game from {}", path.display());
    Ok(world)
}

#[cfg(test)]
mod test {
    use glam::ivec2;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Action, Body, Room};

    fn world() -> World {
        let mut w = World::new(30, 3);
        w.add_room(Room::new("room", [4, 4])).unwrap();
        let player = w
            .spawn_at(Body::new("hero", '@').unique("player"), "room", [1, 1])
            .unwrap();
        w.spawn_at(
            Body::new("sage", 's').acting(Action::iter([
                Action::talk("One."),
                Action::talk("Two."),
            ])),
            "room",
            [2, 1],
        )
        .unwrap();
        w.set_player(player).unwrap();
        w
    }

    #[test]
    fn save_and_restore() {
        let mut w = world();
        w.step_player(ivec2(1, 0));
        w.interact();

        let bytes = to_bytes(&w).unwrap();
        let mut w2 = from_bytes(&bytes).unwrap();
        assert_eq!(w2.infobox(), w.infobox());

        // Action progress survives the round trip.
        w.interact();
        w2.interact();
        assert_eq!(w2.infobox(), w.infobox());
        assert_eq!(
            w2.infobox().history().last().map(String::as_str),
            Some("> sage: Two.")
        );
    }

    #[test]
    fn bad_data() {
        assert!(from_bytes(b"garbage").is_err());

        // Valid compression, bad contents.
        let junk = snap::raw::Encoder::new().compress_vec(b"{}").unwrap();
        assert!(from_bytes(&junk).is_err());

        let future = snap::raw::Encoder::new()
            .compress_vec(br#"{"version": 999, "world": {}}"#)
            .unwrap();
        let err = from_bytes(&future).unwrap_err();
        assert!(err.to_string().contains("version 999"));

        // Structurally fine but unplayable world.
        let empty = to_bytes(&World::default()).unwrap();
        assert!(from_bytes(&empty).is_err());
    }

    /// Save data for `world()` with the world JSON edited by `f`.
    fn tampered(f: impl FnOnce(&mut serde_json::Value)) -> Vec<u8> {
        let w = world();
        let mut json = serde_json::to_value(SaveOut {
            version: SAVE_VERSION,
            world: &w,
        })
        .unwrap();
        f(&mut json["world"]);
        snap::raw::Encoder::new()
            .compress_vec(&serde_json::to_vec(&json).unwrap())
            .unwrap()
    }

    #[test]
    fn broken_invariants() {
        use serde_json::json;

        assert!(from_bytes(&tampered(|_| {})).is_ok());

        let err = from_bytes(&tampered(|w| {
            w["rooms"]["room"]["cells"] = json!([]);
        }))
        .unwrap_err();
        assert!(format!("{err:#}").contains("cells"));

        assert!(from_bytes(&tampered(|w| {
            w["rooms"]["room"]["portals"] = json!([["room", [9, 9]]]);
        }))
        .is_err());

        assert!(from_bytes(&tampered(|w| {
            w["infobox"]["unread"] = json!(99);
        }))
        .is_err());

        assert!(from_bytes(&tampered(|w| {
            w["infobox"]["width"] = json!(1);
            w["infobox"]["height"] = json!(0);
        }))
        .is_err());

        // Player not among the bodies.
        assert!(from_bytes(&tampered(|w| {
            w["player"] = json!("#99");
        }))
        .is_err());
    }

    #[test]
    fn files() {
        let path = std::env::temp_dir()
            .join(format!("crystals-test-{}.sav", std::process::id()));
        let w = world();
        save(&w, &path).unwrap();
        let w2 = load(&path).unwrap();
        assert_eq!(w2.player(), w.player());
        let _ = fs::remove_file(&path);

        assert!(load(&path).is_err());
    }
}
