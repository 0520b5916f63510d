use std::{fs, path::Path};

use anyhow::Context;
use derive_more::Deref;
use engine::Command;
use navni::{Key, KeyTyped};
use serde::{Deserialize, Serialize};
use util::{IndexMap, KeyboardLayout, DIR_4};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum InputAction {
    North,
    East,
    South,
    West,
    Interact,
    Confirm,
    Cancel,
    Party,
    Quicksave,
    Quickload,
    QuitGame,
}

#[derive(Clone, Deref, Eq, PartialEq, Serialize, Deserialize)]
pub struct InputMap(IndexMap<KeyTyped, InputAction>);

impl Default for InputMap {
    fn default() -> Self {
        use InputAction::*;

        let mut ret: IndexMap<KeyTyped, InputAction> = Default::default();

        // NB. Order matters, first binding for command is the main binding
        // that's reported by key_for.
        for (k, cmd) in &[
            ("w", North),
            ("a", West),
            ("s", South),
            ("d", East),
            ("Up", North),
            ("Left", West),
            ("Down", South),
            ("Right", East),
            ("Sp", Interact),
            ("e", Interact),
            ("Ret", Confirm),
            ("Esc", Cancel),
            ("z", Party),
            ("F5", Quicksave),
            ("F9", Quickload),
            ("C-c", QuitGame),
        ] {
            ret.insert(
                k.parse::<KeyTyped>()
                    .expect("Error in InputMap::default map"),
                *cmd,
            );
        }

        InputMap(ret)
    }
}

impl InputMap {
    pub fn for_layout(layout: KeyboardLayout) -> Self {
        InputMap::default().remapped(layout)
    }

    /// Load key bindings from an IDM file.
    ///
    /// Bindings are written for a QWERTY keyboard and remapped to the given
    /// layout.
    pub fn load(
        path: impl AsRef<Path>,
        layout: KeyboardLayout,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let map: InputMap = idm::from_str(&text).map_err(|e| {
            anyhow::anyhow!("bad keymap {}: {e}", path.display())
        })?;
        log::info!("loaded keymap from {}", path.display());
        Ok(map.remapped(layout))
    }

    fn remapped(self, layout: KeyboardLayout) -> Self {
        let mut ret = IndexMap::default();
        for (k, a) in self.0 {
            if let Key::Char(c) = k.key() {
                ret.insert(
                    KeyTyped::new(
                        Key::Char(layout.remap_from_qwerty(c)),
                        k.mods(),
                    ),
                    a,
                );
            } else {
                ret.insert(k, a);
            }
        }

        InputMap(ret)
    }

    /// Find the key for the given action.
    pub fn key_for(&self, action: InputAction) -> Option<KeyTyped> {
        self.0
            .iter()
            .find_map(|(k, v)| (*v == action).then_some(*k))
    }
}

impl TryFrom<InputAction> for Command {
    type Error = ();

    fn try_from(value: InputAction) -> Result<Self, Self::Error> {
        use InputAction::*;
        match value {
            North => Ok(Command::Step(DIR_4[0])),
            East => Ok(Command::Step(DIR_4[1])),
            South => Ok(Command::Step(DIR_4[2])),
            West => Ok(Command::Step(DIR_4[3])),
            Interact => Ok(Command::Interact),
            _ => Err(()),
        }
    }
}
