use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardLayout {
    #[default]
    Qwerty,
    Colemak,
    Dvorak,
}

impl KeyboardLayout {
    pub const ALL: [KeyboardLayout; 3] = [
        KeyboardLayout::Qwerty,
        KeyboardLayout::Colemak,
        KeyboardLayout::Dvorak,
    ];

    /// Try to detect keyboard layout using platform-specific magic.
    ///
    /// Defaults to qwerty if it can't determine any other known layout being
    /// active.
    pub fn system_layout() -> Self {
        KeyboardLayout::ALL
            .into_iter()
            .skip(1)
            .find(|layout| crate::sys::layout_is_active(layout.name()))
            .unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyboardLayout::Qwerty => "qwerty",
            KeyboardLayout::Colemak => "colemak",
            KeyboardLayout::Dvorak => "dvorak",
        }
    }

    /// Map a key in the qwerty position to the key in the same physical
    /// position on this layout.
    pub fn remap_from_qwerty(&self, c: char) -> char {
        remap(KeyboardLayout::Qwerty.board(), self.board(), c)
    }

    pub fn remap_to_qwerty(&self, c: char) -> char {
        remap(self.board(), KeyboardLayout::Qwerty.board(), c)
    }

    fn board(&self) -> &'static [u8] {
        match self {
            KeyboardLayout::Qwerty => {
                b"\
~!@#$%^&*()_+
`1234567890-=
QWERTYUIOP{}
qwertyuiop[]
ASDFGHJKL:\"|
asdfghjkl;'\\
ZXCVBNM<>?
zxcvbnm,./"
            }
            KeyboardLayout::Colemak => {
                b"\
~!@#$%^&*()_+
`1234567890-=
QWFPGJLUY:{}
qwfpgjluy;[]
ARSTDHNEIO\"|
arstdhneio'\\
ZXCVBKM<>?
zxcvbkm,./"
            }
            KeyboardLayout::Dvorak => {
                b"\
~!@#$%^&*(){}
`1234567890[]
\"<>PYFGCRL?+
',.pyfgcrl/=
AOEUIDHTNS_|
aoeuidhtns-\\
:QJKXBMWVZ
;qjkxbmwvz"
            }
        }
    }
}

fn remap(from: &[u8], to: &[u8], c: char) -> char {
    if !c.is_ascii() {
        return c;
    }
    match from.iter().position(|&b| b == c as u8) {
        Some(pos) => to[pos] as char,
        None => c,
    }
}

impl fmt::Display for KeyboardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for KeyboardLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_lowercase();
        KeyboardLayout::ALL
            .into_iter()
            .find(|layout| layout.name() == s)
            .ok_or_else(|| format!("unknown keyboard layout {s:?}"))
    }
}
