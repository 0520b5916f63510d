//! Unopinionated standalone utilities.

mod geom;
pub use geom::{scroll_offset, Rect, VecExt, DIR_4};

mod keyboard_layout;
pub use keyboard_layout::KeyboardLayout;

mod sys;
pub use sys::panic_handler;

pub mod text;
pub use text::StrExt;

/// Map with an efficient hash function.
pub use rustc_hash::FxHashMap as HashMap;

/// Set with an efficient hash function.
pub use rustc_hash::FxHashSet as HashSet;

type DefaultHashBuilder = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;

/// Insertion order preserving map with an efficient hash function.
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, DefaultHashBuilder>;

/// Insertion order preserving set with an efficient hash function.
pub type IndexSet<V> = indexmap::IndexSet<V, DefaultHashBuilder>;
