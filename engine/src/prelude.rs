pub use crate::{
    Action, Body, Command, Entity, InfoBox, Legend, Location, Page, Plot,
    Room, ScenarioStatus, Sprite, Trigger, World,
};
pub use glam::{ivec2, ivec3, IVec2, IVec3};
pub use util::{HashMap, HashSet, IndexMap, IndexSet, VecExt, DIR_4};
