//! Layered tile maps.
use anyhow::{bail, Result};
use glam::{IVec2, IVec3};
use serde::{Deserialize, Serialize};
use util::{HashMap, IndexMap, Rect};

use crate::Entity;

/// A rectangular map where every cell holds a stack of entity slots.
///
/// Slot zero is the bottom of the stack. Slots may be empty, stack
/// positions of the remaining entities stay put when an entity is removed.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(try_from = "RoomData", rename_all = "kebab-case")]
pub struct Room {
    name: String,
    size: IVec2,
    cells: Vec<Vec<Option<Entity>>>,
    portals: Portals,
}

/// Room fields as read from a save file, before they're checked.
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RoomData {
    name: String,
    size: IVec2,
    cells: Vec<Vec<Option<Entity>>>,
    portals: Portals,
}

impl TryFrom<RoomData> for Room {
    type Error = anyhow::Error;

    fn try_from(data: RoomData) -> Result<Self> {
        let RoomData {
            name,
            size,
            cells,
            portals,
        } = data;

        if size.min_element() < 0 {
            bail!("room {name:?} has negative size {size}");
        }
        let area = size.x as i64 * size.y as i64;
        if cells.len() as i64 != area {
            bail!(
                "room {name:?} has {} cells, expected {area}",
                cells.len()
            );
        }

        let ret = Room {
            name,
            size,
            cells,
            portals,
        };
        for (dest, pos) in ret.portals() {
            if !ret.contains(pos) {
                bail!(
                    "room {:?} has portal to {dest:?} outside it at {pos}",
                    ret.name
                );
            }
        }
        Ok(ret)
    }
}

impl Room {
    pub fn new(name: impl Into<String>, size: impl Into<IVec2>) -> Self {
        let size = size.into().max(IVec2::ZERO);
        Room {
            name: name.into(),
            size,
            cells: vec![Vec::new(); (size.x * size.y) as usize],
            portals: Default::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn area(&self) -> Rect {
        Rect::sized(self.size)
    }

    pub fn contains(&self, pos: impl Into<IVec2>) -> bool {
        self.area().contains(pos)
    }

    fn idx(&self, pos: IVec2) -> Option<usize> {
        self.contains(pos).then(|| (pos.x + pos.y * self.size.x) as usize)
    }

    /// Entity slots at a cell, bottom first. Empty for points outside the
    /// room.
    pub fn stack(&self, pos: impl Into<IVec2>) -> &[Option<Entity>] {
        match self.idx(pos.into()) {
            Some(i) => &self.cells[i],
            None => &[],
        }
    }

    /// Entities at a cell, bottom first.
    pub fn entities_at(
        &self,
        pos: impl Into<IVec2>,
    ) -> impl Iterator<Item = Entity> + '_ {
        self.stack(pos).iter().flatten().copied()
    }

    /// Topmost entity at a cell.
    pub fn top(&self, pos: impl Into<IVec2>) -> Option<Entity> {
        self.stack(pos).iter().rev().flatten().next().copied()
    }

    /// Iterate all entities with their positions in row-major order, going
    /// up the stack in each cell.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, IVec3)> + '_ {
        self.area().into_iter().flat_map(move |p| {
            self.stack(p)
                .iter()
                .enumerate()
                .filter_map(move |(z, e)| e.map(|e| (e, p.extend(z as i32))))
        })
    }

    /// Put an entity in a cell and return the stack layer it ended up in.
    ///
    /// The layer defaults to the top of the stack and is clamped to it. If
    /// the layer is taken, the entity goes in a new slot right above it and
    /// any entities further up move up by one.
    ///
    /// Panics if the position is outside the room.
    pub(crate) fn add(
        &mut self,
        e: Entity,
        pos: IVec2,
        z: Option<usize>,
    ) -> usize {
        let i = self
            .idx(pos)
            .unwrap_or_else(|| panic!("Room::add: {pos} outside {}", self.name));
        let stack = &mut self.cells[i];

        if stack.is_empty() {
            stack.push(Some(e));
            return 0;
        }

        let depth = stack.len();
        let mut z = z.map_or(depth - 1, |z| z.min(depth - 1));
        if stack[z].is_some() {
            z += 1;
            if z == depth {
                stack.push(None);
            } else {
                stack.insert(z, None);
            }
        }
        stack[z] = Some(e);
        z
    }

    /// Clear a slot and return the entity that was in it.
    pub(crate) fn pop(&mut self, pos: IVec2, z: usize) -> Option<Entity> {
        let i = self.idx(pos)?;
        self.cells[i].get_mut(z)?.take()
    }

    pub fn portal_at(&self, pos: impl Into<IVec2>) -> Option<&str> {
        self.portals.at.get(&pos.into()).map(String::as_str)
    }

    /// Position of the portal in this room that leads to the destination
    /// room.
    pub fn portal_to(&self, dest: &str) -> Option<IVec2> {
        self.portals.to.get(dest).copied()
    }

    pub fn portals(&self) -> impl Iterator<Item = (&str, IVec2)> + '_ {
        self.portals.to.iter().map(|(d, &p)| (d.as_str(), p))
    }

    /// Register a portal to another room. A room has at most one portal to
    /// each destination, a new one replaces the old one.
    pub(crate) fn add_portal(&mut self, dest: impl Into<String>, pos: IVec2) {
        self.portals.insert(dest.into(), pos);
    }
}

/// Two-way index of a room's portals.
#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(from = "Vec<(String, IVec2)>", into = "Vec<(String, IVec2)>")]
struct Portals {
    to: IndexMap<String, IVec2>,
    at: HashMap<IVec2, String>,
}

impl Portals {
    fn insert(&mut self, dest: String, pos: IVec2) {
        if let Some(old) = self.to.insert(dest.clone(), pos) {
            self.at.remove(&old);
        }
        if let Some(old_dest) = self.at.insert(pos, dest) {
            self.to.shift_remove(&old_dest);
        }
    }
}

impl From<Vec<(String, IVec2)>> for Portals {
    fn from(value: Vec<(String, IVec2)>) -> Self {
        let mut ret = Portals::default();
        for (dest, pos) in value {
            ret.insert(dest, pos);
        }
        ret
    }
}

impl From<Portals> for Vec<(String, IVec2)> {
    fn from(value: Portals) -> Self {
        value.to.into_iter().collect()
    }
}

#[cfg(test)]
mod test {
    use glam::{ivec2, ivec3};
    use pretty_assertions::assert_eq;
    use quickcheck_macros::quickcheck;

    use super::*;

    fn e(n: u32) -> Entity {
        Entity(n)
    }

    #[test]
    fn stacking() {
        let mut room = Room::new("test", [3, 3]);
        let p = ivec2(1, 1);

        assert_eq!(room.add(e(1), p, None), 0);
        // Goes on top by default.
        assert_eq!(room.add(e(2), p, None), 1);
        // Taken slot, insert above it.
        assert_eq!(room.add(e(3), p, Some(0)), 1);
        assert_eq!(room.stack(p), &[Some(e(1)), Some(e(3)), Some(e(2))]);

        // Removal leaves a hole.
        assert_eq!(room.pop(p, 1), Some(e(3)));
        assert_eq!(room.stack(p), &[Some(e(1)), None, Some(e(2))]);
        assert_eq!(room.top(p), Some(e(2)));

        // Holes get filled when asked for.
        assert_eq!(room.add(e(4), p, Some(1)), 1);
        assert_eq!(room.add(e(5), p, None), 3);

        // Out of range layers clamp to top.
        assert_eq!(room.add(e(6), p, Some(10)), 4);
        assert_eq!(
            room.entities_at(p).collect::<Vec<_>>(),
            vec![e(1), e(4), e(2), e(5), e(6)]
        );

        assert_eq!(room.pop(p, 10), None);
        assert_eq!(room.pop(ivec2(5, 5), 0), None);
    }

    #[quickcheck]
    fn stacking_keeps_everyone(layers: Vec<Option<u8>>) -> bool {
        let mut room = Room::new("test", [1, 1]);
        for (i, z) in layers.iter().enumerate() {
            let z = room.add(e(i as u32), IVec2::ZERO, z.map(|z| z as usize));
            if room.stack(IVec2::ZERO)[z] != Some(e(i as u32)) {
                return false;
            }
        }
        let mut seen: Vec<u32> =
            room.entities_at(IVec2::ZERO).map(|e| e.0).collect();
        seen.sort();
        seen == (0..layers.len() as u32).collect::<Vec<_>>()
    }

    #[test]
    fn iteration_order() {
        let mut room = Room::new("test", [2, 2]);
        room.add(e(1), ivec2(1, 1), None);
        room.add(e(2), ivec2(1, 0), None);
        room.add(e(3), ivec2(1, 0), None);
        room.add(e(4), ivec2(0, 1), None);

        assert_eq!(
            room.iter().collect::<Vec<_>>(),
            vec![
                (e(2), ivec3(1, 0, 0)),
                (e(3), ivec3(1, 0, 1)),
                (e(4), ivec3(0, 1, 0)),
                (e(1), ivec3(1, 1, 0)),
            ]
        );
    }

    #[test]
    fn portals() {
        let mut room = Room::new("hall", [4, 4]);
        room.add_portal("yard", ivec2(0, 2));
        room.add_portal("cellar", ivec2(3, 3));

        assert_eq!(room.portal_at([0, 2]), Some("yard"));
        assert_eq!(room.portal_to("cellar"), Some(ivec2(3, 3)));
        assert_eq!(room.portal_at([1, 1]), None);

        // Moving a portal clears the old spot.
        room.add_portal("yard", ivec2(1, 0));
        assert_eq!(room.portal_at([0, 2]), None);
        assert_eq!(room.portal_at([1, 0]), Some("yard"));

        let json = serde_json::to_string(&room).unwrap();
        let room2: Room = serde_json::from_str(&json).unwrap();
        assert_eq!(room2.portal_at([1, 0]), Some("yard"));
        assert_eq!(room2.portal_to("cellar"), Some(ivec2(3, 3)));
    }

    #[test]
    fn bad_rooms() {
        let ok = r#"{"name": "x", "size": [2, 1], "cells": [[], []], "portals": []}"#;
        assert!(serde_json::from_str::<Room>(ok).is_ok());

        for bad in [
            r#"{"name": "x", "size": [4, 4], "cells": [], "portals": []}"#,
            r#"{"name": "x", "size": [-1, -2], "cells": [[], []], "portals": []}"#,
            r#"{"name": "x", "size": [2, 1], "cells": [[], []], "portals": [["y", [5, 0]]]}"#,
        ] {
            assert!(serde_json::from_str::<Room>(bad).is_err(), "{bad}");
        }
    }
}
