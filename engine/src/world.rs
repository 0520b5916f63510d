use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use glam::IVec2;
use serde::{Deserialize, Serialize, Serializer};
use util::{HashMap, IndexMap, StrExt};

use crate::{
    Body, Command, Entity, InfoBox, Location, Plot, Room, ScenarioStatus,
};

/// Map legend for building rooms out of ASCII maps. Each character stands
/// for a stack of bodies, bottom first.
pub type Legend = IndexMap<char, Vec<Body>>;

/// Non-cached world data that goes in a save file.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct SerWorld {
    rooms: IndexMap<String, Room>,
    bodies: BTreeMap<Entity, Body>,
    /// Value for the next spawned entity handle.
    next_id: u32,
    /// Room the player is currently looking at.
    focus: String,
    player: Option<Entity>,
    party: Vec<Entity>,
    plot: Plot,
    infobox: InfoBox,
    status: ScenarioStatus,
}

/// Overall runtime game world data.
///
/// Essential state lives in `inner` and goes in save files. The placement
/// and unique id indices are rebuilt from it on load.
#[derive(Clone, Default, Debug, Deserialize)]
#[serde(try_from = "SerWorld")]
pub struct World {
    inner: SerWorld,
    placement: HashMap<Entity, Location>,
    uniques: HashMap<String, Entity>,
}

impl Serialize for World {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.inner.serialize(serializer)
    }
}

impl TryFrom<SerWorld> for World {
    type Error = anyhow::Error;

    fn try_from(inner: SerWorld) -> Result<Self> {
        let mut ret = World {
            inner,
            ..Default::default()
        };
        ret.rebuild_indices()?;
        Ok(ret)
    }
}

// Construction.
impl World {
    pub fn new(infobox_width: usize, infobox_height: usize) -> Self {
        World {
            inner: SerWorld {
                infobox: InfoBox::new(infobox_width, infobox_height),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn add_room(&mut self, room: Room) -> Result<()> {
        if self.inner.rooms.contains_key(room.name()) {
            bail!("add_room: duplicate room {:?}", room.name());
        }
        if room.iter().next().is_some() {
            bail!("add_room: room {:?} is not empty", room.name());
        }
        self.inner.rooms.insert(room.name().to_owned(), room);
        Ok(())
    }

    /// Create a new entity that isn't placed anywhere yet.
    pub fn spawn(&mut self, body: Body) -> Result<Entity> {
        if let Some(id) = &body.id {
            if self.uniques.contains_key(id) {
                bail!("spawn: duplicate unique id {id:?}");
            }
        }

        let e = Entity(self.inner.next_id);
        self.inner.next_id += 1;
        if let Some(id) = &body.id {
            self.uniques.insert(id.clone(), e);
        }
        log::debug!("spawned {e} {:?}", body.name);
        self.inner.bodies.insert(e, body);
        Ok(e)
    }

    pub fn spawn_at(
        &mut self,
        body: Body,
        room: &str,
        pos: impl Into<IVec2>,
    ) -> Result<Entity> {
        let e = self.spawn(body)?;
        if let Err(err) = self.place(e, room, pos, None) {
            self.despawn(e);
            return Err(err);
        }
        Ok(e)
    }

    /// Remove an entity from the world for good.
    pub fn despawn(&mut self, e: Entity) -> Option<Body> {
        self.unplace(e);
        self.inner.party.retain(|&a| a != e);
        if self.inner.player == Some(e) {
            self.inner.player = None;
        }
        let body = self.inner.bodies.remove(&e)?;
        if let Some(id) = &body.id {
            self.uniques.remove(id);
        }
        Some(body)
    }

    /// Put an entity into a room, stacked according to `Room::add`.
    pub fn place(
        &mut self,
        e: Entity,
        room: &str,
        pos: impl Into<IVec2>,
        z: Option<usize>,
    ) -> Result<()> {
        let pos = pos.into();
        if !self.inner.bodies.contains_key(&e) {
            bail!("place: unknown entity {e}");
        }
        let Some(r) = self.inner.rooms.get(room) else {
            bail!("place: unknown room {room:?}");
        };
        if !r.contains(pos) {
            bail!("place: {pos} is outside room {room:?}");
        }
        self.relocate(e, room, pos, z);
        Ok(())
    }

    /// Build a room from an ASCII map and populate it from the legend.
    ///
    /// Whitespace in the map is empty space, the room size is the bounding
    /// box of the map.
    pub fn add_ascii_room(
        &mut self,
        name: &str,
        map: &str,
        legend: &Legend,
    ) -> Result<()> {
        let cells: Vec<(IVec2, char)> = map.char_grid().collect();
        let size = cells
            .iter()
            .fold(IVec2::ZERO, |acc, &(p, _)| acc.max(p + IVec2::ONE));
        self.add_room(Room::new(name, size))?;

        for (pos, c) in cells {
            let Some(bodies) = legend.get(&c) else {
                bail!("add_ascii_room {name:?}: unknown map char {c:?}");
            };
            for body in bodies {
                self.spawn_at(body.clone(), name, pos)
                    .with_context(|| format!("add_ascii_room {name:?}"))?;
            }
        }
        Ok(())
    }

    /// Connect two rooms with a pair of portals.
    pub fn link(
        &mut self,
        a: &str,
        a_pos: impl Into<IVec2>,
        b: &str,
        b_pos: impl Into<IVec2>,
    ) -> Result<()> {
        let (a_pos, b_pos) = (a_pos.into(), b_pos.into());
        if a == b {
            bail!("link: can't link {a:?} to itself");
        }
        for (room, pos) in [(a, a_pos), (b, b_pos)] {
            let Some(r) = self.inner.rooms.get(room) else {
                bail!("link: unknown room {room:?}");
            };
            if !r.contains(pos) {
                bail!("link: {pos} is outside room {room:?}");
            }
        }

        if let Some(r) = self.inner.rooms.get_mut(a) {
            r.add_portal(b, a_pos);
        }
        if let Some(r) = self.inner.rooms.get_mut(b) {
            r.add_portal(a, b_pos);
        }
        Ok(())
    }

    pub fn set_player(&mut self, e: Entity) -> Result<()> {
        let room = self
            .loc(e)
            .with_context(|| format!("set_player: {e} is not placed"))?
            .room
            .clone();
        self.inner.player = Some(e);
        if !self.inner.party.contains(&e) {
            self.inner.party.insert(0, e);
        }
        self.set_focus(&room)
    }

    pub fn set_plot(&mut self, plot: Plot) {
        self.inner.plot = plot;
    }

    /// Check that the world is in a playable state.
    pub fn validate(&self) -> Result<()> {
        let Some(player) = self.inner.player else {
            bail!("validate: no player");
        };
        let loc = self
            .loc(player)
            .context("validate: player is not placed")?;
        if loc.room != self.inner.focus {
            bail!(
                "validate: focus {:?} is not player's room {:?}",
                self.inner.focus,
                loc.room
            );
        }

        for e in &self.inner.party {
            if !self.inner.bodies.contains_key(e) {
                bail!("validate: unknown party member {e}");
            }
        }

        for (name, room) in &self.inner.rooms {
            for (dest, _) in room.portals() {
                let Some(other) = self.inner.rooms.get(dest) else {
                    bail!("validate: {name:?} has portal to unknown {dest:?}");
                };
                if other.portal_to(name).is_none() {
                    bail!("validate: {dest:?} has no portal back to {name:?}");
                }
            }
        }

        Ok(())
    }

    fn rebuild_indices(&mut self) -> Result<()> {
        self.placement.clear();
        self.uniques.clear();

        for (name, room) in &self.inner.rooms {
            if room.name() != name {
                bail!("room {:?} stored as {name:?}", room.name());
            }
            for (e, pos) in room.iter() {
                if !self.inner.bodies.contains_key(&e) {
                    bail!("room {name:?} has unknown entity {e}");
                }
                if self
                    .placement
                    .insert(e, Location::new(name.clone(), pos))
                    .is_some()
                {
                    bail!("entity {e} is placed twice");
                }
            }
        }

        for (&e, body) in &self.inner.bodies {
            if e.0 >= self.inner.next_id {
                bail!("entity {e} is past the id counter");
            }
            if let Some(id) = &body.id {
                if self.uniques.insert(id.clone(), e).is_some() {
                    bail!("duplicate unique id {id:?}");
                }
            }
        }

        Ok(())
    }
}

// Queries.
impl World {
    /// The room the player is in.
    pub fn focus(&self) -> Option<&Room> {
        self.inner.rooms.get(&self.inner.focus)
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.inner.rooms.get(name)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.inner.rooms.values()
    }

    pub fn body(&self, e: Entity) -> Option<&Body> {
        self.inner.bodies.get(&e)
    }

    pub fn loc(&self, e: Entity) -> Option<&Location> {
        self.placement.get(&e)
    }

    /// Look up an entity by its unique id.
    pub fn unique(&self, id: &str) -> Option<Entity> {
        self.uniques.get(id).copied()
    }

    pub fn entities_at(&self, room: &str, pos: IVec2) -> Vec<Entity> {
        self.room(room)
            .map(|r| r.entities_at(pos).collect())
            .unwrap_or_default()
    }

    /// Whether the position is inside the room and every entity there is
    /// walkable.
    pub fn is_walkable(&self, room: &str, pos: IVec2) -> bool {
        let Some(r) = self.room(room) else {
            return false;
        };
        r.contains(pos) && r.entities_at(pos).all(|e| e.is_walkable(self))
    }

    pub fn player(&self) -> Option<Entity> {
        self.inner.player
    }

    pub fn party(&self) -> &[Entity] {
        &self.inner.party
    }

    pub fn plot(&self) -> &Plot {
        &self.inner.plot
    }

    pub fn infobox(&self) -> &InfoBox {
        &self.inner.infobox
    }

    pub fn infobox_mut(&mut self) -> &mut InfoBox {
        &mut self.inner.infobox
    }

    pub fn status(&self) -> &ScenarioStatus {
        &self.inner.status
    }

    pub fn is_over(&self) -> bool {
        self.inner.status.is_over()
    }
}

// Operations.
impl World {
    pub fn set_focus(&mut self, room: &str) -> Result<()> {
        if !self.inner.rooms.contains_key(room) {
            bail!("set_focus: unknown room {room:?}");
        }
        log::info!("focus on {room}");
        self.inner.focus = room.to_owned();
        Ok(())
    }

    /// Turn an entity towards `step` and move it there if the way is clear.
    /// Return whether the entity moved.
    pub fn step_entity(&mut self, e: Entity, step: IVec2) -> bool {
        let Some(body) = self.inner.bodies.get_mut(&e) else {
            return false;
        };
        body.facing = step.signum();

        let Some(loc) = self.placement.get(&e).cloned() else {
            return false;
        };
        let dest = loc.xy() + step;
        if !self.is_walkable(&loc.room, dest) {
            return false;
        }
        self.relocate(e, &loc.room, dest, Some(loc.z()));
        true
    }

    /// Move an entity through the portal at `pos` in its current room.
    pub fn portal_entity(&mut self, e: Entity, pos: IVec2) -> Result<()> {
        let loc = self
            .loc(e)
            .with_context(|| format!("portal_entity: {e} is not placed"))?
            .clone();
        let dest = self
            .room(&loc.room)
            .and_then(|r| r.portal_at(pos))
            .with_context(|| {
                format!("portal_entity: no portal at {pos} in {:?}", loc.room)
            })?
            .to_owned();
        let dest_pos = self
            .room(&dest)
            .and_then(|r| r.portal_to(&loc.room))
            .with_context(|| {
                format!("portal_entity: no way back from {dest:?}")
            })?;

        self.relocate(e, &dest, dest_pos, Some(loc.z()));
        Ok(())
    }

    /// Step the player, and take any portal the player steps on.
    pub fn step_player(&mut self, step: IVec2) -> bool {
        let Some(player) = self.inner.player else {
            return false;
        };
        if !self.step_entity(player, step) {
            return false;
        }

        let Some(loc) = self.loc(player) else {
            return true;
        };
        let pos = loc.xy();
        if self
            .room(&loc.room)
            .is_some_and(|r| r.portal_at(pos).is_some())
        {
            if let Err(err) = self.portal_player(pos) {
                log::warn!("step_player: {err}");
            }
        }
        true
    }

    /// Move the player through a portal and follow along to the new room.
    pub fn portal_player(&mut self, pos: IVec2) -> Result<()> {
        let player = self.inner.player.context("portal_player: no player")?;
        self.portal_entity(player, pos)?;
        let room = self
            .loc(player)
            .context("portal_player: player got lost")?
            .room
            .clone();
        self.set_focus(&room)
    }

    /// Activate everything in the cell the player is facing.
    pub fn interact(&mut self) {
        let Some(player) = self.inner.player else {
            return;
        };
        let Some(loc) = self.loc(player) else {
            return;
        };
        let target = loc.xy() + player.facing(self);
        // Snapshot, actions may move things around.
        let targets = self.entities_at(&loc.room.clone(), target);
        for e in targets {
            self.activate(e);
        }
    }

    /// Run the action of an entity.
    pub fn activate(&mut self, e: Entity) {
        let Some(mut action) =
            self.inner.bodies.get_mut(&e).and_then(|b| b.action.take())
        else {
            return;
        };
        log::debug!("activating {e} {:?}", e.name(self));
        let next = action.perform(self, e).unwrap_or(action);
        // The entity may have been despawned while acting.
        if let Some(body) = self.inner.bodies.get_mut(&e) {
            if body.action.is_none() {
                body.action = Some(next);
            }
        }
    }

    /// Set plot flags and carry out any plot developments.
    pub fn update_plot(
        &mut self,
        flags: impl IntoIterator<Item = impl Into<String>>,
    ) {
        let effects = self.inner.plot.update(flags);
        if effects.is_empty() {
            return;
        }
        let Some(player) = self.inner.player else {
            log::warn!("update_plot: no player to carry out plot effects");
            return;
        };
        for mut effect in effects {
            effect.perform(self, player);
        }
    }

    pub fn join_party(&mut self, e: Entity) {
        if self.inner.party.contains(&e) || !self.inner.bodies.contains_key(&e)
        {
            return;
        }
        self.inner.party.push(e);
        let msg = format!("{} joins the party.", e.name(self).capitalize());
        self.inner.infobox.write(&msg);
    }

    pub fn end_game(&mut self, status: ScenarioStatus) {
        if self.is_over() {
            return;
        }
        log::info!("game over: {status:?}");
        self.inner.status = status;
    }

    /// Apply player input. Return whether the input did anything.
    pub fn command(&mut self, cmd: Command) -> bool {
        if self.is_over() {
            return false;
        }

        if self.inner.infobox.is_paging() {
            return cmd == Command::Interact && self.inner.infobox.scroll();
        }
        // Whatever was on display has been read by now.
        self.inner.infobox.scroll();

        match cmd {
            Command::Step(dir) => self.step_player(dir),
            Command::Interact => {
                self.interact();
                true
            }
        }
    }

    fn relocate(
        &mut self,
        e: Entity,
        room: &str,
        pos: IVec2,
        z: Option<usize>,
    ) {
        self.unplace(e);
        let Some(r) = self.inner.rooms.get_mut(room) else {
            return;
        };
        r.add(e, pos, z);

        // Entities above may have been bumped up.
        for (z, slot) in r.stack(pos).iter().enumerate() {
            if let Some(e) = slot {
                self.placement
                    .insert(*e, Location::new(room, pos.extend(z as i32)));
            }
        }
    }

    fn unplace(&mut self, e: Entity) {
        let Some(loc) = self.placement.remove(&e) else {
            return;
        };
        if let Some(r) = self.inner.rooms.get_mut(&loc.room) {
            r.pop(loc.xy(), loc.z());
        }
    }
}

#[cfg(test)]
mod test {
    use glam::{ivec2, ivec3};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Action, Trigger};

    fn legend() -> Legend {
        Legend::from_iter([
            ('#', vec![Body::new("wall", '#')]),
            ('.', vec![Body::new("floor", '.').walkable()]),
            ('>', vec![Body::new("stairs", '>').walkable()]),
            (
                '@',
                vec![
                    Body::new("floor", '.').walkable(),
                    Body::new("hero", '@').unique("player"),
                ],
            ),
            (
                'g',
                vec![
                    Body::new("floor", '.').walkable(),
                    Body::new("guard", 'g').unique("guard").acting(
                        Action::iter([
                            Action::talk("Halt!"),
                            Action::talk("Move along."),
                        ]),
                    ),
                ],
            ),
        ])
    }

    fn world() -> World {
        let mut w = World::new(40, 3);
        w.add_ascii_room(
            "hall",
            "
            #####
            #@.g#
            #..>#
            #####",
            &legend(),
        )
        .unwrap();
        w.add_ascii_room(
            "yard",
            "
            ...
            .>.",
            &legend(),
        )
        .unwrap();
        w.link("hall", [3, 2], "yard", [1, 1]).unwrap();
        let player = w.unique("player").unwrap();
        w.set_player(player).unwrap();
        w.validate().unwrap();
        w
    }

    #[test]
    fn ascii_rooms() {
        let w = world();
        let hall = w.room("hall").unwrap();
        assert_eq!(hall.size(), ivec2(5, 4));
        assert_eq!(w.room("yard").unwrap().size(), ivec2(3, 2));

        let player = w.player().unwrap();
        assert_eq!(w.loc(player), Some(&Location::new("hall", [1, 1, 1])));
        assert_eq!(w.focus().map(Room::name), Some("hall"));
        assert_eq!(w.party(), &[player]);

        assert!(!w.is_walkable("hall", ivec2(0, 0)));
        assert!(w.is_walkable("hall", ivec2(2, 1)));
        assert!(!w.is_walkable("hall", ivec2(3, 1)));
        assert!(!w.is_walkable("hall", ivec2(-1, 1)));

        let mut w2 = World::default();
        assert!(w2.add_ascii_room("bad", "x", &legend()).is_err());
    }

    #[test]
    fn construction_errors() {
        let mut w = world();
        assert!(w.add_room(Room::new("hall", [1, 1])).is_err());
        assert!(w.spawn(Body::new("clone", '@').unique("player")).is_err());
        assert!(w.link("hall", [0, 0], "nowhere", [0, 0]).is_err());
        assert!(w.link("hall", [9, 9], "yard", [0, 0]).is_err());
        assert!(w.spawn_at(Body::new("x", 'x'), "hall", [9, 9]).is_err());
        assert!(World::default().validate().is_err());
    }

    #[test]
    fn one_way_portals() {
        let mut w = world();
        w.add_room(Room::new("cellar", [2, 2])).unwrap();
        w.inner
            .rooms
            .get_mut("hall")
            .unwrap()
            .add_portal("cellar", ivec2(3, 1));
        let err = w.validate().unwrap_err();
        assert!(err.to_string().contains("no portal back"));

        let mut w = world();
        w.inner
            .rooms
            .get_mut("yard")
            .unwrap()
            .add_portal("attic", ivec2(0, 0));
        let err = w.validate().unwrap_err();
        assert!(err.to_string().contains("unknown \"attic\""));
    }

    #[test]
    fn stepping() {
        let mut w = world();
        let player = w.player().unwrap();

        // Blocked by wall, but turns to face it.
        assert!(!w.step_player(ivec2(0, -1)));
        assert_eq!(player.facing(&w), ivec2(0, -1));
        assert_eq!(w.loc(player).unwrap().xy(), ivec2(1, 1));

        assert!(w.step_player(ivec2(1, 0)));
        assert_eq!(player.facing(&w), ivec2(1, 0));
        assert_eq!(w.loc(player), Some(&Location::new("hall", [2, 1, 1])));

        // Guard blocks the way.
        assert!(!w.step_player(ivec2(1, 0)));
    }

    #[test]
    fn portals() {
        let mut w = world();
        let player = w.player().unwrap();

        assert!(w.step_player(ivec2(0, 1)));
        assert!(w.step_player(ivec2(1, 0)));
        assert!(w.step_player(ivec2(1, 0)));
        // Stepped on the stairs and went through.
        assert_eq!(w.loc(player), Some(&Location::new("yard", [1, 1, 1])));
        assert_eq!(w.focus().map(Room::name), Some("yard"));

        // Walking off and back on takes the player back.
        assert!(w.step_player(ivec2(-1, 0)));
        assert!(w.step_player(ivec2(1, 0)));
        assert_eq!(w.loc(player).map(|l| l.room.as_str()), Some("hall"));
        assert!(w.portal_player(ivec2(0, 0)).is_err());
    }

    #[test]
    fn interaction() {
        let mut w = world();
        let guard = w.unique("guard").unwrap();

        assert!(w.command(Command::Step(ivec2(1, 0))));
        // Bump into guard to face it.
        assert!(!w.command(Command::Step(ivec2(1, 0))));
        assert!(w.command(Command::Interact));
        assert!(w.command(Command::Interact));
        assert!(w.command(Command::Interact));

        let log: Vec<&str> =
            w.infobox().history().iter().map(String::as_str).collect();
        assert_eq!(
            log,
            vec![
                "> guard: Halt!",
                "> guard: Move along.",
                "> guard: Move along."
            ]
        );
        // Action progress is kept.
        assert!(matches!(
            w.body(guard).and_then(|b| b.action.as_ref()),
            Some(Action::Iter { pos: 2, .. })
        ));

        // Facing a wall does nothing.
        w.step_player(ivec2(0, -1));
        w.interact();
        assert_eq!(w.infobox().history().len(), 3);
    }

    #[test]
    fn reset_action_sticks() {
        let mut w = world();
        let guard = w.unique("guard").unwrap();
        w.inner.bodies.get_mut(&guard).unwrap().action =
            Some(Action::sequence([
                Action::alert("click"),
                Action::reset(Action::looping([
                    Action::alert("a"),
                    Action::alert("b"),
                ])),
            ]));

        w.activate(guard);
        w.activate(guard);
        w.activate(guard);
        let log: Vec<&str> =
            w.infobox().history().iter().map(String::as_str).collect();
        assert_eq!(log, vec!["> click", "> a", "> b", "> a"]);
    }

    #[test]
    fn plot_effects() {
        let mut w = world();
        let guard = w.unique("guard").unwrap();
        let ending = Trigger::new(["bribed"], Action::Victory("You win.".into()));
        w.set_plot(Plot::new(
            Vec::<String>::new(),
            [Trigger::new(["bribed"], Action::alert("The guard relents."))
                .then([ending])],
        ));

        w.update_plot(["bribed"]);
        assert!(w.is_over());
        assert_eq!(w.status(), &ScenarioStatus::Won("You win.".into()));
        assert_eq!(
            w.infobox().history().last().map(String::as_str),
            Some("> The guard relents.")
        );

        // No input gets through after the game is over.
        assert!(!w.command(Command::Interact));

        w.join_party(guard);
        assert_eq!(w.party().len(), 2);
        w.join_party(guard);
        assert_eq!(w.party().len(), 2);
    }

    #[test]
    fn paging_blocks_commands() {
        let mut w = world();
        let player = w.player().unwrap();
        for i in 0..5 {
            w.infobox_mut().write(&format!("line {i}"));
        }
        assert!(w.infobox().is_paging());
        assert!(!w.command(Command::Step(ivec2(1, 0))));
        assert_eq!(w.loc(player).unwrap().xy(), ivec2(1, 1));

        assert!(w.command(Command::Interact));
        assert!(!w.infobox().is_paging());
        assert!(w.command(Command::Step(ivec2(1, 0))));
    }

    #[test]
    fn stack_bumping() {
        let mut w = world();
        let rug = Body::new("rug", '~').walkable();
        let coin = Body::new("coin", '$').walkable();
        let e1 = w.spawn_at(rug, "yard", [0, 0]).unwrap();
        let e2 = w.spawn_at(coin, "yard", [0, 0]).unwrap();
        let e3 = w.spawn(Body::new("dust", ',').walkable()).unwrap();
        // Insert in the middle, coin gets bumped up.
        w.place(e3, "yard", [0, 0], Some(1)).unwrap();

        assert_eq!(w.loc(e1).unwrap().pos, ivec3(0, 0, 1));
        assert_eq!(w.loc(e3).unwrap().pos, ivec3(0, 0, 2));
        assert_eq!(w.loc(e2).unwrap().pos, ivec3(0, 0, 3));

        assert_eq!(w.despawn(e3).map(|b| b.name), Some("dust".into()));
        assert_eq!(w.loc(e3), None);
        assert_eq!(w.entities_at("yard", ivec2(0, 0)).len(), 3);
    }

    #[test]
    fn serialization() {
        let mut w = world();
        w.step_player(ivec2(1, 0));
        w.interact();

        let json = serde_json::to_string(&w).unwrap();
        let w2: World = serde_json::from_str(&json).unwrap();
        w2.validate().unwrap();
        let player = w2.player().unwrap();
        assert_eq!(w2.loc(player), w.loc(player));
        assert_eq!(w2.unique("guard"), w.unique("guard"));
        assert_eq!(w2.infobox(), w.infobox());
        assert_eq!(w2.plot(), w.plot());
    }
}
