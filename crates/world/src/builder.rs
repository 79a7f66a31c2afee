//! # World Building
//!
//! Methods for assembling a floor plan: rectangular rooms, connecting
//! passages carved between them, and entity and agent placement.

use crate::simulation::{World, WorldError};
use crate::types::{
    AgentSpawn, Entity, EntityId, EntityKind, Room, RoomKind, Vec3,
};

/// Default wall height for chambers.
const ROOM_HEIGHT: f32 = 2.7;

/// Where a connecting passage meets its two rooms.
///
/// `AlongZ` joins rooms separated along x, with the opening spanning a z
/// interval shared by both; `AlongX` is the transpose.
#[derive(Clone, Copy, Debug)]
pub enum Opening {
    AlongZ { min_z: f32, max_z: f32 },
    AlongX { min_x: f32, max_x: f32 },
}

// Floor plan assembly.
impl World {
    /// Add an axis-aligned rectangular chamber and return its index.
    pub fn add_rect_room(
        &mut self,
        min_x: f32,
        max_x: f32,
        min_z: f32,
        max_z: f32,
        wall_tex: &str,
        name: &str,
    ) -> usize {
        self.rooms.push(Room {
            name: name.to_string(),
            kind: RoomKind::Chamber,
            min_x,
            max_x,
            min_z,
            max_z,
            wall_tex: wall_tex.to_string(),
            max_y: ROOM_HEIGHT,
        });
        self.rooms.len() - 1
    }

    /// Carve a passage between two disjoint rooms and return its index.
    ///
    /// The passage fills the gap between the facing walls across the full
    /// opening span, so it is itself a room the agent can stand in. The
    /// rooms must leave a strictly positive gap along the crossing axis and
    /// the span must lie inside both room rectangles.
    pub fn connect_rooms(
        &mut self,
        a: usize,
        b: usize,
        opening: Opening,
        max_y: f32,
        kind: RoomKind,
        name: &str,
    ) -> Result<usize, WorldError> {
        let rect = match opening {
            Opening::AlongZ { min_z, max_z } => {
                let ra = &self.rooms[a];
                let rb = &self.rooms[b];
                if min_z >= max_z {
                    return Err(WorldError::InvalidOpening("opening span is empty"));
                }
                if min_z < ra.min_z.max(rb.min_z) || max_z > ra.max_z.min(rb.max_z) {
                    return Err(WorldError::InvalidOpening(
                        "opening span not contained in both rooms",
                    ));
                }
                let (lo, hi) = if ra.max_x <= rb.min_x { (ra, rb) } else { (rb, ra) };
                if lo.max_x >= hi.min_x {
                    return Err(WorldError::InvalidOpening("no gap between rooms along x"));
                }
                (lo.max_x, hi.min_x, min_z, max_z)
            }
            Opening::AlongX { min_x, max_x } => {
                let ra = &self.rooms[a];
                let rb = &self.rooms[b];
                if min_x >= max_x {
                    return Err(WorldError::InvalidOpening("opening span is empty"));
                }
                if min_x < ra.min_x.max(rb.min_x) || max_x > ra.max_x.min(rb.max_x) {
                    return Err(WorldError::InvalidOpening(
                        "opening span not contained in both rooms",
                    ));
                }
                let (lo, hi) = if ra.max_z <= rb.min_z { (ra, rb) } else { (rb, ra) };
                if lo.max_z >= hi.min_z {
                    return Err(WorldError::InvalidOpening("no gap between rooms along z"));
                }
                (min_x, max_x, lo.max_z, hi.min_z)
            }
        };
        let wall_tex = self.rooms[a].wall_tex.clone();
        self.rooms.push(Room {
            name: name.to_string(),
            kind,
            min_x: rect.0,
            max_x: rect.1,
            min_z: rect.2,
            max_z: rect.3,
            wall_tex,
            max_y,
        });
        Ok(self.rooms.len() - 1)
    }

    /// Place an entity at an exact position and return its handle.
    pub fn place_entity(&mut self, kind: EntityKind, pos: Vec3, dir: f32) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.push(Entity { id, kind, pos, dir });
        id
    }

    /// Place an entity at a sampled spot inside a room, inset by its radius.
    pub fn place_entity_in(&mut self, kind: EntityKind, room: usize) -> EntityId {
        let r = kind.radius();
        let (lo_x, hi_x, lo_z, hi_z) = {
            let rm = &self.rooms[room];
            (rm.min_x + r, rm.max_x - r, rm.min_z + r, rm.max_z - r)
        };
        let x = sample(&mut self.rng, lo_x, hi_x);
        let z = sample(&mut self.rng, lo_z, hi_z);
        let dir = self.rng.f32() * std::f32::consts::TAU;
        self.place_entity(kind, Vec3::new(x, 0.0, z), dir)
    }

    /// Put the agent somewhere inside a room, within the given spawn bounds.
    pub fn place_agent(&mut self, room: usize, spawn: &AgentSpawn) {
        let r = self.agent.radius;
        let (lo_x, hi_x, lo_z, hi_z) = {
            let rm = &self.rooms[room];
            (
                spawn.min_x.unwrap_or(rm.min_x + r),
                spawn.max_x.unwrap_or(rm.max_x - r),
                spawn.min_z.unwrap_or(rm.min_z + r),
                spawn.max_z.unwrap_or(rm.max_z - r),
            )
        };
        let x = sample(&mut self.rng, lo_x, hi_x);
        let z = sample(&mut self.rng, lo_z, hi_z);
        self.agent.pos = Vec3::new(x, 0.0, z);
        self.agent.heading = match spawn.dir {
            Some(dir) => dir,
            None => self.rng.f32() * std::f32::consts::TAU,
        };
    }
}

fn sample(rng: &mut fastrand::Rng, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        lo
    } else {
        lo + rng.f32() * (hi - lo)
    }
}
