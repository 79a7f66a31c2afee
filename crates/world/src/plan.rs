//! # Floor Plans
//!
//! JSON descriptions of a world: rooms by name, openings between them,
//! entity placements, and the agent spawn. A plan is parsed first and then
//! resolved against the builder, so a bad room reference surfaces as a
//! [`WorldError`] rather than a panic.

use crate::builder::Opening;
use crate::simulation::{World, WorldError};
use crate::types::{AgentSpawn, Color, EntityKind, RoomKind, Vec3, WorldConfig};
use serde::Deserialize;
use std::collections::HashMap;

/// Top-level floor plan document.
#[derive(Debug, Deserialize)]
pub struct FloorPlan {
    pub rooms: Vec<RoomDef>,
    #[serde(default)]
    pub openings: Vec<OpeningDef>,
    #[serde(default)]
    pub entities: Vec<EntityDef>,
    pub agent: SpawnDef,
}

/// One named rectangular room.
#[derive(Debug, Deserialize)]
pub struct RoomDef {
    pub name: String,
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    #[serde(default = "default_tex")]
    pub wall_tex: String,
}

/// A passage between two rooms referenced by name.
#[derive(Debug, Deserialize)]
pub struct OpeningDef {
    pub from: String,
    pub to: String,
    /// Axis the opening span runs along.
    pub axis: Axis,
    pub span: [f32; 2],
    #[serde(default = "default_max_y")]
    pub max_y: f32,
    #[serde(default = "default_kind")]
    pub kind: RoomKind,
    pub name: String,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Z,
}

/// One entity placement, tagged by kind.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntityDef {
    Key {
        color: Color,
        pos: [f32; 3],
        #[serde(default)]
        dir: f32,
    },
    Box {
        color: Color,
        size: f32,
        pos: [f32; 3],
        #[serde(default)]
        dir: f32,
    },
    Door {
        pos: [f32; 3],
        #[serde(default)]
        dir: f32,
    },
}

/// Agent spawn: a room by name plus optional bounds within it.
#[derive(Debug, Deserialize)]
pub struct SpawnDef {
    pub room: String,
    #[serde(flatten)]
    pub spawn: AgentSpawn,
}

fn default_tex() -> String {
    "concrete".to_string()
}

fn default_max_y() -> f32 {
    2.2
}

fn default_kind() -> RoomKind {
    RoomKind::Hallway
}

impl FloorPlan {
    /// Parse a plan from JSON text.
    pub fn from_str(json: &str) -> Result<Self, WorldError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve the plan into a ready world.
    pub fn into_world(self, config: WorldConfig) -> Result<World, WorldError> {
        let mut world = World::new(config);
        let mut rooms: HashMap<String, usize> = HashMap::new();

        for def in self.rooms {
            let idx = world.add_rect_room(
                def.min_x,
                def.max_x,
                def.min_z,
                def.max_z,
                &def.wall_tex,
                &def.name,
            );
            rooms.insert(def.name, idx);
        }
        for def in self.openings {
            let a = *rooms
                .get(&def.from)
                .ok_or_else(|| WorldError::UnknownRoom(def.from.clone()))?;
            let b = *rooms
                .get(&def.to)
                .ok_or_else(|| WorldError::UnknownRoom(def.to.clone()))?;
            let opening = match def.axis {
                Axis::Z => Opening::AlongZ { min_z: def.span[0], max_z: def.span[1] },
                Axis::X => Opening::AlongX { min_x: def.span[0], max_x: def.span[1] },
            };
            world.connect_rooms(a, b, opening, def.max_y, def.kind, &def.name)?;
        }
        for def in self.entities {
            let (kind, pos, dir) = match def {
                EntityDef::Key { color, pos, dir } => (EntityKind::Key { color }, pos, dir),
                EntityDef::Box { color, size, pos, dir } => {
                    (EntityKind::Box { color, size }, pos, dir)
                }
                EntityDef::Door { pos, dir } => (EntityKind::Door, pos, dir),
            };
            world.place_entity(kind, Vec3::new(pos[0], pos[1], pos[2]), dir);
        }
        let room = *rooms
            .get(&self.agent.room)
            .ok_or_else(|| WorldError::UnknownRoom(self.agent.room.clone()))?;
        world.place_agent(room, &self.agent.spawn);
        Ok(world)
    }
}
