use serde::Deserialize;
use std::ops::{Add, Mul, Sub};

/// Height at which a carried entity is held.
pub const CARRY_HEIGHT: f32 = 0.8;
/// Collision radius of a key entity.
pub const KEY_RADIUS: f32 = 0.3;
/// Collision radius of a door entity.
pub const DOOR_RADIUS: f32 = 0.9;

/// 3D position or displacement in world coordinates.
///
/// The ground plane is x/z; y points up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Entity tint, mostly cosmetic but used to tell keys and boxes apart in logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Gold,
}

/// Primitive action applied to the world for exactly one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Action {
    TurnLeft = 0,
    TurnRight = 1,
    MoveForward = 2,
    MoveBack = 3,
    Pickup = 4,
    Drop = 5,
    Toggle = 6,
    Noop = 7,
}

impl TryFrom<u8> for Action {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::TurnLeft),
            1 => Ok(Action::TurnRight),
            2 => Ok(Action::MoveForward),
            3 => Ok(Action::MoveBack),
            4 => Ok(Action::Pickup),
            5 => Ok(Action::Drop),
            6 => Ok(Action::Toggle),
            7 => Ok(Action::Noop),
            _ => Err("invalid action index (expected 0..7)"),
        }
    }
}

/// Role a room plays in the floor plan. Landmark selection filters on this
/// tag rather than on room names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    /// Habitable room the agent navigates between.
    Chamber,
    /// Connecting passage carved between two chambers.
    Hallway,
    /// Passage guarded by a door; never a navigation landmark.
    Gate,
}

/// Axis-aligned rectangular room.
#[derive(Clone, Debug)]
pub struct Room {
    pub name: String,
    pub kind: RoomKind,
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub wall_tex: String,
    pub max_y: f32,
}

impl Room {
    /// Center of the floor rectangle, at ground level.
    #[must_use]
    pub fn mid(&self) -> Vec3 {
        Vec3::new(
            (self.min_x + self.max_x) / 2.0,
            0.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    /// Whether a point lies inside the floor rectangle.
    #[must_use]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.z >= self.min_z && p.z <= self.max_z
    }
}

/// Stable handle for an entity. Ids are never reused within a world, so a
/// handle stays meaningful after other entities are removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// What an entity is, with the geometry that drives collision and reach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityKind {
    Key { color: Color },
    Box { color: Color, size: f32 },
    Door,
}

impl EntityKind {
    /// Collision radius on the ground plane.
    #[must_use]
    pub fn radius(self) -> f32 {
        match self {
            EntityKind::Key { .. } => KEY_RADIUS,
            EntityKind::Box { size, .. } => size * std::f32::consts::FRAC_1_SQRT_2,
            EntityKind::Door => DOOR_RADIUS,
        }
    }

    /// Whether the agent can pick this entity up.
    #[must_use]
    pub fn portable(self) -> bool {
        !matches!(self, EntityKind::Door)
    }

    /// Whether this entity rejects agent motion into its radius.
    #[must_use]
    pub fn blocks(self) -> bool {
        matches!(self, EntityKind::Door)
    }
}

/// A placed entity.
#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec3,
    pub dir: f32,
}

/// The agent's pose and load.
///
/// `heading` accumulates turn steps without wrapping; bearing math reduces
/// it into (-pi, pi] when comparing against world angles.
#[derive(Clone, Debug)]
pub struct Agent {
    pub pos: Vec3,
    pub heading: f32,
    pub radius: f32,
    pub carrying: Option<EntityId>,
}

impl Agent {
    /// Unit vector the agent is facing. Angles grow toward -z, so heading
    /// zero faces +x and a quarter turn left faces -z.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.heading.cos(), 0.0, -self.heading.sin())
    }
}

/// Tunable simulation parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Distance covered by one forward or backward step.
    pub forward_step: f32,
    /// Angle covered by one turn step, in radians.
    pub turn_step: f32,
    /// Agent collision radius.
    pub agent_radius: f32,
    /// Tick count at which an episode truncates.
    pub max_steps: u32,
    /// Seed for randomized placement.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            forward_step: 0.15,
            turn_step: 15.0_f32.to_radians(),
            agent_radius: 0.4,
            max_steps: 250,
            seed: 0,
        }
    }
}

/// Spawn region for the agent inside a room. Unset bounds fall back to the
/// room rectangle inset by the agent radius; equal bounds pin a coordinate.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AgentSpawn {
    pub min_x: Option<f32>,
    pub max_x: Option<f32>,
    pub min_z: Option<f32>,
    pub max_z: Option<f32>,
    /// Fixed heading, or `None` to sample one.
    pub dir: Option<f32>,
}

impl AgentSpawn {
    /// Spawn at an exact pose.
    #[must_use]
    pub fn pinned(x: f32, z: f32, dir: f32) -> Self {
        Self {
            min_x: Some(x),
            max_x: Some(x),
            min_z: Some(z),
            max_z: Some(z),
            dir: Some(dir),
        }
    }
}

/// Snapshot of one entity inside an [`Observation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec3,
}

/// Full world state as seen after a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub agent_pos: Vec3,
    pub heading: f32,
    pub carrying: Option<EntityId>,
    pub entities: Vec<EntitySnapshot>,
    pub step: u32,
}

/// Notable state change during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    PickedUp(EntityId),
    Dropped(EntityId),
    Removed(EntityId),
}

/// Auxiliary record attached to a tick.
#[derive(Clone, Debug, Default)]
pub struct TickInfo {
    pub step: u32,
    pub events: Vec<Event>,
}

/// Outcome of one engine tick.
#[derive(Clone, Debug)]
pub struct Tick {
    pub obs: Observation,
    pub reward: f32,
    pub done: bool,
    pub info: TickInfo,
}
