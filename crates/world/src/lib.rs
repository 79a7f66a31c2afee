#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Room-World Engine
//!
//! A small discrete-time world of connected rectangular rooms, built for
//! task environments that step an agent with primitive actions. The agent
//! turns in fixed increments, walks in fixed strides, and can pick up,
//! carry, and drop entities scattered over the floor plan.
//!
//! ## Key Components
//!
//! - [`World`]: the simulation container; owns rooms, entities, the agent,
//!   and the tick counter.
//! - [`Action`]: the primitive action set applied one tick at a time.
//! - [`FloorPlan`]: JSON floor plan loader for building worlds from data.
//! - [`WorldConfig`]: stride, turn, reach, and truncation parameters.
//!
//! ## Usage
//!
//! ```ignore
//! let mut world = World::new(WorldConfig::default());
//! let room = world.add_rect_room(-5.0, 5.0, -5.0, 5.0, "concrete", "main");
//! world.place_agent(room, &AgentSpawn::default());
//! let tick = world.step(Action::MoveForward);
//! ```

pub mod builder;
pub mod plan;
pub mod simulation;
pub mod types;

pub use builder::Opening;
pub use plan::FloorPlan;
pub use simulation::{World, WorldError};
pub use types::{
    Action, Agent, AgentSpawn, Color, Entity, EntityId, EntityKind, EntitySnapshot, Event,
    Observation, Room, RoomKind, Tick, TickInfo, Vec3, WorldConfig,
};
