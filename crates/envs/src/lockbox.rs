//! # LockBox Task
//!
//! Four chambers around the origin, ring-connected by hallways. A yellow
//! key waits on a stand in the wood room and a locked red box sits in the
//! rock room; carrying the key within reach of the box opens it and ends
//! the episode with the completion reward.

use crate::env::{Env, EnvStep, StepInfo};
use std::f32::consts::FRAC_PI_4;
use world::{
    Action, AgentSpawn, Color, EntityId, EntityKind, Event, Observation, Opening, RoomKind,
    TickInfo, Vec3, World, WorldConfig, WorldError,
};

/// Four 6x6 chambers around the origin, joined by 2-wide hallways into a
/// ring. Returns the chamber indices in placement order.
pub(crate) fn four_room_ring(world: &mut World) -> Result<[usize; 4], WorldError> {
    let room0 = world.add_rect_room(-7.0, -1.0, 1.0, 7.0, "marble", "room0");
    let room1 = world.add_rect_room(1.0, 7.0, 1.0, 7.0, "brick_wall", "room1");
    let room2 = world.add_rect_room(1.0, 7.0, -7.0, -1.0, "wood", "room2");
    let room3 = world.add_rect_room(-7.0, -1.0, -7.0, -1.0, "rock", "room3");
    world.connect_rooms(
        room0,
        room1,
        Opening::AlongZ { min_z: 3.0, max_z: 5.0 },
        2.2,
        RoomKind::Hallway,
        "hall_0_1",
    )?;
    world.connect_rooms(
        room1,
        room2,
        Opening::AlongX { min_x: 3.0, max_x: 5.0 },
        2.2,
        RoomKind::Hallway,
        "hall_1_2",
    )?;
    world.connect_rooms(
        room2,
        room3,
        Opening::AlongZ { min_z: -5.0, max_z: -3.0 },
        2.2,
        RoomKind::Hallway,
        "hall_2_3",
    )?;
    world.connect_rooms(
        room3,
        room0,
        Opening::AlongX { min_x: -5.0, max_x: -3.0 },
        2.2,
        RoomKind::Hallway,
        "hall_3_0",
    )?;
    Ok([room0, room1, room2, room3])
}

/// The key-and-box task over the four-room ring.
pub struct LockBoxEnv {
    /// Underlying world, exposed for harnesses and probes.
    pub world: World,
    /// The key that opens the box.
    pub key_id: EntityId,
    /// The locked box.
    pub box_id: EntityId,
    start: World,
}

impl LockBoxEnv {
    /// Build the ring, place the key and the box, and pin the agent to its
    /// spawn corner facing the room center.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        let mut world = World::new(config);
        let [room0, ..] = four_room_ring(&mut world)?;
        let key_id = world.place_entity(
            EntityKind::Key { color: Color::Yellow },
            Vec3::new(5.0, 0.8, -5.0),
            0.0,
        );
        let box_id = world.place_entity(
            EntityKind::Box { color: Color::Red, size: 1.0 },
            Vec3::new(-5.0, 0.0, -5.0),
            0.0,
        );
        world.place_agent(room0, &AgentSpawn::pinned(-5.0, 5.0, FRAC_PI_4));
        let start = world.clone();
        Ok(Self { world, key_id, box_id, start })
    }
}

impl Env for LockBoxEnv {
    type Cmd = Action;

    fn reset(&mut self) -> Observation {
        self.world = self.start.clone();
        self.world.observe()
    }

    fn step(&mut self, action: Action) -> EnvStep {
        if self.world.done {
            return EnvStep {
                observation: self.world.observe(),
                reward: 0.0,
                done: true,
                info: StepInfo::Single(TickInfo {
                    step: self.world.step_count,
                    events: Vec::new(),
                }),
            };
        }
        let mut tick = self.world.step(action);

        // Whatever is in hand, success means the key reached the box.
        if let Some(carried) = self.world.agent.carrying {
            if self.world.near(self.key_id, self.box_id) {
                self.world.remove_entity(carried);
                tick.info.events.push(Event::Removed(carried));
                tick.reward += self.world.completion_reward();
                tick.done = true;
                self.world.done = true;
                tracing::info!("box unlocked at tick {}", self.world.step_count);
            }
        }
        EnvStep {
            observation: tick.obs,
            reward: tick.reward,
            done: tick.done,
            info: StepInfo::Single(tick.info),
        }
    }

    fn action_count(&self) -> usize {
        3
    }

    fn is_done(&self) -> bool {
        self.world.done
    }
}
