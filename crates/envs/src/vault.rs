//! # Vault Task
//!
//! The four-room ring plus a treasure chamber behind a locked gate. The
//! agent must fetch the key from the wood room, use it on the vault door
//! from the rock room, then walk through and pick up the gold. Commands
//! arrive as [`Directive`]s: either raw primitive actions or skills that
//! expand into bounded runs of steering decisions.

use crate::env::{Env, EnvStep, SkillTrace, StepInfo};
use crate::lockbox::four_room_ring;
use crate::skills::{nearest_chamber, next_hallway, steer_toward, Directive, Rotation, Skill};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use world::{
    Action, AgentSpawn, Color, EntityId, EntityKind, Event, Observation, Opening, RoomKind,
    TickInfo, Vec3, World, WorldConfig, WorldError,
};

/// Ticks granted to the fixed forward burst.
pub const FORWARD_BURST_TICKS: usize = 10;
/// Ticks granted to a steering skill before it gives up.
pub const STEER_TICKS: usize = 40;
/// Forward pushes appended after the hallway approach.
pub const HALLWAY_PUSH_TICKS: usize = 3;

/// The gold-behind-the-gate task.
pub struct VaultEnv {
    /// Underlying world, exposed for harnesses and probes.
    pub world: World,
    /// Key that opens the vault door.
    pub key_id: EntityId,
    /// The locked vault door.
    pub door_id: EntityId,
    /// The gold box in the treasure room.
    pub gold_id: EntityId,
    /// Chamber fronting the gate; the vault-door skill only engages there.
    pub door_room: usize,
    /// The gate passage itself.
    pub gate_room: usize,
    start: World,
}

impl VaultEnv {
    /// Build the ring plus the treasure chamber and its guarded gate.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        let mut world = World::new(config);
        let [room0, _, _, room3] = four_room_ring(&mut world)?;
        let room4 = world.add_rect_room(-7.0, -1.0, -15.0, -9.0, "stucco", "room4");
        let gate_room = world.connect_rooms(
            room4,
            room3,
            Opening::AlongX { min_x: -5.0, max_x: -3.0 },
            2.2,
            RoomKind::Gate,
            "vault_door",
        )?;
        let key_id = world.place_entity(
            EntityKind::Key { color: Color::Yellow },
            Vec3::new(5.0, 0.8, -5.0),
            0.0,
        );
        let door_id = world.place_entity(EntityKind::Door, Vec3::new(-4.0, 0.0, -8.0), FRAC_PI_2);
        let gold_id = world.place_entity(
            EntityKind::Box { color: Color::Gold, size: 0.5 },
            Vec3::new(-4.0, 0.9, -12.0),
            0.0,
        );
        world.place_agent(room0, &AgentSpawn::pinned(-5.0, 5.0, FRAC_PI_4));
        let start = world.clone();
        Ok(Self {
            world,
            key_id,
            door_id,
            gold_id,
            door_room: room3,
            gate_room,
            start,
        })
    }

    /// Advance the engine one tick, apply the task hooks, and record the
    /// outcome. Returns whether the episode ended on this tick.
    fn tick(&mut self, action: Action, trace: &mut SkillTrace) -> bool {
        let mut tick = self.world.step(action);

        // Keys live on stands; a drop that left the key on the floor puts
        // it back at stand height.
        if action == Action::Drop {
            if let Some(key) = self.world.entity_mut(self.key_id) {
                if key.pos.y < 0.5 {
                    key.pos.y = 0.8;
                }
            }
        }
        // Using the key on the door consumes both and opens the gate.
        if action == Action::Toggle
            && self.world.agent.carrying == Some(self.key_id)
            && self.world.near(self.key_id, self.door_id)
        {
            self.world.remove_entity(self.key_id);
            self.world.remove_entity(self.door_id);
            tick.info.events.push(Event::Removed(self.key_id));
            tick.info.events.push(Event::Removed(self.door_id));
            tracing::info!("vault door unlocked at tick {}", self.world.step_count);
        }
        // Collecting the gold ends the episode with the completion reward.
        if action == Action::Pickup && self.world.agent.carrying == Some(self.gold_id) {
            tick.reward += self.world.completion_reward();
            tick.done = true;
            self.world.done = true;
            tracing::info!("gold collected at tick {}", self.world.step_count);
        }

        let done = tick.done;
        trace.actions.push(action);
        trace.observations.push(tick.obs);
        trace.rewards.push(tick.reward);
        trace.dones.push(done);
        trace.infos.push(tick.info);
        done
    }

    fn go_to_room_center(&mut self, trace: &mut SkillTrace) {
        for _ in 0..STEER_TICKS {
            let Some(room) = nearest_chamber(&self.world) else { break };
            let target = self.world.rooms[room].mid();
            let Some(action) = steer_toward(target, &self.world.agent).action() else { break };
            if self.tick(action, trace) {
                break;
            }
        }
    }

    fn go_to_hallway(&mut self, rotation: Rotation, trace: &mut SkillTrace) {
        for _ in 0..STEER_TICKS {
            let Some(hall) = next_hallway(&self.world, rotation) else { break };
            let target = self.world.rooms[hall].mid();
            let Some(action) = steer_toward(target, &self.world.agent).action() else { break };
            if self.tick(action, trace) {
                break;
            }
        }
    }

    fn go_to_vault_door(&mut self, trace: &mut SkillTrace) {
        for _ in 0..STEER_TICKS {
            // Only engages from the chamber fronting the gate.
            if nearest_chamber(&self.world) != Some(self.door_room) {
                break;
            }
            let target = self.world.rooms[self.gate_room].mid();
            let Some(action) = steer_toward(target, &self.world.agent).action() else { break };
            if self.tick(action, trace) {
                break;
            }
        }
    }
}

impl Env for VaultEnv {
    type Cmd = Directive;

    fn reset(&mut self) -> Observation {
        self.world = self.start.clone();
        self.world.observe()
    }

    fn step(&mut self, cmd: Directive) -> EnvStep {
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

        let mut trace = SkillTrace::default();
        match cmd {
            Directive::Primitive(action) => {
                self.tick(action, &mut trace);
            }
            Directive::Skill(Skill::ForwardBurst) => {
                for _ in 0..FORWARD_BURST_TICKS {
                    if self.tick(Action::MoveForward, &mut trace) {
                        break;
                    }
                }
            }
            Directive::Skill(Skill::RoomCenter) => self.go_to_room_center(&mut trace),
            Directive::Skill(Skill::NextHallway(rotation)) => {
                self.go_to_hallway(rotation, &mut trace);
                if !self.world.done {
                    for _ in 0..HALLWAY_PUSH_TICKS {
                        if self.tick(Action::MoveForward, &mut trace) {
                            break;
                        }
                    }
                }
            }
            Directive::Skill(Skill::VaultDoor) => self.go_to_vault_door(&mut trace),
        }

        // A directive that expanded to nothing still burns one tick, so the
        // caller always gets a fresh observation and time advances.
        if trace.is_empty() {
            self.tick(Action::Noop, &mut trace);
        }

        let reward = trace.rewards.iter().sum();
        let done = self.world.done;
        let observation = trace
            .observations
            .last()
            .map_or_else(|| self.world.observe(), Clone::clone);
        let info = if trace.len() == 1 {
            StepInfo::Single(trace.infos.swap_remove(0))
        } else {
            tracing::debug!("directive expanded into {} ticks", trace.len());
            StepInfo::Trace(trace)
        };
        EnvStep { observation, reward, done, info }
    }

    fn action_count(&self) -> usize {
        13
    }

    fn is_done(&self) -> bool {
        self.world.done
    }
}
