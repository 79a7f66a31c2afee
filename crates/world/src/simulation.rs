//! # Simulation Core
//!
//! Holds the [`World`] container and the per-tick stepping logic: turning,
//! collision-checked motion, pickup and drop, episode truncation, and the
//! observation built at the end of every tick.

use crate::types::{
    Action, Agent, Entity, EntityId, EntitySnapshot, Event, Observation, Room, Tick, TickInfo,
    Vec3, WorldConfig, CARRY_HEIGHT,
};
use thiserror::Error;

/// World construction and floor plan errors.
#[derive(Error, Debug)]
pub enum WorldError {
    #[error("invalid opening: {0}")]
    InvalidOpening(&'static str),
    #[error("unknown room: {0}")]
    UnknownRoom(String),
    #[error("floor plan parse error: {0}")]
    BadPlan(#[from] serde_json::Error),
}

/// Complete state of one episode: the floor plan, the entities on it, the
/// agent, and the tick counter.
///
/// Cloning a `World` snapshots the episode; environments keep a clone of
/// their freshly built state and restore it on reset.
#[derive(Clone, Debug)]
pub struct World {
    pub config: WorldConfig,
    pub rooms: Vec<Room>,
    pub entities: Vec<Entity>,
    pub agent: Agent,
    pub step_count: u32,
    pub done: bool,
    pub(crate) next_entity_id: u32,
    pub(crate) rng: fastrand::Rng,
}

impl World {
    /// Empty world with no rooms or entities.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let agent = Agent {
            pos: Vec3::ZERO,
            heading: 0.0,
            radius: config.agent_radius,
            carrying: None,
        };
        let rng = fastrand::Rng::with_seed(config.seed);
        Self {
            config,
            rooms: Vec::new(),
            entities: Vec::new(),
            agent,
            step_count: 0,
            done: false,
            next_entity_id: 0,
            rng,
        }
    }

    /// Apply one primitive action and advance the simulation one tick.
    ///
    /// Once `done` is set, further calls freeze the world: they return the
    /// current state with zero reward and do not advance the tick counter.
    pub fn step(&mut self, action: Action) -> Tick {
        if self.done {
            return Tick {
                obs: self.observe(),
                reward: 0.0,
                done: true,
                info: TickInfo { step: self.step_count, events: Vec::new() },
            };
        }
        self.step_count += 1;
        let mut events = Vec::new();

        match action {
            Action::TurnLeft => self.agent.heading += self.config.turn_step,
            Action::TurnRight => self.agent.heading -= self.config.turn_step,
            Action::MoveForward => self.try_move(1.0),
            Action::MoveBack => self.try_move(-1.0),
            Action::Pickup => self.pick_up(&mut events),
            Action::Drop => self.drop_carried(&mut events),
            Action::Toggle | Action::Noop => {}
        }
        self.settle_carried();

        if self.step_count >= self.config.max_steps {
            self.done = true;
        }
        Tick {
            obs: self.observe(),
            reward: 0.0,
            done: self.done,
            info: TickInfo { step: self.step_count, events },
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn observe(&self) -> Observation {
        Observation {
            agent_pos: self.agent.pos,
            heading: self.agent.heading,
            carrying: self.agent.carrying,
            entities: self
                .entities
                .iter()
                .map(|e| EntitySnapshot { id: e.id, kind: e.kind, pos: e.pos })
                .collect(),
            step: self.step_count,
        }
    }

    /// Look up an entity by id.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Mutable lookup by id.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Whether two entities sit within interaction reach of each other.
    /// Missing entities are never near anything.
    #[must_use]
    pub fn near(&self, a: EntityId, b: EntityId) -> bool {
        match (self.entity(a), self.entity(b)) {
            (Some(ea), Some(eb)) => {
                (ea.pos - eb.pos).length() < self.reach(ea.kind.radius(), eb.kind.radius())
            }
            _ => false,
        }
    }

    /// Remove an entity from the world. Clears the agent's hands if it was
    /// the carried one. Returns whether anything was removed.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        if self.agent.carrying == Some(id) {
            self.agent.carrying = None;
        }
        let removed = self.entities.len() != before;
        if removed {
            tracing::debug!("removed entity {:?}", id);
        }
        removed
    }

    /// Reward for finishing the task now, decaying linearly with elapsed
    /// ticks from 1.0 down to 0.8 at truncation.
    #[must_use]
    pub fn completion_reward(&self) -> f32 {
        1.0 - 0.2 * (self.step_count as f32 / self.config.max_steps as f32)
    }
}

// Tick internals.
impl World {
    // Motion is rejected outright when the destination leaves the floor
    // plan or runs into a blocking entity; there is no sliding.
    fn try_move(&mut self, sign: f32) {
        let fwd = self.agent.forward();
        let candidate = self.agent.pos + fwd * (sign * self.config.forward_step);
        if !self.rooms.iter().any(|r| r.contains(candidate)) {
            return;
        }
        let blocked = self.entities.iter().any(|e| {
            e.kind.blocks() && (e.pos - candidate).length() < e.kind.radius() + self.agent.radius
        });
        if !blocked {
            self.agent.pos = candidate;
        }
    }

    fn pick_up(&mut self, events: &mut Vec<Event>) {
        if self.agent.carrying.is_some() {
            return;
        }
        let mut best: Option<(f32, EntityId)> = None;
        for e in &self.entities {
            if !e.kind.portable() {
                continue;
            }
            let d = (e.pos - self.agent.pos).length();
            if d < self.reach(self.agent.radius, e.kind.radius())
                && best.map_or(true, |(bd, _)| d < bd)
            {
                best = Some((d, e.id));
            }
        }
        if let Some((_, id)) = best {
            self.agent.carrying = Some(id);
            events.push(Event::PickedUp(id));
            tracing::debug!("picked up entity {:?}", id);
        }
    }

    fn drop_carried(&mut self, events: &mut Vec<Event>) {
        if let Some(id) = self.agent.carrying.take() {
            let fwd = self.agent.forward();
            let pos = self.agent.pos;
            let agent_radius = self.agent.radius;
            if let Some(e) = self.entities.iter_mut().find(|e| e.id == id) {
                let offset = agent_radius + e.kind.radius();
                e.pos = Vec3::new(pos.x + fwd.x * offset, 0.0, pos.z + fwd.z * offset);
            }
            events.push(Event::Dropped(id));
            tracing::debug!("dropped entity {:?}", id);
        }
    }

    // The carried entity floats just ahead of the agent at carry height.
    fn settle_carried(&mut self) {
        if let Some(id) = self.agent.carrying {
            let fwd = self.agent.forward();
            let pos = self.agent.pos;
            let agent_radius = self.agent.radius;
            if let Some(e) = self.entities.iter_mut().find(|e| e.id == id) {
                let offset = agent_radius + e.kind.radius();
                e.pos = Vec3::new(pos.x + fwd.x * offset, CARRY_HEIGHT, pos.z + fwd.z * offset);
            }
        }
    }

    // Interaction reach for a pair of radii, slightly more than one forward
    // step beyond touching.
    fn reach(&self, a: f32, b: f32) -> f32 {
        a + b + 1.1 * self.config.forward_step
    }
}
