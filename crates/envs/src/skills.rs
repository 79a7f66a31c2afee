//! # Navigation Skills
//!
//! Hand-written heuristics that turn world geometry into primitive actions:
//! bearing math in the engine's flipped-z convention, bang-bang steering
//! toward a point, and landmark selection over the room list. Environments
//! wrap these in tick budgets; nothing here steps the world itself.

use world::{Action, Agent, RoomKind, Vec3, World};

/// Distance at which a steering target counts as reached.
pub const ARRIVE_RADIUS: f32 = 0.4;
/// Heading error below which the agent drives straight instead of turning.
pub const ALIGN_TOLERANCE: f32 = 0.2;

/// Normalize an angle into the interval (-pi, pi].
#[must_use]
pub fn wrap_angle(theta: f32) -> f32 {
    theta.sin().atan2(theta.cos())
}

/// World-frame bearing of a displacement. Heading zero points along +x and
/// angles grow toward -z, matching [`Agent::forward`].
#[must_use]
pub fn vector_to_angle(v: Vec3) -> f32 {
    (-v.z).atan2(v.x)
}

/// Bearing of a world angle relative to the agent's heading, wrapped into
/// (-pi, pi]. Positive means the target lies to the agent's left.
#[must_use]
pub fn relative_angle(world_angle: f32, heading: f32) -> f32 {
    wrap_angle(world_angle - heading)
}

/// One steering decision from [`steer_toward`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Steering {
    Forward,
    TurnLeft,
    TurnRight,
    Arrived,
}

impl Steering {
    /// Primitive action realizing the decision, or `None` once arrived.
    #[must_use]
    pub fn action(self) -> Option<Action> {
        match self {
            Steering::Forward => Some(Action::MoveForward),
            Steering::TurnLeft => Some(Action::TurnLeft),
            Steering::TurnRight => Some(Action::TurnRight),
            Steering::Arrived => None,
        }
    }
}

/// Bang-bang steering toward a point: turn until roughly aligned, then
/// drive. There is no obstacle avoidance; callers bound how many ticks they
/// spend following the advice.
#[must_use]
pub fn steer_toward(target: Vec3, agent: &Agent) -> Steering {
    let delta = target - agent.pos;
    if delta.length() <= ARRIVE_RADIUS {
        return Steering::Arrived;
    }
    let rel = relative_angle(vector_to_angle(delta), agent.heading);
    if rel.abs() < ALIGN_TOLERANCE {
        Steering::Forward
    } else if rel > 0.0 {
        Steering::TurnLeft
    } else {
        Steering::TurnRight
    }
}

/// Index of the chamber whose center is closest to the agent. Hallways and
/// gates never count. Ties keep the earliest room.
#[must_use]
pub fn nearest_chamber(world: &World) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, room) in world.rooms.iter().enumerate() {
        if room.kind != RoomKind::Chamber {
            continue;
        }
        let d = (room.mid() - world.agent.pos).length();
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((idx, d));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Direction of travel around the hallway ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Index of the next hallway around the ring in the given direction.
///
/// Agent and hallway centers are reduced to bearings from the world origin;
/// the hallway with the smallest angular distance ahead in the requested
/// rotation wins. Gates are not hallways and are never returned.
#[must_use]
pub fn next_hallway(world: &World, rotation: Rotation) -> Option<usize> {
    let agent_angle = vector_to_angle(world.agent.pos);
    let mut best: Option<(usize, f32)> = None;
    for (idx, room) in world.rooms.iter().enumerate() {
        if room.kind != RoomKind::Hallway {
            continue;
        }
        let angle = vector_to_angle(room.mid());
        let delta = match rotation {
            Rotation::Clockwise => (angle - agent_angle).rem_euclid(std::f32::consts::TAU),
            Rotation::CounterClockwise => (agent_angle - angle).rem_euclid(std::f32::consts::TAU),
        };
        if best.map_or(true, |(_, bd)| delta < bd) {
            best = Some((idx, delta));
        }
    }
    best.map(|(idx, _)| idx)
}

/// High-level command that expands into a bounded run of primitive actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skill {
    /// Drive straight ahead for a fixed burst.
    ForwardBurst,
    /// Steer to the center of the nearest chamber.
    RoomCenter,
    /// Steer to the next hallway around the ring, then push through it.
    NextHallway(Rotation),
    /// Approach the gate passage, only from the chamber fronting it.
    VaultDoor,
}

/// One externally issued command: a primitive action passed through
/// unchanged, or a skill the environment expands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive {
    Primitive(Action),
    Skill(Skill),
}

impl TryFrom<u8> for Directive {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0..=7 => Directive::Primitive(Action::try_from(value)?),
            8 => Directive::Skill(Skill::ForwardBurst),
            9 => Directive::Skill(Skill::RoomCenter),
            10 => Directive::Skill(Skill::NextHallway(Rotation::Clockwise)),
            11 => Directive::Skill(Skill::NextHallway(Rotation::CounterClockwise)),
            12 => Directive::Skill(Skill::VaultDoor),
            _ => return Err("invalid directive index (expected 0..12)"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::VaultEnv;
    use std::f32::consts::{FRAC_PI_2, PI};
    use world::{Vec3, World, WorldConfig};

    fn agent_at(pos: Vec3, heading: f32) -> Agent {
        Agent { pos, heading, radius: 0.4, carrying: None }
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        for i in -400..=400 {
            let theta = i as f32 * 0.1;
            let wrapped = wrap_angle(theta);
            assert!(
                wrapped > -PI && wrapped <= PI,
                "wrap_angle({theta}) = {wrapped} out of range"
            );
        }
    }

    #[test]
    fn wrap_angle_is_periodic() {
        for i in -30..=30 {
            let theta = i as f32 * 0.1;
            let diff = (wrap_angle(theta) - wrap_angle(theta + std::f32::consts::TAU)).abs();
            assert!(diff < 1e-4, "period error {diff} at {theta}");
        }
    }

    #[test]
    fn wrap_angle_passes_small_angles_through() {
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(-1.2) - -1.2).abs() < 1e-6);
        assert!(wrap_angle(0.0).abs() < 1e-9);
    }

    #[test]
    fn vector_to_angle_quadrants() {
        assert!(vector_to_angle(Vec3::new(1.0, 0.0, 0.0)).abs() < 1e-6);
        assert!((vector_to_angle(Vec3::new(0.0, 0.0, -1.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((vector_to_angle(Vec3::new(0.0, 0.0, 1.0)) + FRAC_PI_2).abs() < 1e-6);
        assert!((vector_to_angle(Vec3::new(-1.0, 0.0, 0.0)).abs() - PI).abs() < 1e-6);
        // Height never matters.
        assert!((vector_to_angle(Vec3::new(1.0, 3.0, -1.0)) - PI / 4.0).abs() < 1e-6);
    }

    #[test]
    fn vector_to_angle_mirrors_across_z() {
        for (x, z) in [(1.0, 2.0), (-3.0, 0.5), (0.25, -4.0)] {
            let a = vector_to_angle(Vec3::new(x, 0.0, z));
            let b = vector_to_angle(Vec3::new(x, 0.0, -z));
            assert!((a + b).abs() < 1e-6, "({x}, {z}): {a} vs {b}");
        }
    }

    #[test]
    fn relative_angle_wraps_the_difference() {
        let rel = relative_angle(3.0, -3.0);
        let expected = 6.0 - std::f32::consts::TAU;
        assert!((rel - expected).abs() < 1e-4, "rel={rel}");
    }

    #[test]
    fn arrival_beats_alignment() {
        // Facing away from a target inside the arrive radius still arrives.
        let agent = agent_at(Vec3::ZERO, 2.5);
        assert_eq!(steer_toward(Vec3::new(0.3, 0.0, 0.0), &agent), Steering::Arrived);
    }

    #[test]
    fn arrive_radius_brackets() {
        let agent = agent_at(Vec3::ZERO, 0.0);
        assert_eq!(steer_toward(Vec3::new(0.39, 0.0, 0.0), &agent), Steering::Arrived);
        assert_eq!(steer_toward(Vec3::new(0.41, 0.0, 0.0), &agent), Steering::Forward);
    }

    #[test]
    fn drives_forward_when_roughly_aligned() {
        let agent = agent_at(Vec3::ZERO, 0.0);
        // atan2(0.5, 5) is just under 0.1 rad off axis.
        assert_eq!(steer_toward(Vec3::new(5.0, 0.0, -0.5), &agent), Steering::Forward);
    }

    #[test]
    fn turns_toward_the_target() {
        let agent = agent_at(Vec3::ZERO, 0.0);
        assert_eq!(steer_toward(Vec3::new(5.0, 0.0, -5.0), &agent), Steering::TurnLeft);
        assert_eq!(steer_toward(Vec3::new(5.0, 0.0, 5.0), &agent), Steering::TurnRight);
    }

    #[test]
    fn alignment_tolerance_is_strict() {
        // The comparison is a strict less-than: an error a hair inside the
        // tolerance drives forward, a hair outside turns.
        let target = Vec3::new(5.0, 0.0, 0.0);
        let inside = agent_at(Vec3::ZERO, -(ALIGN_TOLERANCE - 1e-4));
        let outside = agent_at(Vec3::ZERO, -(ALIGN_TOLERANCE + 1e-4));
        assert_eq!(steer_toward(target, &inside), Steering::Forward);
        assert_eq!(steer_toward(target, &outside), Steering::TurnLeft);
    }

    #[test]
    fn facing_directly_away_still_turns() {
        let agent = agent_at(Vec3::ZERO, PI);
        let decision = steer_toward(Vec3::new(5.0, 0.0, 0.0), &agent);
        assert!(
            matches!(decision, Steering::TurnLeft | Steering::TurnRight),
            "got {decision:?}"
        );
    }

    #[test]
    fn empty_world_has_no_landmarks() {
        let world = World::new(WorldConfig::default());
        assert_eq!(nearest_chamber(&world), None);
        assert_eq!(next_hallway(&world, Rotation::Clockwise), None);
    }

    #[test]
    fn nearest_chamber_ignores_passages() {
        let env = VaultEnv::new(WorldConfig::default()).unwrap();
        let idx = nearest_chamber(&env.world).unwrap();
        let room = &env.world.rooms[idx];
        assert_eq!(room.kind, RoomKind::Chamber);
        // Spawn corner sits in the marble room centered at (-4, 4).
        assert!((room.mid().x - -4.0).abs() < 1e-6);
        assert!((room.mid().z - 4.0).abs() < 1e-6);
    }

    #[test]
    fn nearest_chamber_tie_keeps_the_first() {
        let mut env = VaultEnv::new(WorldConfig::default()).unwrap();
        // The origin is equidistant from all four ring chambers.
        env.world.agent.pos = Vec3::ZERO;
        assert_eq!(nearest_chamber(&env.world), Some(0));
    }

    #[test]
    fn nearest_chamber_inside_the_gate_prefers_the_treasure_room() {
        let mut env = VaultEnv::new(WorldConfig::default()).unwrap();
        env.world.agent.pos = Vec3::new(-4.0, 0.0, -8.5);
        let idx = nearest_chamber(&env.world).unwrap();
        assert!((env.world.rooms[idx].mid().z - -12.0).abs() < 1e-6);
    }

    #[test]
    fn hallway_ring_picks_by_rotation() {
        let env = VaultEnv::new(WorldConfig::default()).unwrap();

        let cw = next_hallway(&env.world, Rotation::Clockwise).unwrap();
        let mid = env.world.rooms[cw].mid();
        assert_eq!(env.world.rooms[cw].kind, RoomKind::Hallway);
        assert!(mid.x.abs() < 1e-6 && (mid.z - 4.0).abs() < 1e-6, "cw mid={mid:?}");

        let ccw = next_hallway(&env.world, Rotation::CounterClockwise).unwrap();
        let mid = env.world.rooms[ccw].mid();
        assert!((mid.x - -4.0).abs() < 1e-6 && mid.z.abs() < 1e-6, "ccw mid={mid:?}");
    }

    #[test]
    fn gate_is_never_a_hallway_landmark() {
        let mut env = VaultEnv::new(WorldConfig::default()).unwrap();
        env.world.agent.pos = Vec3::new(-4.0, 0.0, -8.5);
        for rotation in [Rotation::Clockwise, Rotation::CounterClockwise] {
            let idx = next_hallway(&env.world, rotation).unwrap();
            assert_eq!(env.world.rooms[idx].kind, RoomKind::Hallway);
        }
    }

    #[test]
    fn directive_indices_round_trip() {
        for value in 0..=12_u8 {
            let directive = Directive::try_from(value);
            assert!(directive.is_ok(), "index {value} should map, got {directive:?}");
        }
        assert_eq!(Directive::try_from(2), Ok(Directive::Primitive(Action::MoveForward)));
        assert_eq!(Directive::try_from(8), Ok(Directive::Skill(Skill::ForwardBurst)));
        assert_eq!(
            Directive::try_from(11),
            Ok(Directive::Skill(Skill::NextHallway(Rotation::CounterClockwise)))
        );
        assert!(Directive::try_from(13).is_err());
        assert!(Directive::try_from(255).is_err());
    }
}
