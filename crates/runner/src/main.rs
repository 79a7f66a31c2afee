#![deny(clippy::all, clippy::pedantic)]

//! Episode runner for the room-world tasks.
//!
//! Runs scripted episodes of the LockBox or Vault environment, or steps a
//! world loaded from a JSON floor plan, and logs per-episode outcomes. An
//! optional first argument names a JSON run configuration.

use anyhow::{bail, Context, Result};
use envs::{Directive, Env, LockBoxEnv, Rotation, Skill, VaultEnv};
use serde::Deserialize;
use world::{Action, FloorPlan, WorldConfig};

/// Runner settings, read from the JSON file given as the first argument.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RunConfig {
    /// Which task to run: "lockbox", "vault", or "plan".
    task: String,
    /// Episodes per run.
    episodes: u32,
    /// Engine parameters shared by all tasks.
    world: WorldConfig,
    /// Floor plan path, required by the "plan" task.
    plan: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            task: "vault".to_string(),
            episodes: 3,
            world: WorldConfig::default(),
            plan: None,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading run config {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing run config {path}"))?
        }
        None => RunConfig::default(),
    };

    tracing::info!("Running task '{}' for {} episodes...", config.task, config.episodes);
    match config.task.as_str() {
        "lockbox" => run_lockbox(&config),
        "vault" => run_vault(&config),
        "plan" => run_plan(&config),
        other => bail!("unknown task '{other}' (expected lockbox, vault, or plan)"),
    }
}

fn run_lockbox(config: &RunConfig) -> Result<()> {
    let mut env = LockBoxEnv::new(config.world.clone())?;
    // Fixed patrol, three strides and a turn. Episodes end by truncation
    // unless the patrol happens to shove the key into the box.
    let script = [
        Action::MoveForward,
        Action::MoveForward,
        Action::MoveForward,
        Action::TurnLeft,
    ];
    for episode in 0..config.episodes {
        env.reset();
        let mut total = 0.0_f32;
        loop {
            let action = script[env.world.step_count as usize % script.len()];
            let step = env.step(action);
            total += step.reward;
            if step.done {
                break;
            }
        }
        tracing::info!(
            "episode {} finished: {} ticks, reward {}",
            episode,
            env.world.step_count,
            total
        );
    }
    Ok(())
}

fn run_vault(config: &RunConfig) -> Result<()> {
    let mut env = VaultEnv::new(config.world.clone())?;
    // Patrol the ring with skills, poking at whatever is nearby. Not a
    // solver; it shows the directive surface end to end.
    let script = [
        Directive::Skill(Skill::RoomCenter),
        Directive::Primitive(Action::Pickup),
        Directive::Skill(Skill::NextHallway(Rotation::Clockwise)),
        Directive::Skill(Skill::RoomCenter),
        Directive::Primitive(Action::Toggle),
        Directive::Skill(Skill::VaultDoor),
        Directive::Primitive(Action::Pickup),
        Directive::Skill(Skill::ForwardBurst),
    ];
    for episode in 0..config.episodes {
        env.reset();
        let mut total = 0.0_f32;
        let mut directives = 0_u32;
        for cmd in script.iter().cycle() {
            let step = env.step(*cmd);
            total += step.reward;
            directives += 1;
            if step.done {
                break;
            }
        }
        tracing::info!(
            "episode {} finished: {} directives, {} ticks, reward {}",
            episode,
            directives,
            env.world.step_count,
            total
        );
    }
    Ok(())
}

fn run_plan(config: &RunConfig) -> Result<()> {
    const WALK: [Action; 3] = [Action::TurnLeft, Action::TurnRight, Action::MoveForward];

    let Some(path) = config.plan.as_deref() else {
        bail!("task 'plan' needs a plan path in the run config");
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading floor plan {path}"))?;
    let plan = FloorPlan::from_str(&text)?;
    let mut world = plan.into_world(config.world.clone())?;

    // Arbitrary geometry, so no patrol script: wander with seeded moves.
    fastrand::seed(config.world.seed);
    loop {
        let action = WALK[fastrand::usize(..WALK.len())];
        if world.step(action).done {
            break;
        }
    }
    tracing::info!("plan '{}' ran {} ticks", path, world.step_count);
    Ok(())
}
