use world::{Action, Observation, TickInfo};

/// A task environment stepped by an external harness.
///
/// Inspired by classic frameworks like OpenAI Gym: `reset` starts an
/// episode, `step` applies one command and reports what happened. A command
/// may be a single primitive action or a skill that expands into many
/// engine ticks; either way one `step` call returns one [`EnvStep`].
pub trait Env {
    /// Command type accepted by [`step`](Env::step).
    type Cmd;

    /// Restore the initial episode state and return the first observation.
    fn reset(&mut self) -> Observation;

    /// Apply one command and return the aggregated outcome.
    fn step(&mut self, cmd: Self::Cmd) -> EnvStep;

    /// Size of the discrete command set.
    fn action_count(&self) -> usize;

    /// Whether the current episode has ended.
    fn is_done(&self) -> bool;
}

/// Outcome of one [`Env::step`] call.
///
/// `reward` sums over every engine tick the command produced, and `done`
/// latches as soon as any of those ticks ended the episode. `observation`
/// is the one from the final tick.
#[derive(Clone, Debug)]
pub struct EnvStep {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

/// Auxiliary data on an [`EnvStep`].
///
/// Commands that ran exactly one tick carry that tick's info directly;
/// multi-tick expansions return the full per-tick record.
#[derive(Clone, Debug)]
pub enum StepInfo {
    Single(TickInfo),
    Trace(SkillTrace),
}

/// Per-tick record of a skill expansion, in execution order.
#[derive(Clone, Debug, Default)]
pub struct SkillTrace {
    pub actions: Vec<Action>,
    pub observations: Vec<Observation>,
    pub rewards: Vec<f32>,
    pub dones: Vec<bool>,
    pub infos: Vec<TickInfo>,
}

impl SkillTrace {
    /// Number of engine ticks recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
