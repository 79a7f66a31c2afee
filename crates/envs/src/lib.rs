//! Task environments over the room-world engine, plus the navigation
//! skills layer that expands high-level directives into primitive actions.

pub mod env;
pub mod lockbox;
pub mod skills;
pub mod vault;

pub use env::{Env, EnvStep, SkillTrace, StepInfo};
pub use lockbox::LockBoxEnv;
pub use skills::{Directive, Rotation, Skill, Steering};
pub use vault::VaultEnv;
