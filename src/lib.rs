// buildmode - environment-aware configuration planner for front-end builds

pub mod cli;
pub mod core;
pub mod plugins;
pub mod utils;

pub use crate::core::{
    Environment, InvocationFlags, PipelineConfig, PipelineService, ProjectSettings,
};
pub use crate::utils::{BuildModeError, ProcessEnv, Result};
