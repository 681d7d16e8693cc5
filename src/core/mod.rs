// Core domain layer
pub mod chunks;
pub mod dev_server;
pub mod environment;
pub mod interfaces;
pub mod models;
pub mod optimization;
pub mod output;
pub mod resolve;
pub mod rules;
pub mod services;
pub mod variables;

pub use environment::{Environment, EnvironmentFlags, EnvironmentResolver};
pub use interfaces::*;
pub use models::*;
pub use services::*;
