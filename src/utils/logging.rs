use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// Install the global subscriber. Output goes to stderr so plans written
    /// to stdout stay machine-readable.
    pub fn init(verbose: bool) {
        let default = if verbose { "buildmode=debug" } else { "buildmode=info" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn environment_resolved(environment: &str, mode_token: Option<&str>, forced_uat: bool) {
        if forced_uat {
            info!(
                "🎯 Environment: {} (forced by --isuat, mode token {:?})",
                environment, mode_token
            );
        } else {
            info!("🎯 Environment: {}", environment);
        }
    }

    pub fn variables_loaded(count: usize, source: &str) {
        debug!("🔑 Loaded {} variables from {}", count, source);
    }

    pub fn plan_ready(rules: usize, chunk_groups: usize, plugins: usize) {
        info!(
            "📦 Plan ready: {} module rules, {} chunk groups, {} plugins",
            rules, chunk_groups, plugins
        );
    }

    pub fn analyzer_enabled() {
        info!("📊 Bundle analyzer requested via --report");
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

    pub fn info(msg: &str) {
        info!("{}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
