use crate::core::models::PipelineConfig;
use crate::core::rules::ModuleRule;
use colored::*;
use std::time::Instant;

/// Human-facing summary printed to stderr after planning.
pub struct PlanUI {
    start_time: Instant,
}

impl PlanUI {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn show_banner(&self) {
        eprintln!(
            "\n  {} {}",
            "BUILDMODE".bright_cyan().bold(),
            env!("CARGO_PKG_VERSION").bright_white()
        );
        eprintln!();
    }

    pub fn show_plan(&self, config: &PipelineConfig) {
        let naming = &config.output.naming;
        let environment = config.environment.to_string();
        eprintln!("  {} {}", "env".bright_black(), environment.bright_cyan().bold());
        eprintln!("  {} {}", "entry".bright_black(), naming.entry_filename.bright_white());
        eprintln!("  {} {}", "chunk".bright_black(), naming.chunk_filename.bright_white());

        match &config.optimization.split_chunks {
            Some(policy) => {
                let names: Vec<_> = policy.groups.iter().map(|g| g.name).collect();
                eprintln!("  {} {}", "split".bright_black(), names.join(", ").bright_white());
            }
            None => eprintln!("  {} {}", "split".bright_black(), "off".bright_black()),
        }

        let plugins: Vec<_> = config.plugins.iter().map(|p| p.name()).collect();
        eprintln!("  {} {}", "plugins".bright_black(), plugins.join(", ").bright_white());

        if let Some(dev_server) = &config.dev_server {
            eprintln!(
                "  {} http://{} ({} proxy routes)",
                "serve".bright_black(),
                dev_server.listen_address().bright_cyan(),
                dev_server.proxy.len()
            );
        }

        eprintln!();
        eprintln!(
            "  {} planned in {}",
            "✓".bright_green(),
            format!("{:.1}ms", self.start_time.elapsed().as_secs_f64() * 1000.0)
                .bright_white()
                .bold()
        );
    }

    pub fn show_rules(&self, rules: &[ModuleRule]) {
        for rule in rules {
            let marker = if rule.enforce.is_some() { "pre" } else { "   " };
            eprintln!(
                "  {} {:<22} {}",
                marker.bright_black(),
                rule.name.bright_cyan(),
                rule.test_pattern().bright_black()
            );
        }
    }
}

impl Default for PlanUI {
    fn default() -> Self {
        Self::new()
    }
}
