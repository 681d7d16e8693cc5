use crate::core::dev_server::{DevServerConfig, ProxyRoute, DEFAULT_HOST};
use crate::core::environment::{Environment, EnvironmentFlags};
use crate::core::optimization::{OptimizationPolicy, SourceMapPolicy};
use crate::core::output::OutputNamingScheme;
use crate::core::resolve::ResolvePolicy;
use crate::core::rules::{ModuleRule, SOURCE_DIR};
use crate::plugins::{AssetOptions, PluginDescriptor};
use serde::Serialize;
use std::path::PathBuf;

/// Flags from the invoking command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationFlags {
    pub mode: Option<String>,
    /// Force uat whatever the mode token says
    pub isuat: bool,
    /// Append the bundle analyzer
    pub report: bool,
}

impl InvocationFlags {
    pub fn new(mode: &str) -> Self {
        Self {
            mode: Some(mode.to_string()),
            ..Self::default()
        }
    }

    pub fn uat(mut self) -> Self {
        self.isuat = true;
        self
    }

    pub fn report(mut self) -> Self {
        self.report = true;
        self
    }
}

/// Project layout after merging defaults, config file and CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    pub root: PathBuf,
    /// Source directory entries are relative to
    pub context: String,
    pub entries: Vec<String>,
    pub outdir: String,
    pub assets: AssetOptions,
    /// Extra third-party packages that still get compiled
    pub transpile_dependencies: Vec<String>,
    /// Replaces the built-in proxy table when set
    pub proxy: Option<Vec<ProxyRoute>>,
    pub host: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            context: SOURCE_DIR.to_string(),
            entries: vec!["./core/polyfill.js".to_string(), "./index.js".to_string()],
            outdir: "build".to_string(),
            assets: AssetOptions::default(),
            transpile_dependencies: Vec::new(),
            proxy: None,
            host: DEFAULT_HOST.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSettings {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,
    #[serde(flatten)]
    pub naming: OutputNamingScheme,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleSettings {
    pub rules: Vec<ModuleRule>,
}

/// Complete configuration handed to the build engine. Built once per
/// invocation and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    pub environment: Environment,
    pub flags: EnvironmentFlags,
    /// Engine mode token
    pub mode: &'static str,
    pub context: PathBuf,
    pub entry: Vec<String>,
    pub output: OutputSettings,
    pub resolve: ResolvePolicy,
    pub module: ModuleSettings,
    pub optimization: OptimizationPolicy,
    pub plugins: Vec<PluginDescriptor>,
    pub devtool: SourceMapPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerConfig>,
}

impl PipelineConfig {
    pub fn chunk_group_count(&self) -> usize {
        self.optimization
            .split_chunks
            .as_ref()
            .map_or(0, |policy| policy.groups.len())
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    pub fn to_json(&self) -> crate::utils::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
