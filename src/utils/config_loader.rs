use crate::core::dev_server::ProxyRoute;
use crate::core::models::ProjectSettings;
use crate::utils::{BuildModeError, Logger, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "buildmode.config.json";

/// Configuration file format (buildmode.config.json)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectFileConfig {
    /// Entry points relative to the context directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<String>>,

    /// Source directory (default: "src")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Output directory (default: "build")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outdir: Option<String>,

    /// HTML shell template (default: "./index.ejs")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Static asset directory copied verbatim (default: "./assets")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<String>,

    /// Extra third-party packages that must still be compiled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transpile_dependencies: Option<Vec<String>>,

    /// Dev server proxy table, replacing the built-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Vec<ProxyRoute>>,

    /// Dev server host (default: "0.0.0.0")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

/// Overrides taken from the command line; they win over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides<'a> {
    pub outdir: Option<&'a str>,
    pub host: Option<&'a str>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_from_file(root: &Path) -> Result<Option<ProjectFileConfig>> {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            Logger::debug(&format!("No {} found, using defaults", CONFIG_FILE));
            return Ok(None);
        }

        Logger::debug(&format!("Loading config from {}", config_path.display()));

        let content = std::fs::read_to_string(&config_path)?;

        let config: ProjectFileConfig = serde_json::from_str(&content).map_err(|e| {
            BuildModeError::config(format!("Failed to parse {}: {}", CONFIG_FILE, e))
        })?;

        Ok(Some(config))
    }

    /// Merge file config with CLI arguments (CLI > file > defaults)
    pub fn merge_with_cli(
        file_config: Option<ProjectFileConfig>,
        root: PathBuf,
        cli: CliOverrides<'_>,
    ) -> Result<ProjectSettings> {
        let base = file_config.unwrap_or_default();
        let defaults = ProjectSettings::default();

        let entries = base.entries.unwrap_or(defaults.entries);
        if entries.is_empty() {
            return Err(BuildModeError::config("at least one entry point is required"));
        }

        let mut assets = defaults.assets;
        if let Some(template) = base.template {
            assets.template = template;
        }
        if let Some(assets_dir) = base.assets_dir {
            assets.assets_dir = assets_dir;
        }

        Ok(ProjectSettings {
            root,
            context: base.context.unwrap_or(defaults.context),
            entries,
            outdir: cli
                .outdir
                .map(str::to_string)
                .or(base.outdir)
                .unwrap_or(defaults.outdir),
            assets,
            transpile_dependencies: base.transpile_dependencies.unwrap_or_default(),
            proxy: base.proxy,
            host: cli.host.map(str::to_string).or(base.host).unwrap_or(defaults.host),
        })
    }

    pub fn load(root: &Path, cli: CliOverrides<'_>) -> Result<ProjectSettings> {
        let file_config = Self::load_from_file(root)?;
        Self::merge_with_cli(file_config, root.to_path_buf(), cli)
    }

    /// Generate example config file
    pub fn generate_example() -> Result<String> {
        let defaults = ProjectSettings::default();
        let example = ProjectFileConfig {
            entries: Some(defaults.entries),
            context: Some(defaults.context),
            outdir: Some(defaults.outdir),
            template: Some(defaults.assets.template),
            assets_dir: Some(defaults.assets.assets_dir),
            transpile_dependencies: Some(Vec::new()),
            proxy: None,
            host: Some(defaults.host),
        };
        Ok(serde_json::to_string_pretty(&example)?)
    }
}
