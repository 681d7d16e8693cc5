use crate::core::environment::Environment;
use crate::core::interfaces::{VariableMap, VariableSource};
use crate::core::variables::{is_identifier_safe, BUILTIN_KEYS};
use crate::utils::{BuildModeError, Logger, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 3000;

/// Process environment variables read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEnv {
    /// Base path prefix for emitted asset URLs
    pub public_path: Option<String>,
    /// Dev server listen port
    pub port: u16,
}

impl Default for ProcessEnv {
    fn default() -> Self {
        Self {
            public_path: None,
            port: DEFAULT_PORT,
        }
    }
}

impl ProcessEnv {
    pub fn capture() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup so callers never touch ambient state
    /// outside the process entry point.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let public_path = lookup("PUBLIC_PATH").filter(|v| !v.is_empty());

        let port = match lookup("PORT").filter(|v| !v.trim().is_empty()) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| BuildModeError::InvalidPort { value })?,
            None => DEFAULT_PORT,
        };

        Ok(Self { public_path, port })
    }
}

/// Variable template backed by dotenv files in the project root.
///
/// Files are read in increasing priority, later ones overriding earlier:
/// `.env`, `.env.local`, `.env.<environment>`, `.env.<environment>.local`.
#[derive(Debug, Clone, Default)]
pub struct DotenvSource {
    templates: HashMap<Environment, VariableMap>,
}

impl DotenvSource {
    /// Files consulted for one environment, lowest priority first
    pub fn files_for(root: &Path, environment: Environment) -> Vec<PathBuf> {
        vec![
            root.join(".env"),
            root.join(".env.local"),
            root.join(format!(".env.{}", environment)),
            root.join(format!(".env.{}.local", environment)),
        ]
    }

    pub async fn load(root: &Path) -> Result<Self> {
        let mut templates = HashMap::new();

        for environment in Environment::ALL {
            let mut variables = VariableMap::new();

            for file in Self::files_for(root, environment) {
                let content = match tokio::fs::read_to_string(&file).await {
                    Ok(content) => content,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                    Err(e) => return Err(BuildModeError::load(file, e)),
                };

                Logger::debug(&format!("Loading env file: {}", file.display()));
                variables.extend(parse_dotenv(&content, &file));
            }

            templates.insert(environment, variables);
        }

        Ok(Self { templates })
    }
}

impl VariableSource for DotenvSource {
    fn name(&self) -> &str {
        "dotenv files"
    }

    fn variables(&self, environment: Environment) -> Result<VariableMap> {
        Ok(self.templates.get(&environment).cloned().unwrap_or_default())
    }
}

/// Parse dotenv content, skipping comments and lines whose key is not a
/// valid substitution target.
pub fn parse_dotenv(content: &str, origin: &Path) -> VariableMap {
    let mut variables = VariableMap::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_env_line(line) {
            Some((key, value)) => {
                if BUILTIN_KEYS.contains(&key.as_str()) {
                    Logger::warn(&format!(
                        "{} at line {} sets built-in {}; the build value wins",
                        origin.display(),
                        line_num + 1,
                        key
                    ));
                }
                variables.insert(key, value);
            }
            None => Logger::warn(&format!(
                "Invalid env line in {} at line {}: {}",
                origin.display(),
                line_num + 1,
                line
            )),
        }
    }

    variables
}

fn parse_env_line(line: &str) -> Option<(String, String)> {
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if !is_identifier_safe(key) {
        return None;
    }

    let value = if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        &value[1..value.len() - 1]
    } else {
        value
    };

    Some((key.to_string(), value.to_string()))
}
