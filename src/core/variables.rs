use crate::core::environment::Environment;
use crate::core::interfaces::{VariableMap, VariableSource};
use crate::utils::{BuildModeError, Logger, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Keys the injector always sets itself; template entries cannot override them.
pub const BUILTIN_KEYS: [&str; 2] = ["NODE_ENV", "BUILD_ENV"];

pub fn is_identifier_safe(key: &str) -> bool {
    IDENTIFIER.is_match(key)
}

/// Both views of the injected variables. The key sets are always identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableSet {
    /// Plain values, used to seed the HTML shell template
    pub raw: VariableMap,
    /// JSON-quoted values, used for literal source substitution
    pub stringified: VariableMap,
}

impl VariableSet {
    /// Substitution table keyed the way bundled code reads the variables.
    pub fn define_table(&self) -> VariableMap {
        self.stringified
            .iter()
            .map(|(key, value)| (format!("process.env.{}", key), value.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

pub struct VariableInjector;

impl VariableInjector {
    pub fn inject(environment: Environment, source: &dyn VariableSource) -> Result<VariableSet> {
        let mut raw = source.variables(environment)?;

        if let Some(bad) = raw.keys().find(|key| !is_identifier_safe(key)) {
            return Err(BuildModeError::InvalidVariable {
                key: bad.clone(),
                source_name: source.name().to_string(),
            });
        }

        raw.insert("NODE_ENV".to_string(), environment.engine_mode().to_string());
        raw.insert("BUILD_ENV".to_string(), environment.as_str().to_string());

        let mut stringified = VariableMap::new();
        for (key, value) in &raw {
            stringified.insert(key.clone(), serde_json::to_string(value)?);
        }

        Logger::variables_loaded(raw.len(), source.name());

        Ok(VariableSet { raw, stringified })
    }
}

/// In-memory template, mostly useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticVariableSource {
    templates: HashMap<Environment, VariableMap>,
}

impl StaticVariableSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, environment: Environment, key: &str, value: &str) -> Self {
        self.templates
            .entry(environment)
            .or_default()
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl VariableSource for StaticVariableSource {
    fn name(&self) -> &str {
        "static template"
    }

    fn variables(&self, environment: Environment) -> Result<VariableMap> {
        Ok(self.templates.get(&environment).cloned().unwrap_or_default())
    }
}
