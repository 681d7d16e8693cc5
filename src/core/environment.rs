//! Canonical build environment and the resolver that derives it from the
//! invocation's mode token and the uat override flag.

use crate::utils::{BuildModeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The resolved build target. Exactly one is active per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
    Uat,
}

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Production,
        Environment::Uat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Uat => "uat",
        }
    }

    /// Mode token understood by the build engine, which only knows
    /// development and production.
    pub fn engine_mode(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production | Environment::Uat => "production",
        }
    }

    pub fn flags(self) -> EnvironmentFlags {
        EnvironmentFlags {
            is_dev: self == Environment::Development,
            is_pro: self == Environment::Production,
            is_uat: self == Environment::Uat,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = BuildModeError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            "uat" => Ok(Environment::Uat),
            other => Err(BuildModeError::InvalidMode {
                token: other.to_string(),
            }),
        }
    }
}

/// Derived booleans; exactly one is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentFlags {
    pub is_dev: bool,
    pub is_pro: bool,
    pub is_uat: bool,
}

/// Output of [`EnvironmentResolver::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    pub environment: Environment,
    pub flags: EnvironmentFlags,
    pub forced_uat: bool,
}

pub struct EnvironmentResolver;

impl EnvironmentResolver {
    /// Resolve the canonical environment.
    ///
    /// A missing mode token is always an error. When `isuat` is set the
    /// result is uat whatever the token says; otherwise the token must name
    /// one of the three environments.
    pub fn resolve(mode: Option<&str>, isuat: bool) -> Result<ResolvedEnvironment> {
        let token = mode
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(BuildModeError::MissingMode)?;

        let environment = if isuat {
            Environment::Uat
        } else {
            token.parse()?
        };

        Ok(ResolvedEnvironment {
            environment,
            flags: environment.flags(),
            forced_uat: isuat,
        })
    }
}
