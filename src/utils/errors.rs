use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildModeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "Configuration error: missing build mode (expected one of development, production, uat)"
    )]
    MissingMode,

    #[error(
        "Configuration error: invalid build mode '{token}' \
         (expected one of development, production, uat)"
    )]
    InvalidMode { token: String },

    #[error(
        "Configuration error: variable '{key}' from {source_name} \
         is not a valid substitution target"
    )]
    InvalidVariable { key: String, source_name: String },

    #[error("Configuration error: PORT must be a port number, got '{value}'")]
    InvalidPort { value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read {path}: {message}")]
    Load { path: PathBuf, message: String },
}

impl BuildModeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn load(path: PathBuf, message: impl std::fmt::Display) -> Self {
        Self::Load {
            path,
            message: message.to_string(),
        }
    }

    /// True for errors caused by invalid invocation input rather than I/O
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingMode
                | Self::InvalidMode { .. }
                | Self::InvalidVariable { .. }
                | Self::InvalidPort { .. }
                | Self::Config(_)
        )
    }

    /// Format error for terminal display
    pub fn format_detailed(&self) -> String {
        match self {
            Self::InvalidMode { token } => format!(
                "❌ {}\n   hint: pass --mode development|production, \
                 or --isuat to force uat (got '{}')",
                self, token
            ),
            Self::MissingMode => {
                format!("❌ {}\n   hint: pass --mode <development|production|uat>", self)
            }
            _ => format!("❌ {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildModeError>;

impl From<regex::Error> for BuildModeError {
    fn from(err: regex::Error) -> Self {
        BuildModeError::config(format!("Regex error: {}", err))
    }
}

/// Render a command failure for the terminal. A bare `BuildModeError`
/// keeps its hints; anything with context prints the whole chain.
pub fn format_report(err: &anyhow::Error) -> String {
    match err.chain().next().and_then(|top| top.downcast_ref::<BuildModeError>()) {
        Some(inner) => inner.format_detailed(),
        None => format!("❌ {:#}", err),
    }
}
