use crate::core::chunks::{ChunkSplitter, SplitPolicy};
use crate::core::environment::Environment;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "minimizer", rename_all = "kebab-case")]
pub enum Minimizer {
    /// Stylesheet minimizer
    #[serde(rename_all = "camelCase")]
    Style { remove_all_comments: bool },
    /// Script minifier
    #[serde(rename_all = "camelCase")]
    Script { strip_comments: bool, drop_console: bool },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_chunks: Option<SplitPolicy>,
    pub minimizers: Vec<Minimizer>,
}

impl OptimizationPolicy {
    /// Development gets neither splitting nor minimizers.
    pub fn for_environment(environment: Environment) -> Self {
        let minimizers = match environment {
            Environment::Development => Vec::new(),
            Environment::Production | Environment::Uat => vec![
                Minimizer::Style {
                    remove_all_comments: true,
                },
                Minimizer::Script {
                    strip_comments: true,
                    drop_console: environment == Environment::Production,
                },
            ],
        };

        Self {
            split_chunks: ChunkSplitter::policy(environment),
            minimizers,
        }
    }
}

/// Source map flavour the engine should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceMapPolicy {
    #[serde(rename = "source-map")]
    Full,
    #[serde(rename = "cheap-module-eval-source-map")]
    CheapEval,
}

impl SourceMapPolicy {
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production | Environment::Uat => SourceMapPolicy::Full,
            Environment::Development => SourceMapPolicy::CheapEval,
        }
    }
}
