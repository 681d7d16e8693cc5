use crate::core::environment::Environment;
use serde::Serialize;

/// Hex digits of a hash kept in filenames
pub const HASH_LENGTH: usize = 6;

/// Filename patterns for every emitted artifact kind.
///
/// Entry bundles use the whole-build hash, async chunks their own content
/// hash, so chunks keep their names while unrelated code changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputNamingScheme {
    pub entry_filename: String,
    pub chunk_filename: String,
    pub css_filename: String,
    pub css_chunk_filename: String,
}

impl OutputNamingScheme {
    pub fn for_environment(environment: Environment) -> Self {
        if Self::hashed(environment) {
            Self {
                entry_filename: format!("bundle.[hash:{}].js", HASH_LENGTH),
                chunk_filename: format!("[name].[contenthash:{}].js", HASH_LENGTH),
                css_filename: format!("[name].[hash:{}].css", HASH_LENGTH),
                css_chunk_filename: format!("[id].[hash:{}].css", HASH_LENGTH),
            }
        } else {
            Self {
                entry_filename: "bundle.js".to_string(),
                chunk_filename: "[name].js".to_string(),
                css_filename: "[name].css".to_string(),
                css_chunk_filename: "[id].css".to_string(),
            }
        }
    }

    /// Stable names keep incremental development rebuilds cheap.
    pub fn hashed(environment: Environment) -> bool {
        match environment {
            Environment::Development => false,
            Environment::Production | Environment::Uat => true,
        }
    }

    pub fn patterns(&self) -> [&str; 4] {
        [
            self.entry_filename.as_str(),
            self.chunk_filename.as_str(),
            self.css_filename.as_str(),
            self.css_chunk_filename.as_str(),
        ]
    }
}

pub fn contains_hash(pattern: &str) -> bool {
    pattern.contains("[hash") || pattern.contains("[contenthash") || pattern.contains("[chunkhash")
}
