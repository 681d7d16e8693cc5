use crate::core::environment::Environment;
use crate::core::rules::{normalize, PathPredicate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::Path;

static DEPENDENCY_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"node_modules").unwrap());

/// Upper bound on parallel requests a single page load may trigger
pub const MAX_INITIAL_REQUESTS: usize = 5;
/// Entry points that must share a module before it moves to commons
pub const MIN_SHARED_REFERENCES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkScope {
    /// Only modules loaded by the initial page
    Initial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Membership {
    /// Module path matches the predicate
    Path { predicate: String },
    /// Module is referenced by at least `min_shared_references` entries
    Shared,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkGroup {
    pub name: &'static str,
    pub membership: Membership,
    #[serde(skip)]
    test: Option<PathPredicate>,
    pub chunks: ChunkScope,
    pub min_shared_references: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_initial_requests: Option<usize>,
    pub min_size: usize,
    pub priority: i32,
    pub force_emit: bool,
}

impl ChunkGroup {
    fn vendor() -> Self {
        Self {
            name: "vendor",
            membership: Membership::Path {
                predicate: DEPENDENCY_BOUNDARY.as_str().to_string(),
            },
            test: Some(PathPredicate::matches(&DEPENDENCY_BOUNDARY)),
            chunks: ChunkScope::Initial,
            min_shared_references: 1,
            max_initial_requests: None,
            min_size: 0,
            priority: 10,
            force_emit: true,
        }
    }

    fn commons() -> Self {
        Self {
            name: "commons",
            membership: Membership::Shared,
            test: None,
            chunks: ChunkScope::Initial,
            min_shared_references: MIN_SHARED_REFERENCES,
            max_initial_requests: Some(MAX_INITIAL_REQUESTS),
            min_size: 0,
            priority: 0,
            force_emit: false,
        }
    }

    /// Membership test for a module referenced by `entry_references` entries
    pub fn accepts(&self, module_path: &str, entry_references: usize) -> bool {
        let path_ok = self.test.as_ref().map_or(true, |test| test.test(module_path));
        path_ok && entry_references >= self.min_shared_references
    }
}

/// Shared/vendor grouping policy; `None` means one bundle per entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitPolicy {
    /// Sorted by descending priority, which is also evaluation order
    pub groups: Vec<ChunkGroup>,
}

impl SplitPolicy {
    pub fn group(&self, name: &str) -> Option<&ChunkGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Group a module lands in, highest priority first
    pub fn assign(&self, module_path: &Path, entry_references: usize) -> Option<&'static str> {
        let path = normalize(module_path);
        self.groups
            .iter()
            .find(|group| group.accepts(&path, entry_references))
            .map(|group| group.name)
    }
}

pub struct ChunkSplitter;

impl ChunkSplitter {
    pub fn policy(environment: Environment) -> Option<SplitPolicy> {
        match environment {
            Environment::Development => None,
            Environment::Production | Environment::Uat => {
                let mut groups = vec![ChunkGroup::commons(), ChunkGroup::vendor()];
                groups.sort_by(|a, b| b.priority.cmp(&a.priority));
                Some(SplitPolicy { groups })
            }
        }
    }

    pub fn assign(
        environment: Environment,
        module_path: &Path,
        entry_references: usize,
    ) -> Option<&'static str> {
        Self::policy(environment)?.assign(module_path, entry_references)
    }
}
