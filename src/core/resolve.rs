use crate::utils::Logger;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Where an alias points
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "to", rename_all = "camelCase")]
pub enum AliasTarget {
    /// Directory relative to the project root
    Project(String),
    /// Another package name
    Package(String),
}

/// Resolved specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Path(PathBuf),
    Package(String),
}

/// Module resolution settings handed to the engine.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvePolicy {
    pub extensions: Vec<String>,
    pub modules: Vec<PathBuf>,
    pub alias: BTreeMap<String, AliasTarget>,
    #[serde(skip)]
    root: PathBuf,
}

impl ResolvePolicy {
    pub fn new(root: &Path) -> Self {
        let extensions = [".ts", ".tsx", ".jsx", ".js", ".json", ".less", ".scss", ".css"]
            .iter()
            .map(|e| e.to_string())
            .collect();

        let modules = vec![
            root.join("src/lib"),
            root.join("node_modules"),
            PathBuf::from("node_modules"),
        ];

        let mut alias = BTreeMap::new();
        alias.insert("components".to_string(), AliasTarget::Project("src/components".to_string()));
        alias.insert("style".to_string(), AliasTarget::Project("src/style".to_string()));
        alias.insert("core".to_string(), AliasTarget::Project("src/core".to_string()));
        alias.insert("~".to_string(), AliasTarget::Project("src".to_string()));
        alias.insert("react".to_string(), AliasTarget::Package("preact/compat".to_string()));
        alias.insert("react-dom".to_string(), AliasTarget::Package("preact/compat".to_string()));

        Logger::debug(&format!("🔗 Resolve policy with {} aliases", alias.len()));

        Self {
            extensions,
            modules,
            alias,
            root: root.to_path_buf(),
        }
    }

    /// Resolve an import specifier through the alias table.
    /// Matches the alias exactly or as an `alias/` prefix; `None` when no
    /// alias applies.
    pub fn resolve_alias(&self, specifier: &str) -> Option<Resolved> {
        if let Some(target) = self.alias.get(specifier) {
            return Some(self.resolve_target(target, None));
        }

        // Longest alias first so "react-dom/x" never resolves via "react"
        let mut candidates: Vec<_> = self.alias.iter().collect();
        candidates.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        candidates.into_iter().find_map(|(alias, target)| {
            let rest = specifier.strip_prefix(alias.as_str())?.strip_prefix('/')?;
            let resolved = self.resolve_target(target, Some(rest));
            Logger::debug(&format!("🔗 Resolved alias: {} → {:?}", specifier, resolved));
            Some(resolved)
        })
    }

    fn resolve_target(&self, target: &AliasTarget, rest: Option<&str>) -> Resolved {
        match (target, rest) {
            (AliasTarget::Project(dir), None) => Resolved::Path(self.root.join(dir)),
            (AliasTarget::Project(dir), Some(rest)) => {
                Resolved::Path(self.root.join(dir).join(rest))
            }
            (AliasTarget::Package(name), None) => Resolved::Package(name.clone()),
            (AliasTarget::Package(name), Some(rest)) => {
                Resolved::Package(format!("{}/{}", name, rest))
            }
        }
    }
}
