use crate::core::environment::Environment;
use crate::utils::Result;
use std::collections::BTreeMap;

/// Variable name to value, ordered so emitted plans are deterministic.
pub type VariableMap = BTreeMap<String, String>;

/// Per-environment variable template consumed by the variable injector.
///
/// The storage format is owned by the implementation; the injector only
/// sees the mapping for one environment.
pub trait VariableSource: Send + Sync {
    /// Human-readable name used in diagnostics
    fn name(&self) -> &str;

    fn variables(&self, environment: Environment) -> Result<VariableMap>;
}
