//! Validation options.

use serde::{Deserialize, Serialize};

/// Tunables for a validation run. Deserializable so embedders can keep them
/// next to the worldbook; every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    /// Root members whose absence is a critical schema error.
    pub required_top_level_fields: Vec<String>,
    /// Compiled-size ceiling in bytes for pattern-mode trigger keys.
    pub pattern_size_limit: usize,
    /// Nesting ceiling for pattern-mode trigger keys.
    pub pattern_nest_limit: u32,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            required_top_level_fields: vec!["version".into(), "description".into()],
            pattern_size_limit: 1 << 20,
            pattern_nest_limit: 64,
        }
    }
}

/// Fields every profession must declare with a non-empty value.
pub const REQUIRED_PROFESSION_FIELDS: [&str; 4] = ["uid", "name", "level", "description"];
