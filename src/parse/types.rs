//! Rust types mirroring the worldbook JSON document.
//!
//! Every field the validator reads is optional: "absent" and "empty" are
//! distinct states and the analysis passes decide which of them is a finding.
//! Keyed collections keep their source order (see [`Keyed`]).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::keyed::Keyed;

// =============================================================================
// ROOT
// =============================================================================

/// The file-level wrapper. A document without a `worldbook` member parses
/// fine and is rejected by the schema check instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub worldbook: Option<Worldbook>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worldbook {
    /// Kept untyped: any truthy value satisfies the required-field check.
    pub version: Option<Value>,
    pub description: Option<Value>,
    pub career_systems: Option<Keyed<CareerSystem>>,
    pub shared_resources: Option<SharedResources>,
    pub bridging_lore: Option<BridgingLore>,
    /// Only an array is an entry list. Other shapes (such as an object keyed
    /// by entry id) are treated as absent.
    #[serde(default, deserialize_with = "entry_list")]
    pub entries: Option<Vec<ActivationEntry>>,
    /// Root members the validator has no typed view of.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Worldbook {
    /// Whether a root member is present with a non-empty value.
    pub fn has_field(&self, field: &str) -> bool {
        match field {
            "version" => self.version.as_ref().is_some_and(is_truthy),
            "description" => self.description.as_ref().is_some_and(is_truthy),
            "careerSystems" => self.career_systems.is_some(),
            "sharedResources" => self.shared_resources.is_some(),
            "bridgingLore" => self.bridging_lore.is_some(),
            "entries" => self.entries.is_some(),
            other => self.extra.get(other).is_some_and(is_truthy),
        }
    }

    /// Career systems in document order; empty when the container is absent.
    pub fn systems(&self) -> impl Iterator<Item = (&str, &CareerSystem)> {
        self.career_systems.iter().flat_map(|systems| systems.iter())
    }
}

// =============================================================================
// CAREER SYSTEMS
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSystem {
    /// Identifier prefix every profession of this system must carry.
    pub prefix: Option<String>,
    pub professions: Option<Keyed<Profession>>,
}

impl CareerSystem {
    pub fn professions(&self) -> impl Iterator<Item = (&str, &Profession)> {
        self.professions.iter().flat_map(|professions| professions.iter())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profession {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub level: Option<Level>,
    pub description: Option<String>,
    pub next_profession: Option<String>,
    pub requirements: Option<Requirements>,
    pub locations: Option<Vec<String>>,
    pub organizations: Option<Vec<String>>,
    pub cross_references: Option<Keyed<Vec<String>>>,
}

impl Profession {
    /// The identifier, if declared and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.uid.as_deref().filter(|uid| !uid.is_empty())
    }

    /// Identifier for messages, falling back to the profession's key.
    pub fn display_id<'a>(&'a self, key: &'a str) -> &'a str {
        self.id().unwrap_or(key)
    }

    pub fn next(&self) -> Option<&str> {
        self.next_profession.as_deref().filter(|next| !next.is_empty())
    }

    pub fn previous(&self) -> Option<&str> {
        self.requirements
            .as_ref()
            .and_then(|r| r.previous_profession.as_deref())
            .filter(|prev| !prev.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    pub previous_profession: Option<String>,
}

/// Profession level: worldbooks use both numeric ranks and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Level {
    Rank(serde_json::Number),
    Label(String),
}

impl Level {
    pub fn is_blank(&self) -> bool {
        match self {
            Level::Rank(_) => false,
            Level::Label(label) => !non_blank(label),
        }
    }
}

// =============================================================================
// SHARED RESOURCES & BRIDGING LORE
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedResources {
    pub locations: Option<Keyed<NamedEntity>>,
    pub organizations: Option<Keyed<NamedEntity>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgingLore {
    pub interactions: Option<Vec<NamedEntity>>,
    pub shared_quests: Option<Vec<NamedEntity>>,
}

/// Any globally referenceable record that only contributes an identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedEntity {
    pub uid: Option<String>,
    pub name: Option<String>,
}

impl NamedEntity {
    pub fn id(&self) -> Option<&str> {
        self.uid.as_deref().filter(|uid| !uid.is_empty())
    }
}

// =============================================================================
// ACTIVATION ENTRIES
// =============================================================================

/// A keyword-activated lookup entry. Field names follow the lorebook export
/// format (snake_case).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivationEntry {
    pub uid: Option<EntryId>,
    pub id: Option<EntryId>,
    pub keys: Option<Vec<String>>,
    pub secondary_keys: Option<Vec<String>>,
    pub use_regex: Option<bool>,
    pub case_sensitive: Option<bool>,
}

impl ActivationEntry {
    /// Name used in findings: `uid`, then `id`, then `entry_<index>`.
    pub fn label(&self, index: usize) -> String {
        self.uid
            .as_ref()
            .filter(|id| !id.is_blank())
            .or_else(|| self.id.as_ref().filter(|id| !id.is_blank()))
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("entry_{}", index))
    }

    pub fn primary_keys(&self) -> &[String] {
        self.keys.as_deref().unwrap_or_default()
    }

    pub fn secondary_keys(&self) -> &[String] {
        self.secondary_keys.as_deref().unwrap_or_default()
    }

    pub fn is_pattern_mode(&self) -> bool {
        self.use_regex == Some(true)
    }

    /// Only an explicit `false` opts out of case sensitivity.
    pub fn is_case_insensitive(&self) -> bool {
        self.case_sensitive == Some(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(serde_json::Number),
    Text(String),
}

impl EntryId {
    fn is_blank(&self) -> bool {
        matches!(self, EntryId::Text(text) if text.is_empty())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Number(n) => write!(f, "{}", n),
            EntryId::Text(s) => write!(f, "{}", s),
        }
    }
}

fn non_blank(s: &str) -> bool {
    !s.trim().is_empty()
}

/// `null`, `false`, `0` and blank strings count as missing.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => non_blank(s),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn entry_list<'de, D>(deserializer: D) -> Result<Option<Vec<ActivationEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        list @ Value::Array(_) => serde_json::from_value(list)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
