//! Document-wide identifier registry.
//!
//! Walks shared resources, then career systems, then bridging lore, each in
//! source order. The first declaration of an identifier wins; every later one
//! is a `DUPLICATE_IDENTIFIER`.

use std::collections::HashMap;

use crate::findings::{Detail, Finding};
use crate::parse::types::{NamedEntity, Worldbook};

/// Where an identifier was first declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub context: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Inserted,
    /// The identifier was already taken; the registry keeps `original`.
    Duplicate { original: Declaration },
}

#[derive(Debug, Default)]
pub struct IdentifierRegistry {
    entries: HashMap<String, Declaration>,
    duplicates: usize,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, uid: &str, context: &str, name: Option<&str>) -> Registration {
        if let Some(existing) = self.entries.get(uid) {
            self.duplicates += 1;
            return Registration::Duplicate {
                original: existing.clone(),
            };
        }
        self.entries.insert(
            uid.to_string(),
            Declaration {
                context: context.to_string(),
                name: name.map(str::to_string),
            },
        );
        Registration::Inserted
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.entries.contains_key(uid)
    }

    pub fn get(&self, uid: &str) -> Option<&Declaration> {
        self.entries.get(uid)
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rejected repeat registrations.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

/// Build the registry for a worldbook. Returns one critical finding per
/// repeat declaration.
pub fn build_registry(worldbook: &Worldbook) -> (IdentifierRegistry, Vec<Finding>) {
    let mut registry = IdentifierRegistry::new();
    let mut findings = Vec::new();

    if let Some(shared) = &worldbook.shared_resources {
        for (context, group) in [
            ("sharedResources.locations", &shared.locations),
            ("sharedResources.organizations", &shared.organizations),
        ] {
            for entity in group.iter().flat_map(|g| g.values()) {
                register_entity(&mut registry, entity, context, &mut findings);
            }
        }
    }

    for (system_name, system) in worldbook.systems() {
        let context = format!("careerSystems.{}.professions", system_name);
        for (_, profession) in system.professions() {
            let Some(uid) = profession.id() else { continue };
            record(
                &mut registry,
                uid,
                &context,
                profession.name.as_deref(),
                &mut findings,
            );
        }
    }

    if let Some(lore) = &worldbook.bridging_lore {
        for (context, group) in [
            ("bridgingLore.interactions", &lore.interactions),
            ("bridgingLore.sharedQuests", &lore.shared_quests),
        ] {
            for entity in group.iter().flatten() {
                register_entity(&mut registry, entity, context, &mut findings);
            }
        }
    }

    tracing::info!(
        identifiers = registry.len(),
        duplicates = registry.duplicates(),
        "identifier registry built"
    );

    (registry, findings)
}

fn register_entity(
    registry: &mut IdentifierRegistry,
    entity: &NamedEntity,
    context: &str,
    findings: &mut Vec<Finding>,
) {
    if let Some(uid) = entity.id() {
        record(registry, uid, context, entity.name.as_deref(), findings);
    }
}

fn record(
    registry: &mut IdentifierRegistry,
    uid: &str,
    context: &str,
    name: Option<&str>,
    findings: &mut Vec<Finding>,
) {
    if let Registration::Duplicate { original } = registry.register(uid, context, name) {
        findings.push(Finding::critical(
            Detail::DuplicateIdentifier {
                uid: uid.to_string(),
                contexts: [original.context.clone(), context.to_string()],
                names: [original.name, name.map(str::to_string)],
            },
            format!(
                "Duplicate UID \"{}\" found in {} and {}",
                uid, original.context, context
            ),
        ));
    }
}
