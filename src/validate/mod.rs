//! Validation phase: runs every analysis over a parsed worldbook.
//!
//! Order: schema checks → identifier registry → chain walker → reference
//! resolver → trigger analyzer → statistics. Each analysis returns its own
//! findings; only this module writes to the result.

pub mod chains;
pub mod references;
pub mod registry;
pub mod schema;
pub mod triggers;

use std::path::Path;

use crate::config::ValidationOptions;
use crate::error::LoadError;
use crate::findings::{Analysis, Detail, Finding, Statistics, ValidationResult};
use crate::parse::{self, Document, Worldbook};

use self::registry::IdentifierRegistry;

/// Validate a parsed document.
pub fn validate_document(document: &Document, options: &ValidationOptions) -> ValidationResult {
    let mut result = ValidationResult::default();

    result.absorb(Analysis::Schema, schema::check_root(document, options));
    let Some(worldbook) = &document.worldbook else {
        tracing::warn!("worldbook has no root object; skipping analysis");
        return result.finish();
    };
    result.absorb(Analysis::Schema, schema::check_professions(worldbook));

    let (registry, duplicates) = registry::build_registry(worldbook);
    result.absorb(Analysis::Registry, duplicates);

    let chains = chains::walk_chains(worldbook, &registry);
    result.absorb(Analysis::Chains, chains.findings);

    result.absorb(
        Analysis::References,
        references::resolve_references(worldbook, &registry),
    );

    let scan = triggers::analyze_triggers(worldbook.entries.as_deref(), options);
    let note = scan.note();
    result.absorb(Analysis::Triggers, scan.findings);
    result.absorb(Analysis::Summary, vec![note]);

    result.statistics = statistics(worldbook, &registry, chains.cycles);
    let result = result.finish();
    tracing::info!(
        errors = result.summary.total_errors,
        warnings = result.summary.total_warnings,
        info = result.summary.total_info,
        "worldbook validated"
    );
    result
}

/// Parse and validate worldbook JSON text.
pub fn validate_json(json: &str, options: &ValidationOptions) -> ValidationResult {
    match parse::parse(json) {
        Ok(document) => validate_document(&document, options),
        Err(e) => load_failure(None, &e),
    }
}

/// Load and validate a worldbook file. A load failure yields a result holding
/// only the `FILE_LOAD_ERROR` finding.
pub fn validate_path(path: impl AsRef<Path>, options: &ValidationOptions) -> ValidationResult {
    let path = path.as_ref();
    match parse::load(path) {
        Ok(document) => validate_document(&document, options),
        Err(e) => load_failure(Some(path), &e),
    }
}

fn load_failure(path: Option<&Path>, error: &LoadError) -> ValidationResult {
    tracing::warn!(%error, "worldbook could not be loaded");
    let mut result = ValidationResult::default();
    result.absorb(
        Analysis::Load,
        vec![Finding::critical(
            Detail::FileLoadError {
                file: path.map(|p| p.display().to_string()),
                error: error.to_string(),
            },
            error.to_string(),
        )],
    );
    result.finish()
}

fn statistics(worldbook: &Worldbook, registry: &IdentifierRegistry, cycles: usize) -> Statistics {
    let total_professions = worldbook
        .systems()
        .map(|(_, system)| system.professions.as_ref().map_or(0, |p| p.len()))
        .sum();

    let total_shared_resources = worldbook.shared_resources.as_ref().map_or(0, |shared| {
        shared.locations.as_ref().map_or(0, |l| l.len())
            + shared.organizations.as_ref().map_or(0, |o| o.len())
    });

    let total_bridging_lore = worldbook.bridging_lore.as_ref().map_or(0, |lore| {
        lore.interactions.as_ref().map_or(0, Vec::len)
            + lore.shared_quests.as_ref().map_or(0, Vec::len)
    });

    Statistics {
        total_entries: worldbook.entries.as_ref().map_or(0, Vec::len),
        total_professions,
        total_shared_resources,
        total_bridging_lore,
        unique_identifiers: registry.len(),
        circular_references: cycles,
        duplicate_identifiers: registry.duplicates(),
    }
}
