//! Cross-reference resolution against the identifier registry.

use super::registry::IdentifierRegistry;
use crate::findings::{Detail, Finding, ReferenceKind};
use crate::parse::types::{Profession, Worldbook};

/// Resolve every location, organization and cross-system reference declared
/// by a profession. Direct misses are critical; cross-system misses are
/// warnings because the target system may not exist yet.
pub fn resolve_references(worldbook: &Worldbook, registry: &IdentifierRegistry) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (_, system) in worldbook.systems() {
        for (key, profession) in system.professions() {
            let uid = profession.display_id(key);
            check_direct(profession, uid, registry, &mut findings);
            check_cross_system(profession, uid, registry, &mut findings);
        }
    }

    tracing::info!(unresolved = findings.len(), "cross-references resolved");
    findings
}

fn check_direct(
    profession: &Profession,
    uid: &str,
    registry: &IdentifierRegistry,
    findings: &mut Vec<Finding>,
) {
    for (kind, references) in [
        (ReferenceKind::Location, &profession.locations),
        (ReferenceKind::Organization, &profession.organizations),
    ] {
        for reference in references.iter().flatten() {
            if registry.contains(reference) {
                continue;
            }
            findings.push(Finding::critical(
                Detail::InvalidReference {
                    profession: uid.to_string(),
                    reference: reference.clone(),
                    reference_type: kind,
                },
                format!(
                    "Invalid {} reference \"{}\" in profession {}",
                    kind, reference, uid
                ),
            ));
        }
    }
}

fn check_cross_system(
    profession: &Profession,
    uid: &str,
    registry: &IdentifierRegistry,
    findings: &mut Vec<Finding>,
) {
    let Some(cross_references) = &profession.cross_references else {
        return;
    };

    for (target_system, references) in cross_references.iter() {
        for reference in references {
            if registry.contains(reference) {
                continue;
            }
            findings.push(Finding::warning(
                Detail::InvalidCrossReference {
                    profession: uid.to_string(),
                    reference: reference.clone(),
                    target_system: target_system.to_string(),
                },
                format!(
                    "Invalid cross-system reference \"{}\" ({}) in profession {}",
                    reference, target_system, uid
                ),
            ));
        }
    }
}
