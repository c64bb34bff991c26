//! Schema and naming-convention checks.

use crate::config::{REQUIRED_PROFESSION_FIELDS, ValidationOptions};
use crate::findings::{Detail, Finding};
use crate::parse::types::{Document, Profession, Worldbook};

/// Check the root container and its top-level members.
pub fn check_root(document: &Document, options: &ValidationOptions) -> Vec<Finding> {
    let mut findings = Vec::new();

    let Some(worldbook) = &document.worldbook else {
        findings.push(Finding::critical(
            Detail::SchemaError { field: None },
            "Missing root \"worldbook\" object",
        ));
        return findings;
    };

    for field in &options.required_top_level_fields {
        if !worldbook.has_field(field) {
            findings.push(Finding::critical(
                Detail::SchemaError {
                    field: Some(field.clone()),
                },
                format!("Missing required field: {}", field),
            ));
        }
    }

    if worldbook.career_systems.is_none() {
        findings.push(Finding::critical(
            Detail::SchemaError {
                field: Some("careerSystems".into()),
            },
            "Missing careerSystems object",
        ));
    }

    if worldbook.shared_resources.is_none() {
        findings.push(Finding::warning(
            Detail::SchemaWarning {
                field: Some("sharedResources".into()),
            },
            "Missing sharedResources object",
        ));
    }

    findings
}

/// Check required fields and the prefix convention of every profession.
pub fn check_professions(worldbook: &Worldbook) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (system_name, system) in worldbook.systems() {
        let prefix = system.prefix.as_deref().filter(|p| !p.is_empty());

        for (key, profession) in system.professions() {
            let uid = profession.display_id(key);

            for field in missing_fields(profession) {
                findings.push(Finding::critical(
                    Detail::MissingField {
                        system: system_name.to_string(),
                        profession: uid.to_string(),
                        field: field.to_string(),
                    },
                    format!(
                        "Missing required field \"{}\" in profession {} ({})",
                        field, uid, system_name
                    ),
                ));
            }

            let (Some(prefix), Some(id)) = (prefix, profession.id()) else {
                continue;
            };
            if !id.starts_with(prefix) {
                findings.push(Finding::warning(
                    Detail::NamingConventionViolation {
                        system: system_name.to_string(),
                        profession: id.to_string(),
                        expected_prefix: prefix.to_string(),
                    },
                    format!(
                        "Profession UID \"{}\" does not follow prefix convention \"{}\"",
                        id, prefix
                    ),
                ));
            }
        }
    }

    tracing::info!(findings = findings.len(), "profession conventions checked");
    findings
}

fn missing_fields(profession: &Profession) -> impl Iterator<Item = &'static str> + '_ {
    REQUIRED_PROFESSION_FIELDS
        .into_iter()
        .filter(move |field| match *field {
            "uid" => profession.id().is_none(),
            "name" => is_blank(profession.name.as_deref()),
            "level" => profession.level.as_ref().is_none_or(|level| level.is_blank()),
            "description" => is_blank(profession.description.as_deref()),
            _ => false,
        })
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
