//! End-to-end: JSON → parse → validate → result.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use worldbook::config::ValidationOptions;
use worldbook::findings::{Detail, Status};
use worldbook::validate::{validate_json, validate_path};

#[test]
fn e2e_scenario_findings() {
    let json = include_str!("fixtures/scenario.json");
    let result = validate_json(json, &ValidationOptions::default());

    assert_eq!(count(&result.chain_findings, "VALID_CHAIN"), 1);
    assert_eq!(count(&result.chain_findings, "CIRCULAR_REFERENCE"), 1);
    assert_eq!(count(&result.reference_findings, "INVALID_REFERENCE"), 1);
    assert_eq!(count(&result.trigger_findings, "INVALID_REGEX"), 1);

    let critical: Vec<&str> = result.critical_errors.iter().map(|f| f.code()).collect();
    assert_eq!(
        critical,
        vec!["CIRCULAR_REFERENCE", "INVALID_REFERENCE", "INVALID_REGEX"]
    );
    assert!(result.warnings.is_empty(), "{:#?}", result.warnings);
    assert!(!result.passed());
    assert_eq!(result.status(), Status::Fail);
}

#[test]
fn e2e_scenario_chain_details() {
    let json = include_str!("fixtures/scenario.json");
    let result = validate_json(json, &ValidationOptions::default());

    for finding in &result.chain_findings {
        match &finding.detail {
            Detail::ValidChain { system, chain, .. } => {
                assert_eq!(system, "academic");
                assert_eq!(chain, &vec!["acad_student", "acad_scholar", "acad_professor"]);
            }
            Detail::CircularReference { system, chain } => {
                assert_eq!(system, "entertainment");
                assert_eq!(chain, &vec!["ent_busker", "ent_performer", "ent_busker"]);
            }
            other => panic!("Unexpected chain finding {:?}", other),
        }
    }
}

#[test]
fn e2e_scenario_statistics() {
    let json = include_str!("fixtures/scenario.json");
    let result = validate_json(json, &ValidationOptions::default());

    insta::assert_json_snapshot!(result.statistics, @r#"
    {
      "totalEntries": 1,
      "totalProfessions": 5,
      "totalSharedResources": 1,
      "totalBridgingLore": 0,
      "uniqueIdentifiers": 6,
      "circularReferences": 1,
      "duplicateIdentifiers": 0
    }
    "#);
    insta::assert_json_snapshot!(result.summary, @r#"
    {
      "totalErrors": 3,
      "totalWarnings": 0,
      "totalInfo": 2,
      "hasCircularReferences": true,
      "hasDuplicateIdentifiers": false
    }
    "#);
}

#[test]
fn e2e_valid_worldbook_passes() {
    let json = include_str!("fixtures/valid_worldbook.json");
    let result = validate_json(json, &ValidationOptions::default());

    assert!(result.critical_errors.is_empty(), "{:#?}", result.critical_errors);
    assert!(result.warnings.is_empty(), "{:#?}", result.warnings);
    assert_eq!(result.statistics.circular_references, 0);
    assert_eq!(result.statistics.total_professions, 5);
    assert_eq!(result.statistics.total_shared_resources, 3);
    assert_eq!(result.statistics.total_bridging_lore, 2);
    assert_eq!(result.statistics.unique_identifiers, 10);
    assert_eq!(count(&result.chain_findings, "VALID_CHAIN"), 2);
    assert_eq!(count(&result.trigger_findings, "VALID_REGEX"), 1);
    assert_eq!(result.status(), Status::Pass);
}

#[test]
fn e2e_runs_are_identical() {
    let json = include_str!("fixtures/scenario.json");
    let options = ValidationOptions::default();
    let first = serde_json::to_string(&validate_json(json, &options)).unwrap();
    let second = serde_json::to_string(&validate_json(json, &options)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn e2e_result_json_shape() {
    let json = include_str!("fixtures/scenario.json");
    let result = validate_json(json, &ValidationOptions::default());
    let value = serde_json::to_value(&result).unwrap();

    let cycle = &value["criticalErrors"][0];
    assert_eq!(cycle["type"], "CIRCULAR_REFERENCE");
    assert_eq!(cycle["severity"], "CRITICAL");
    assert_eq!(cycle["system"], "entertainment");
    assert!(cycle["message"].as_str().unwrap().contains("ent_busker -> ent_performer"));

    let reference = &value["criticalErrors"][1];
    assert_eq!(reference["referenceType"], "organization");
    assert_eq!(reference["reference"], "org_faculty_guild");

    assert_eq!(value["info"][0]["chainLength"], 3);
}

#[test]
fn e2e_loosely_typed_root_still_runs_every_analysis() {
    let mut value: serde_json::Value =
        serde_json::from_str(include_str!("fixtures/scenario.json")).unwrap();
    value["worldbook"]["version"] = serde_json::json!(2);
    value["worldbook"]["entries"] = serde_json::json!({"0": {"uid": 0, "keys": ["fire"]}});
    let result = validate_json(&value.to_string(), &ValidationOptions::default());

    assert_none(&result.critical_errors, "FILE_LOAD_ERROR");
    assert_none(&result.critical_errors, "SCHEMA_ERROR");
    assert_eq!(count(&result.chain_findings, "VALID_CHAIN"), 1);
    assert_eq!(count(&result.chain_findings, "CIRCULAR_REFERENCE"), 1);
    assert_eq!(count(&result.reference_findings, "INVALID_REFERENCE"), 1);
    assert!(result.trigger_findings.is_empty());
    assert_eq!(count(&result.info, "NO_TRIGGERS_FOUND"), 1);
    assert_eq!(result.statistics.total_entries, 0);
}

#[test]
fn e2e_unparseable_json_is_a_load_failure() {
    let result = validate_json("{ \"worldbook\": ", &ValidationOptions::default());

    assert_eq!(result.critical_errors.len(), 1);
    assert_eq!(result.critical_errors[0].code(), "FILE_LOAD_ERROR");
    assert!(result.warnings.is_empty());
    assert!(result.info.is_empty());
    assert_eq!(result.statistics, Default::default());
    assert!(!result.passed());
}

#[test]
fn e2e_missing_file_names_the_path() {
    let result = validate_path("tests/fixtures/missing.json", &ValidationOptions::default());

    assert_eq!(result.critical_errors.len(), 1);
    match &result.critical_errors[0].detail {
        Detail::FileLoadError { file, .. } => {
            assert_eq!(file.as_deref(), Some("tests/fixtures/missing.json"))
        }
        other => panic!("Unexpected detail {:?}", other),
    }
}

#[test]
fn e2e_validate_path_reads_fixture() {
    let result = validate_path("tests/fixtures/valid_worldbook.json", &ValidationOptions::default());
    assert!(result.passed());
}
