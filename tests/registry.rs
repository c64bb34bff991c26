//! Integration tests for the identifier registry.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use worldbook::config::ValidationOptions;
use worldbook::findings::Detail;
use worldbook::parse::BridgingLore;
use worldbook::validate::registry::build_registry;
use worldbook::validate::validate_document;

#[test]
fn unique_identifiers_register_cleanly() {
    let mut wb = worldbook(vec![("s", system(None, vec![profession("p1"), profession("p2")]))]);
    wb.shared_resources = Some(shared(vec![entity("loc_1", "Docks")], vec![entity("org_1", "Guild")]));
    let (registry, findings) = build_registry(&wb);

    assert!(findings.is_empty());
    assert_eq!(registry.len(), 4);
    assert_eq!(registry.duplicates(), 0);
    assert_eq!(
        registry.get("p1").unwrap().context,
        "careerSystems.s.professions"
    );
}

#[test]
fn shared_resources_win_over_professions() {
    let mut wb = worldbook(vec![("s", system(None, vec![profession("dup")]))]);
    wb.shared_resources = Some(shared(vec![entity("dup", "Docks")], vec![]));
    let (registry, findings) = build_registry(&wb);

    assert_eq!(findings.len(), 1);
    assert_eq!(
        registry.get("dup").unwrap().context,
        "sharedResources.locations"
    );
    match &findings[0].detail {
        Detail::DuplicateIdentifier {
            uid,
            contexts,
            names,
        } => {
            assert_eq!(uid, "dup");
            assert_eq!(contexts[0], "sharedResources.locations");
            assert_eq!(contexts[1], "careerSystems.s.professions");
            assert_eq!(names[0].as_deref(), Some("Docks"));
            assert_eq!(names[1].as_deref(), Some("dup name"));
        }
        other => panic!("Unexpected detail {:?}", other),
    }
}

#[test]
fn one_finding_per_repeat_insertion() {
    let mut wb = worldbook(vec![
        ("a", system(None, vec![profession("x")])),
        ("b", system(None, vec![profession("x")])),
    ]);
    wb.bridging_lore = Some(BridgingLore {
        interactions: Some(vec![entity("x", "Meeting")]),
        shared_quests: Some(vec![entity("q", "Quest")]),
    });
    let (registry, findings) = build_registry(&wb);

    assert_eq!(count(&findings, "DUPLICATE_IDENTIFIER"), 2);
    assert_eq!(registry.duplicates(), 2);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get("x").unwrap().context, "careerSystems.a.professions");
}

#[test]
fn entities_without_uid_are_skipped() {
    let mut wb = worldbook(vec![]);
    let mut nameless = entity("", "Nowhere");
    nameless.uid = None;
    wb.shared_resources = Some(shared(vec![nameless, entity("", "Blank")], vec![]));
    let (registry, findings) = build_registry(&wb);
    assert!(registry.is_empty());
    assert!(findings.is_empty());
}

#[test]
fn duplicates_are_critical_and_counted() {
    let wb = worldbook(vec![
        ("a", system(None, vec![profession("x")])),
        ("b", system(None, vec![profession("x")])),
    ]);
    let result = validate_document(&document(wb), &ValidationOptions::default());

    assert!(!result.passed());
    assert_eq!(count(&result.critical_errors, "DUPLICATE_IDENTIFIER"), 1);
    assert_eq!(result.statistics.duplicate_identifiers, 1);
    assert!(result.summary.has_duplicate_identifiers);
}
