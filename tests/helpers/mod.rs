use worldbook::findings::Finding;
use worldbook::parse::*;

// =============================================================================
// Document builders
// =============================================================================

/// A profession with every required field filled in.
pub fn profession(uid: &str) -> Profession {
    Profession {
        uid: Some(uid.into()),
        name: Some(format!("{} name", uid)),
        level: Some(Level::Rank(1.into())),
        description: Some(format!("{} description", uid)),
        ..Default::default()
    }
}

pub fn linked(uid: &str, next: &str) -> Profession {
    Profession {
        next_profession: Some(next.into()),
        ..profession(uid)
    }
}

pub fn with_previous(mut profession: Profession, previous: &str) -> Profession {
    profession.requirements = Some(Requirements {
        previous_profession: Some(previous.into()),
    });
    profession
}

/// A career system whose professions are keyed by their uid.
pub fn system(prefix: Option<&str>, professions: Vec<Profession>) -> CareerSystem {
    CareerSystem {
        prefix: prefix.map(Into::into),
        professions: Some(
            professions
                .into_iter()
                .map(|p| (p.uid.clone().unwrap_or_default(), p))
                .collect(),
        ),
    }
}

pub fn entity(uid: &str, name: &str) -> NamedEntity {
    NamedEntity {
        uid: Some(uid.into()),
        name: Some(name.into()),
    }
}

pub fn shared(locations: Vec<NamedEntity>, organizations: Vec<NamedEntity>) -> SharedResources {
    let keyed = |items: Vec<NamedEntity>| -> Keyed<NamedEntity> {
        items
            .into_iter()
            .map(|e| (e.uid.clone().unwrap_or_default(), e))
            .collect()
    };
    SharedResources {
        locations: Some(keyed(locations)),
        organizations: Some(keyed(organizations)),
    }
}

/// Minimal schema-valid worldbook holding the given systems.
pub fn worldbook(systems: Vec<(&str, CareerSystem)>) -> Worldbook {
    Worldbook {
        version: Some("1.0.0".into()),
        description: Some("Test worldbook".into()),
        career_systems: Some(systems.into_iter().collect()),
        shared_resources: Some(shared(vec![], vec![])),
        ..Default::default()
    }
}

pub fn document(worldbook: Worldbook) -> Document {
    Document {
        worldbook: Some(worldbook),
    }
}

pub fn entry(uid: &str, keys: &[&str]) -> ActivationEntry {
    ActivationEntry {
        uid: Some(EntryId::Text(uid.into())),
        keys: Some(keys.iter().map(|k| k.to_string()).collect()),
        ..Default::default()
    }
}

pub fn pattern_entry(uid: &str, patterns: &[&str]) -> ActivationEntry {
    ActivationEntry {
        use_regex: Some(true),
        ..entry(uid, patterns)
    }
}

// =============================================================================
// Assertions
// =============================================================================

pub fn count(findings: &[Finding], code: &str) -> usize {
    findings.iter().filter(|f| f.code() == code).count()
}

pub fn assert_has(findings: &[Finding], code: &str) {
    assert!(
        findings.iter().any(|f| f.code() == code),
        "Expected finding {}, got: {:#?}",
        code,
        findings
    );
}

pub fn assert_none(findings: &[Finding], code: &str) {
    assert!(
        !findings.iter().any(|f| f.code() == code),
        "Did not expect finding {}, but got: {:#?}",
        code,
        findings
    );
}
