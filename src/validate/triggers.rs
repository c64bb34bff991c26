//! Activation entry trigger analysis.
//!
//! Keys are compared case-insensitively against the entry that first declared
//! them. Pattern-mode keys are lorebook patterns in the ECMAScript dialect, so
//! they are compiled with `fancy-regex` (lookaround and backreferences are
//! accepted). Patterns are only compiled here, never matched. The configured
//! size and nest limits bound compilation.
//!
//! The case-sensitivity check is a heuristic: a case-insensitive entry's key
//! is flagged whenever its normalized form is already registered, which
//! includes the entry's own registration of that key.

use std::collections::HashMap;

use fancy_regex::RegexBuilder;

use crate::config::ValidationOptions;
use crate::findings::{Detail, Finding};
use crate::parse::types::ActivationEntry;

#[derive(Debug, Default)]
pub struct TriggerScan {
    pub findings: Vec<Finding>,
    /// Number of entries scanned; `None` when the worldbook has no entry list.
    pub scanned: Option<usize>,
    pub unique_triggers: usize,
}

impl TriggerScan {
    /// The informational note summarizing the scan.
    pub fn note(&self) -> Finding {
        match self.scanned {
            Some(entries) => Finding::info(
                Detail::TriggerScanComplete {
                    entries,
                    unique_triggers: self.unique_triggers,
                },
                format!("Scanned {} entries for trigger issues", entries),
            ),
            None => Finding::info(
                Detail::NoTriggersFound,
                "No activation entries found in worldbook",
            ),
        }
    }
}

/// Normalized key → (index, label) of the entry that declared it first.
type SeenTriggers = HashMap<String, (usize, String)>;

pub fn analyze_triggers(
    entries: Option<&[ActivationEntry]>,
    options: &ValidationOptions,
) -> TriggerScan {
    let Some(entries) = entries else {
        tracing::debug!("no activation entries to scan");
        return TriggerScan::default();
    };

    let mut seen = SeenTriggers::new();
    let mut findings = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let label = entry.label(index);
        check_primary_keys(entry, index, &label, &mut seen, &mut findings);
        check_secondary_keys(entry, index, &label, &seen, &mut findings);
        if entry.is_pattern_mode() {
            check_patterns(entry, &label, options, &mut findings);
        }
        if entry.is_case_insensitive() {
            check_case_sensitivity(entry, &label, &seen, &mut findings);
        }
    }

    tracing::info!(
        entries = entries.len(),
        unique_triggers = seen.len(),
        findings = findings.len(),
        "activation entries scanned"
    );

    TriggerScan {
        findings,
        scanned: Some(entries.len()),
        unique_triggers: seen.len(),
    }
}

fn check_primary_keys(
    entry: &ActivationEntry,
    index: usize,
    label: &str,
    seen: &mut SeenTriggers,
    findings: &mut Vec<Finding>,
) {
    for key in entry.primary_keys() {
        let normalized = key.to_lowercase();
        match seen.get(&normalized) {
            Some((owner, _)) if *owner == index => {}
            Some((_, first)) => findings.push(Finding::warning(
                Detail::DuplicateTrigger {
                    trigger: key.clone(),
                    entries: [first.clone(), label.to_string()],
                },
                format!(
                    "Duplicate trigger \"{}\" found in entries {} and {}",
                    key, first, label
                ),
            )),
            None => {
                seen.insert(normalized, (index, label.to_string()));
            }
        }
    }
}

fn check_secondary_keys(
    entry: &ActivationEntry,
    index: usize,
    label: &str,
    seen: &SeenTriggers,
    findings: &mut Vec<Finding>,
) {
    for key in entry.secondary_keys() {
        match seen.get(&key.to_lowercase()) {
            Some((owner, first)) if *owner != index => findings.push(Finding::info(
                Detail::DuplicateSecondaryTrigger {
                    trigger: key.clone(),
                    entries: [first.clone(), label.to_string()],
                },
                format!(
                    "Duplicate secondary trigger \"{}\" in entry {} (first declared by {})",
                    key, label, first
                ),
            )),
            _ => {}
        }
    }
}

fn check_patterns(
    entry: &ActivationEntry,
    label: &str,
    options: &ValidationOptions,
    findings: &mut Vec<Finding>,
) {
    for pattern in entry.primary_keys() {
        match compile(pattern, options) {
            Ok(()) => findings.push(Finding::info(
                Detail::ValidRegex {
                    entry: label.to_string(),
                    pattern: pattern.clone(),
                },
                format!("Valid regex pattern: {}", pattern),
            )),
            Err(error) => {
                findings.push(Finding::critical(
                    Detail::InvalidRegex {
                        entry: label.to_string(),
                        pattern: pattern.clone(),
                        error: error.clone(),
                    },
                    format!("Invalid regex in entry {}: \"{}\": {}", label, pattern, error),
                ));
            }
        }
    }
}

fn compile(pattern: &str, options: &ValidationOptions) -> Result<(), String> {
    let depth = group_depth(pattern);
    if depth > options.pattern_nest_limit {
        return Err(format!(
            "group nesting depth {} exceeds limit of {}",
            depth, options.pattern_nest_limit
        ));
    }
    RegexBuilder::new(pattern)
        .delegate_size_limit(options.pattern_size_limit)
        .build()
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Deepest group nesting, ignoring escaped parentheses and class contents.
fn group_depth(pattern: &str) -> u32 {
    let mut depth = 0u32;
    let mut deepest = 0;
    let mut in_class = false;
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' => in_class = true,
            ']' => in_class = false,
            '(' if !in_class => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            ')' if !in_class => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

fn check_case_sensitivity(
    entry: &ActivationEntry,
    label: &str,
    seen: &SeenTriggers,
    findings: &mut Vec<Finding>,
) {
    for key in entry.primary_keys() {
        if seen.contains_key(&key.to_lowercase()) {
            findings.push(Finding::warning(
                Detail::CaseSensitivityConflict {
                    entry: label.to_string(),
                    trigger: key.clone(),
                },
                format!("Potential case sensitivity conflict with trigger \"{}\"", key),
            ));
        }
    }
}
