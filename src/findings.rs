//! Findings and the validation result handed to reporting.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Critical and error findings fail the run.
    pub fn blocks_pass(self) -> bool {
        matches!(self, Severity::Critical | Severity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChainLink {
    NextProfession,
    PreviousProfession,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceKind {
    Location,
    Organization,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Location => write!(f, "location"),
            ReferenceKind::Organization => write!(f, "organization"),
        }
    }
}

/// What a finding is about. Serialized as `type` plus the variant's context
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Detail {
    DuplicateIdentifier {
        uid: String,
        contexts: [String; 2],
        names: [Option<String>; 2],
    },
    CircularReference {
        system: String,
        chain: Vec<String>,
    },
    BrokenReference {
        system: String,
        from: String,
        to: String,
        link: ChainLink,
    },
    InconsistentChain {
        system: String,
        profession: String,
        previous: String,
    },
    #[serde(rename_all = "camelCase")]
    ValidChain {
        system: String,
        start_profession: String,
        chain_length: usize,
        chain: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    InvalidReference {
        profession: String,
        reference: String,
        reference_type: ReferenceKind,
    },
    #[serde(rename_all = "camelCase")]
    InvalidCrossReference {
        profession: String,
        reference: String,
        target_system: String,
    },
    DuplicateTrigger {
        trigger: String,
        entries: [String; 2],
    },
    DuplicateSecondaryTrigger {
        trigger: String,
        entries: [String; 2],
    },
    ValidRegex {
        entry: String,
        pattern: String,
    },
    InvalidRegex {
        entry: String,
        pattern: String,
        error: String,
    },
    CaseSensitivityConflict {
        entry: String,
        trigger: String,
    },
    MissingField {
        system: String,
        profession: String,
        field: String,
    },
    #[serde(rename_all = "camelCase")]
    NamingConventionViolation {
        system: String,
        profession: String,
        expected_prefix: String,
    },
    SchemaError {
        field: Option<String>,
    },
    SchemaWarning {
        field: Option<String>,
    },
    FileLoadError {
        file: Option<String>,
        error: String,
    },
    #[serde(rename_all = "camelCase")]
    TriggerScanComplete {
        entries: usize,
        unique_triggers: usize,
    },
    NoTriggersFound,
}

impl Detail {
    /// The stable `type` string consumers match on.
    pub fn code(&self) -> &'static str {
        match self {
            Detail::DuplicateIdentifier { .. } => "DUPLICATE_IDENTIFIER",
            Detail::CircularReference { .. } => "CIRCULAR_REFERENCE",
            Detail::BrokenReference { .. } => "BROKEN_REFERENCE",
            Detail::InconsistentChain { .. } => "INCONSISTENT_CHAIN",
            Detail::ValidChain { .. } => "VALID_CHAIN",
            Detail::InvalidReference { .. } => "INVALID_REFERENCE",
            Detail::InvalidCrossReference { .. } => "INVALID_CROSS_REFERENCE",
            Detail::DuplicateTrigger { .. } => "DUPLICATE_TRIGGER",
            Detail::DuplicateSecondaryTrigger { .. } => "DUPLICATE_SECONDARY_TRIGGER",
            Detail::ValidRegex { .. } => "VALID_REGEX",
            Detail::InvalidRegex { .. } => "INVALID_REGEX",
            Detail::CaseSensitivityConflict { .. } => "CASE_SENSITIVITY_CONFLICT",
            Detail::MissingField { .. } => "MISSING_FIELD",
            Detail::NamingConventionViolation { .. } => "NAMING_CONVENTION_VIOLATION",
            Detail::SchemaError { .. } => "SCHEMA_ERROR",
            Detail::SchemaWarning { .. } => "SCHEMA_WARNING",
            Detail::FileLoadError { .. } => "FILE_LOAD_ERROR",
            Detail::TriggerScanComplete { .. } => "TRIGGER_SCAN_COMPLETE",
            Detail::NoTriggersFound => "NO_TRIGGERS_FOUND",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    #[serde(flatten)]
    pub detail: Detail,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn new(severity: Severity, detail: Detail, message: impl Into<String>) -> Self {
        Finding {
            detail,
            severity,
            message: message.into(),
        }
    }

    pub fn critical(detail: Detail, message: impl Into<String>) -> Self {
        Finding::new(Severity::Critical, detail, message)
    }

    pub fn error(detail: Detail, message: impl Into<String>) -> Self {
        Finding::new(Severity::Error, detail, message)
    }

    pub fn warning(detail: Detail, message: impl Into<String>) -> Self {
        Finding::new(Severity::Warning, detail, message)
    }

    pub fn info(detail: Detail, message: impl Into<String>) -> Self {
        Finding::new(Severity::Info, detail, message)
    }

    pub fn code(&self) -> &'static str {
        self.detail.code()
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}:{}] {}", self.severity, self.code(), self.message)
    }
}

// =============================================================================
// RESULT
// =============================================================================

/// Which analysis produced a batch of findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    Load,
    Schema,
    Registry,
    Chains,
    References,
    Triggers,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Pass,
    PassWithWarnings,
    Fail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_entries: usize,
    pub total_professions: usize,
    pub total_shared_resources: usize,
    pub total_bridging_lore: usize,
    pub unique_identifiers: usize,
    pub circular_references: usize,
    pub duplicate_identifiers: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_info: usize,
    pub has_circular_references: bool,
    pub has_duplicate_identifiers: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub summary: Summary,
    pub statistics: Statistics,
    pub critical_errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub info: Vec<Finding>,
    pub schema_findings: Vec<Finding>,
    pub chain_findings: Vec<Finding>,
    pub reference_findings: Vec<Finding>,
    pub trigger_findings: Vec<Finding>,
}

impl ValidationResult {
    /// Route a batch of findings into the severity buckets and, where the
    /// analysis has one, its own list.
    pub(crate) fn absorb(&mut self, analysis: Analysis, findings: Vec<Finding>) {
        for finding in findings {
            let list = match analysis {
                Analysis::Schema => Some(&mut self.schema_findings),
                Analysis::Chains => Some(&mut self.chain_findings),
                Analysis::References => Some(&mut self.reference_findings),
                Analysis::Triggers => Some(&mut self.trigger_findings),
                Analysis::Load | Analysis::Registry | Analysis::Summary => None,
            };
            if let Some(list) = list {
                list.push(finding.clone());
            }
            match finding.severity {
                Severity::Critical | Severity::Error => self.critical_errors.push(finding),
                Severity::Warning => self.warnings.push(finding),
                Severity::Info => self.info.push(finding),
            }
        }
    }

    /// Freeze the counters once every analysis has reported.
    pub(crate) fn finish(mut self) -> Self {
        self.summary = Summary {
            total_errors: self.critical_errors.len(),
            total_warnings: self.warnings.len(),
            total_info: self.info.len(),
            has_circular_references: self.statistics.circular_references > 0,
            has_duplicate_identifiers: self.statistics.duplicate_identifiers > 0,
        };
        self
    }

    pub fn passed(&self) -> bool {
        self.critical_errors.is_empty()
    }

    pub fn status(&self) -> Status {
        if !self.passed() {
            Status::Fail
        } else if !self.warnings.is_empty() {
            Status::PassWithWarnings
        } else {
            Status::Pass
        }
    }

    /// Every finding in the severity buckets, critical first.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.critical_errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
    }

    pub fn count(&self, code: &str) -> usize {
        self.findings().filter(|f| f.code() == code).count()
    }
}
