use std::fmt;
use std::path::PathBuf;

/// A discrete stage of registry validation.
///
/// Phases run strictly in declaration order. Any finding in one phase stops
/// the later phases from running, because their checks assume the earlier
/// guarantees hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// The registry directory layout is checked.
    Structure,
    /// README files are read from disk.
    FileLoad,
    /// Frontmatter is split off and decoded into typed entities.
    Parse,
    /// Field values and README bodies are validated.
    FieldValidation,
    /// Employer references and relative asset paths are resolved.
    CrossReference,
}

impl Phase {
    /// Every phase, in execution order.
    pub const ALL: [Phase; 5] = [
        Phase::Structure,
        Phase::FileLoad,
        Phase::Parse,
        Phase::FieldValidation,
        Phase::CrossReference,
    ];

    /// Short machine-friendly identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Phase::Structure => "structure",
            Phase::FileLoad => "file-load",
            Phase::Parse => "parse",
            Phase::FieldValidation => "field-validation",
            Phase::CrossReference => "cross-reference",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Structure => write!(f, "File structure validation"),
            Phase::FileLoad => write!(f, "Filesystem reading"),
            Phase::Parse => write!(f, "README parsing"),
            Phase::FieldValidation => write!(f, "README validation"),
            Phase::CrossReference => write!(f, "Cross-referencing"),
        }
    }
}

/// A single violation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub message: String,
    pub file: Option<PathBuf>,
    pub line: Option<usize>,
}

impl Finding {
    pub fn new(rule_id: &str, message: impl Into<String>) -> Self {
        Finding {
            rule_id: rule_id.to_string(),
            message: message.into(),
            file: None,
            line: None,
        }
    }

    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn at_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{}: {}", file.display(), line, self.message),
            (Some(file), None) => write!(f, "{}: {}", file.display(), self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

/// All findings collected during one phase.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PhaseReport {
    pub phase: Phase,
    pub findings: Vec<Finding>,
}

impl PhaseReport {
    /// Builds a report whose findings are stably sorted by file, then line.
    ///
    /// Findings without a file sort first. Work for a phase may be spread over
    /// several threads, so the sort is what makes output reproducible.
    pub fn new(phase: Phase, mut findings: Vec<Finding>) -> Self {
        findings.sort_by(|a, b| (&a.file, a.line).cmp(&(&b.file, b.line)));
        PhaseReport { phase, findings }
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Outcome of a complete validation run.
#[derive(Debug, serde::Serialize)]
pub struct ValidationReport {
    pub root: String,
    pub validated_at: String,
    pub files_scanned: usize,
    pub contributors: usize,
    pub resources: usize,
    /// Phases that actually ran, in order. The last one is the failing phase
    /// when the run did not pass.
    pub phases: Vec<PhaseReport>,
    pub failed_phase: Option<Phase>,
    pub passed: bool,
}

impl ValidationReport {
    pub fn from_phases(
        root: &str,
        phases: Vec<PhaseReport>,
        files_scanned: usize,
        contributors: usize,
        resources: usize,
    ) -> Self {
        let failed_phase = phases.iter().find(|p| !p.is_clean()).map(|p| p.phase);

        ValidationReport {
            root: root.to_string(),
            validated_at: chrono::Utc::now().to_rfc3339(),
            files_scanned,
            contributors,
            resources,
            phases,
            failed_phase,
            passed: failed_phase.is_none(),
        }
    }

    /// Returns the report for `phase`, or `None` if the phase never ran.
    pub fn phase(&self, phase: Phase) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase == phase)
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.phases.iter().flat_map(|p| p.findings.iter())
    }

    pub fn finding_count(&self) -> usize {
        self.phases.iter().map(|p| p.findings.len()).sum()
    }
}
