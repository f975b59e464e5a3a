use std::fmt;

use super::schema::DailyStatsConfig;
use crate::domain::ValueKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    MissingRequired,
    InvalidValue,
    InvalidSchema,
    PresetSchema,
}

impl IssueKind {
    pub fn severity(self) -> Severity {
        match self {
            IssueKind::PresetSchema => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// One finding about a config key, addressed by its dotted path
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub path: String,
    pub message: String,
    pub kind: IssueKind,
}

impl ConfigIssue {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    issues: Vec<ConfigIssue>,
}

impl ValidationReport {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>, kind: IssueKind) {
        self.issues.push(ConfigIssue {
            path: path.into(),
            message: message.into(),
            kind,
        });
    }

    pub fn errors(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
    }

    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Error messages joined into one line, empty when valid
    pub fn error_summary(&self) -> String {
        self.errors()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Checks a loaded config before any source is built
pub fn validate(config: &DailyStatsConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.source.view_id.trim().is_empty() {
        report.push(
            "source.view_id",
            "a data source identifier is required",
            IssueKind::MissingRequired,
        );
    }
    if config.source.source_type.trim().is_empty() {
        report.push(
            "source.type",
            "must not be empty",
            IssueKind::MissingRequired,
        );
    }
    if config.query.lookback_days == 0 {
        report.push(
            "query.lookback_days",
            "must be at least one day",
            IssueKind::InvalidValue,
        );
    }

    if config.uses_preset() {
        report.push(
            "metrics",
            "none declared, using the session stats preset",
            IssueKind::PresetSchema,
        );
    }

    let mut kinds_ok = true;
    for (index, spec) in config.metrics.iter().enumerate() {
        if spec.kind.parse::<ValueKind>().is_err() {
            kinds_ok = false;
            report.push(
                format!("metrics[{index}].kind"),
                format!(
                    "'{}' is not supported for '{}', expected integer or float",
                    spec.kind, spec.field
                ),
                IssueKind::InvalidValue,
            );
        }
    }

    // Binding only says something new once every kind parses
    if kinds_ok {
        if let Err(e) = config.record_schema() {
            report.push("metrics", e.to_string(), IssueKind::InvalidSchema);
        }
    }

    report
}
