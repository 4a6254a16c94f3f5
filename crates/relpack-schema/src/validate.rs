use crate::manifest::PackageManifest;
use serde::Serialize;
use std::collections::BTreeSet;

/// Severity of a single validation finding.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One categorized validation finding with a type tag and detail text.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub kind: String,
    pub detail: String,
}

impl Finding {
    pub fn error(kind: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind: kind.into(),
            detail: detail.into(),
        }
    }

    pub fn warning(kind: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind: kind.into(),
            detail: detail.into(),
        }
    }
}

/// Outcome of one validation check: zero or more findings.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ValidationResult {
    pub findings: Vec<Finding>,
}

impl ValidationResult {
    pub fn has_error(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }
}

/// Validation as a capability: accepts a finished document, returns
/// categorized findings. The generator only consumes the pass/fail verdict
/// and logs the findings, so tests can plug in a stub returning canned
/// results instead of running the structural checks.
pub trait ManifestValidator {
    fn validate(&self, manifest: &PackageManifest) -> Vec<ValidationResult>;
}

/// Built-in structural checks over a package manifest.
///
/// All checks run to completion; findings are aggregated rather than
/// short-circuited so a caller sees the complete picture in one pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl ManifestValidator for StructuralValidator {
    fn validate(&self, manifest: &PackageManifest) -> Vec<ValidationResult> {
        let mut result = ValidationResult::default();

        if manifest.package_name.is_empty() {
            result
                .findings
                .push(Finding::error("FieldMissing", "packageName must be set"));
        }
        if manifest.channels.is_empty() {
            result.findings.push(Finding::error(
                "FieldMissing",
                "at least one channel must be set",
            ));
        }

        let mut seen = BTreeSet::new();
        for channel in &manifest.channels {
            if channel.name.is_empty() {
                result
                    .findings
                    .push(Finding::error("FieldMissing", "channel name must be set"));
            } else if !seen.insert(channel.name.as_str()) {
                result.findings.push(Finding::error(
                    "DuplicateChannel",
                    format!("duplicate channel '{}'", channel.name),
                ));
            }
            if channel.current_csv.is_empty() {
                result.findings.push(Finding::error(
                    "FieldMissing",
                    format!("channel '{}' must set currentCSV", channel.name),
                ));
            } else if !manifest.package_name.is_empty()
                && !channel
                    .current_csv
                    .starts_with(&format!("{}.v", manifest.package_name))
            {
                result.findings.push(Finding::warning(
                    "CSVNameFormat",
                    format!(
                        "channel '{}': currentCSV '{}' does not follow '{}.v<version>'",
                        channel.name, channel.current_csv, manifest.package_name
                    ),
                ));
            }
        }

        if !manifest.channels.is_empty() {
            if manifest.default_channel.is_empty() {
                result.findings.push(Finding::error(
                    "InvalidDefaultChannel",
                    "defaultChannel must be set",
                ));
            } else if manifest.channel(&manifest.default_channel).is_none() {
                result.findings.push(Finding::error(
                    "InvalidDefaultChannel",
                    format!(
                        "defaultChannel '{}' does not match any channel",
                        manifest.default_channel
                    ),
                ));
            }
        }

        vec![result]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Channel;

    fn valid_manifest() -> PackageManifest {
        PackageManifest {
            channels: vec![Channel {
                current_csv: "op.v0.0.1".to_owned(),
                name: "alpha".to_owned(),
            }],
            default_channel: "alpha".to_owned(),
            package_name: "op".to_owned(),
        }
    }

    fn all_findings(manifest: &PackageManifest) -> Vec<Finding> {
        StructuralValidator
            .validate(manifest)
            .into_iter()
            .flat_map(|r| r.findings)
            .collect()
    }

    #[test]
    fn valid_manifest_passes() {
        let results = StructuralValidator.validate(&valid_manifest());
        assert!(results.iter().all(|r| !r.has_error()));
        assert!(results.iter().all(|r| r.findings.is_empty()));
    }

    #[test]
    fn empty_package_name_is_an_error() {
        let mut manifest = valid_manifest();
        manifest.package_name = String::new();
        let findings = all_findings(&manifest);
        assert!(findings
            .iter()
            .any(|f| f.severity == Severity::Error && f.detail.contains("packageName")));
    }

    #[test]
    fn empty_channel_list_is_an_error() {
        let mut manifest = valid_manifest();
        manifest.channels.clear();
        manifest.default_channel.clear();
        let results = StructuralValidator.validate(&manifest);
        assert!(results.iter().any(ValidationResult::has_error));
    }

    #[test]
    fn duplicate_channel_names_are_an_error() {
        let mut manifest = valid_manifest();
        manifest.channels.push(Channel {
            current_csv: "op.v0.0.2".to_owned(),
            name: "alpha".to_owned(),
        });
        let findings = all_findings(&manifest);
        assert!(findings.iter().any(|f| f.kind == "DuplicateChannel"));
    }

    #[test]
    fn missing_default_channel_is_an_error() {
        let mut manifest = valid_manifest();
        manifest.default_channel = String::new();
        let findings = all_findings(&manifest);
        assert!(findings.iter().any(|f| f.kind == "InvalidDefaultChannel"));
    }

    #[test]
    fn dangling_default_channel_is_an_error() {
        let mut manifest = valid_manifest();
        manifest.default_channel = "stable".to_owned();
        let findings = all_findings(&manifest);
        assert!(findings
            .iter()
            .any(|f| f.kind == "InvalidDefaultChannel" && f.detail.contains("stable")));
    }

    #[test]
    fn empty_current_csv_is_an_error() {
        let mut manifest = valid_manifest();
        manifest.channels[0].current_csv = String::new();
        let findings = all_findings(&manifest);
        assert!(findings
            .iter()
            .any(|f| f.severity == Severity::Error && f.detail.contains("currentCSV")));
    }

    #[test]
    fn unconventional_csv_name_is_only_a_warning() {
        let mut manifest = valid_manifest();
        manifest.channels[0].current_csv = "something-else.v1".to_owned();
        let results = StructuralValidator.validate(&manifest);
        assert!(results.iter().all(|r| !r.has_error()));
        let findings = all_findings(&manifest);
        assert!(findings
            .iter()
            .any(|f| f.severity == Severity::Warning && f.kind == "CSVNameFormat"));
    }

    #[test]
    fn findings_are_aggregated_not_short_circuited() {
        let manifest = PackageManifest {
            channels: vec![
                Channel {
                    current_csv: String::new(),
                    name: "alpha".to_owned(),
                },
                Channel {
                    current_csv: "op.v2".to_owned(),
                    name: "alpha".to_owned(),
                },
            ],
            default_channel: "stable".to_owned(),
            package_name: String::new(),
        };
        let findings = all_findings(&manifest);
        // empty packageName, empty currentCSV, duplicate channel, bad default
        assert!(findings.len() >= 4);
    }
}
