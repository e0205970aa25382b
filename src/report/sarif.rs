// SPDX-License-Identifier: PMPL-1.0-or-later

//! SARIF 2.1.0 output for GitHub Security tab integration
//!
//! Converts report issues into OASIS SARIF format.
//! See: https://docs.oasis-open.org/sarif/sarif/v2.1.0/sarif-v2.1.0.html

use crate::types::{AnalysisReport, Category, Severity};
use anyhow::Result;
use serde::Serialize;

const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

/// Top-level SARIF log
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLog {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    pub runs: Vec<SarifRun>,
}

/// A single SARIF run (one tool execution)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

/// Tool descriptor
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifTool {
    pub driver: SarifToolComponent,
}

/// Tool component with rules
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifToolComponent {
    pub name: String,
    pub version: String,
    pub information_uri: String,
    pub rules: Vec<SarifRule>,
}

/// Rule descriptor
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRule {
    pub id: String,
    pub name: String,
    pub short_description: SarifMessage,
    pub default_configuration: SarifConfiguration,
}

/// Configuration with level
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifConfiguration {
    pub level: String,
}

/// A single finding
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    pub rule_id: String,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

/// Message with text
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifMessage {
    pub text: String,
}

/// Physical location
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLocation {
    pub physical_location: SarifPhysicalLocation,
}

/// Physical location with artifact
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifPhysicalLocation {
    pub artifact_location: SarifArtifactLocation,
    pub region: SarifRegion,
}

/// Artifact URI
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifArtifactLocation {
    pub uri: String,
}

/// Region (line number)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRegion {
    pub start_line: usize,
}

/// Map a finding category to a stable rule ID
fn rule_id(category: &Category) -> &'static str {
    match category {
        Category::Security => "INQ001",
        Category::Performance => "INQ002",
        Category::Style => "INQ003",
        Category::Bug => "INQ004",
    }
}

/// Map Severity to SARIF level
fn sarif_level(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "error",
        Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low => "note",
    }
}

/// Convert an AnalysisReport to SARIF
pub fn to_sarif(report: &AnalysisReport) -> SarifLog {
    // Collect unique rules
    let mut seen_categories = std::collections::HashSet::new();
    let mut rules = Vec::new();

    for issue in &report.issues {
        if seen_categories.insert(issue.category) {
            rules.push(SarifRule {
                id: rule_id(&issue.category).to_string(),
                name: issue.category.as_str().to_string(),
                short_description: SarifMessage {
                    text: format!("{} finding", issue.category),
                },
                default_configuration: SarifConfiguration {
                    level: sarif_level(&issue.severity).to_string(),
                },
            });
        }
    }

    let results: Vec<SarifResult> = report
        .issues
        .iter()
        .map(|issue| SarifResult {
            rule_id: rule_id(&issue.category).to_string(),
            level: sarif_level(&issue.severity).to_string(),
            message: SarifMessage {
                text: issue.description.clone(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation {
                        uri: report.filename.clone(),
                    },
                    region: SarifRegion {
                        start_line: issue.line_number,
                    },
                },
            }],
        })
        .collect();

    SarifLog {
        schema: SARIF_SCHEMA.to_string(),
        version: SARIF_VERSION.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifToolComponent {
                    name: "inquest".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: "https://github.com/hyperpolymath/inquest".to_string(),
                    rules,
                },
            },
            results,
        }],
    }
}

/// Serialize a SARIF log to JSON string
pub fn to_sarif_json(report: &AnalysisReport) -> Result<String> {
    let log = to_sarif(report);
    let json = serde_json::to_string_pretty(&log)?;
    Ok(json)
}
