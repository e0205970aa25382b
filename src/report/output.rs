// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization back ends for exported reports

use crate::report::sarif;
use crate::types::AnalysisReport;
use anyhow::Result;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportOutputFormat {
    Json,
    Yaml,
    Sarif,
}

impl ReportOutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(ReportOutputFormat::Json),
            "yaml" | "yml" => Some(ReportOutputFormat::Yaml),
            "sarif" => Some(ReportOutputFormat::Sarif),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportOutputFormat::Json => "json",
            ReportOutputFormat::Yaml => "yaml",
            ReportOutputFormat::Sarif => "sarif",
        }
    }

    pub fn serialize(&self, report: &AnalysisReport) -> Result<String> {
        match self {
            ReportOutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            ReportOutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
            ReportOutputFormat::Sarif => sarif::to_sarif_json(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(ReportOutputFormat::parse("yml"), Some(ReportOutputFormat::Yaml));
        assert_eq!(ReportOutputFormat::parse("JSON"), Some(ReportOutputFormat::Json));
        assert_eq!(ReportOutputFormat::parse("xml"), None);
    }
}
