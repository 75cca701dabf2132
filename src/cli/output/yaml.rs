//! YAML output formatting

use crate::error::AuditError;

use super::ReportRenderer;
use crate::audit::checks::{CoverageReport, SecurityReport};
use crate::audit::results::AuditResult;

pub struct YamlOutput;

impl YamlOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for YamlOutput {
    fn render_report(&self, result: &AuditResult) -> Result<String, AuditError> {
        Ok(serde_yaml::to_string(result)?)
    }

    fn render_security(&self, report: &SecurityReport) -> Result<String, AuditError> {
        Ok(serde_yaml::to_string(report)?)
    }

    fn render_coverage(&self, report: &CoverageReport) -> Result<String, AuditError> {
        Ok(serde_yaml::to_string(report)?)
    }
}
