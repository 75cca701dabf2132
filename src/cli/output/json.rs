//! JSON output formatting

use crate::error::AuditError;

use super::ReportRenderer;
use crate::audit::checks::{CoverageReport, SecurityReport};
use crate::audit::results::AuditResult;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for JsonOutput {
    fn render_report(&self, result: &AuditResult) -> Result<String, AuditError> {
        Ok(serde_json::to_string_pretty(result)?)
    }

    fn render_security(&self, report: &SecurityReport) -> Result<String, AuditError> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn render_coverage(&self, report: &CoverageReport) -> Result<String, AuditError> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
