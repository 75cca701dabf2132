//! Output formatting module for CLI

pub mod json;
pub mod table;
pub mod yaml;

pub use json::JsonOutput;
pub use table::TableOutput;
pub use yaml::YamlOutput;

use crate::audit::checks::{CoverageReport, SecurityReport};
use crate::audit::results::AuditResult;
use crate::error::AuditError;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Json,
    Yaml,
    Table,
}

/// Trait for rendering report output
pub trait ReportRenderer {
    fn render_report(&self, result: &AuditResult) -> Result<String, AuditError>;

    fn render_security(&self, report: &SecurityReport) -> Result<String, AuditError>;

    fn render_coverage(&self, report: &CoverageReport) -> Result<String, AuditError>;
}

/// Pick the renderer for `format`; `detailed` only affects tables
pub fn renderer(format: ReportFormat, detailed: bool) -> Box<dyn ReportRenderer> {
    match format {
        ReportFormat::Json => Box::new(JsonOutput::new()),
        ReportFormat::Yaml => Box::new(YamlOutput::new()),
        ReportFormat::Table => Box::new(TableOutput::new(detailed)),
    }
}
