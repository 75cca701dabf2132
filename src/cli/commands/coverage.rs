//! Coverage command - Find active repositories without CODEOWNERS

use std::path::Path;

use super::{connect, emit, load_config, CoverageArgs};
use crate::audit::checks::CoverageReport;
use crate::audit::results::Repository;
use crate::cli::exit_codes;
use crate::cli::output::renderer;
use crate::config::ConfigOverrides;
use crate::error::AuditError;

pub async fn execute(args: CoverageArgs, config_path: Option<&Path>) -> Result<i32, AuditError> {
    let config = load_config(config_path, &ConfigOverrides::default())?;
    let client = connect(&args.auth, &config)?;

    let active: Vec<Repository> = client
        .get_repositories(&args.organization)
        .await?
        .into_iter()
        .filter(|r| !r.archived)
        .collect();
    let names: Vec<String> = active.iter().map(|r| r.name.clone()).collect();

    let collected = client
        .collect_codeowners(&args.organization, &names)
        .await?;
    let report = CoverageReport::new(
        args.organization.as_str(),
        &active,
        &collected.items,
        collected.skipped,
    );

    let content = renderer(args.output.format, false).render_coverage(&report)?;
    emit(&args.output, &content)?;

    if report.is_complete() {
        Ok(exit_codes::SUCCESS)
    } else {
        Ok(exit_codes::FINDINGS)
    }
}
