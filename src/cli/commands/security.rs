//! Security command - Check security-relevant organization settings

use std::path::Path;

use super::{connect, emit, load_config, SecurityArgs};
use crate::audit::checks::SecurityReport;
use crate::cli::exit_codes;
use crate::cli::output::renderer;
use crate::config::ConfigOverrides;
use crate::error::AuditError;

pub async fn execute(args: SecurityArgs, config_path: Option<&Path>) -> Result<i32, AuditError> {
    let config = load_config(config_path, &ConfigOverrides::default())?;
    let client = connect(&args.auth, &config)?;

    let settings = client.get_org_settings(&args.organization).await?;
    // Counts cover archived repositories too
    let repositories = client.get_repositories(&args.organization).await?;
    let report = SecurityReport::new(&settings, &repositories);

    let content = renderer(args.output.format, false).render_security(&report)?;
    emit(&args.output, &content)?;

    if report.has_warnings() {
        Ok(exit_codes::FINDINGS)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}
