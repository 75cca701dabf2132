//! Audit command - Audit every enabled dimension of an organization

use colored::Colorize;
use std::path::Path;

use super::{connect, load_config, write_report, AuditArgs};
use crate::audit::Auditor;
use crate::cli::exit_codes;
use crate::error::AuditError;

pub async fn execute(args: AuditArgs, config_path: Option<&Path>) -> Result<i32, AuditError> {
    let config = load_config(config_path, &args.dimensions.overrides())?;
    let client = connect(&args.auth, &config)?;

    let mut auditor = Auditor::new(&client, config);
    auditor.set_progress_callback(Box::new(|dimension, current, total| {
        eprintln!(
            "  {} {} ({}/{})...",
            "→".dimmed(),
            dimension,
            current,
            total
        );
    }));

    eprintln!(
        "{} {}",
        "Auditing organization:".dimmed(),
        args.organization.white().bold()
    );
    let result = auditor.audit(&args.organization).await?;

    if !result.skipped.is_empty() {
        eprintln!(
            "{} {} item(s) could not be read and were skipped",
            "Warning:".yellow().bold(),
            result.skipped.len()
        );
    }

    write_report(&args.output, &result, args.detailed)?;
    Ok(exit_codes::SUCCESS)
}
