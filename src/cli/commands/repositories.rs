//! Repositories command - Show organization repositories

use std::path::Path;

use super::{load_config, run_audit, RepositoriesArgs};
use crate::audit::Dimension;
use crate::cli::exit_codes;
use crate::error::AuditError;

pub async fn execute(
    args: RepositoriesArgs,
    config_path: Option<&Path>,
) -> Result<i32, AuditError> {
    let config =
        load_config(config_path, &args.archived.overrides())?.only(Dimension::Repositories);
    run_audit(&args.organization, &args.auth, &args.output, config).await?;
    Ok(exit_codes::SUCCESS)
}
