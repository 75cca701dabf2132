//! Teams command - Show organization teams

use std::path::Path;

use super::{load_config, run_audit, TeamsArgs};
use crate::audit::Dimension;
use crate::cli::exit_codes;
use crate::error::AuditError;

pub async fn execute(args: TeamsArgs, config_path: Option<&Path>) -> Result<i32, AuditError> {
    let config =
        load_config(config_path, &args.team_members.overrides())?.only(Dimension::Teams);
    run_audit(&args.organization, &args.auth, &args.output, config).await?;
    Ok(exit_codes::SUCCESS)
}
