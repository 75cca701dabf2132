//! Settings command - Show organization settings

use std::path::Path;

use super::{load_config, run_audit, SettingsArgs};
use crate::audit::Dimension;
use crate::cli::exit_codes;
use crate::config::ConfigOverrides;
use crate::error::AuditError;

pub async fn execute(args: SettingsArgs, config_path: Option<&Path>) -> Result<i32, AuditError> {
    let config = load_config(config_path, &ConfigOverrides::default())?.only(Dimension::Settings);
    run_audit(&args.organization, &args.auth, &args.output, config).await?;
    Ok(exit_codes::SUCCESS)
}
