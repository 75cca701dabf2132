//! Permissions command - Show who has access to one repository

use std::path::Path;

use super::{connect, load_config, write_report, PermissionsArgs};
use crate::audit::AuditResult;
use crate::cli::exit_codes;
use crate::config::ConfigOverrides;
use crate::error::AuditError;

pub async fn execute(args: PermissionsArgs, config_path: Option<&Path>) -> Result<i32, AuditError> {
    let config = load_config(config_path, &ConfigOverrides::default())?;
    let client = connect(&args.auth, &config)?;

    let permissions = client
        .get_repository_permissions(&args.organization, &args.repository)
        .await?;

    let mut result = AuditResult::new(&args.organization);
    result.permissions = Some(vec![permissions]);

    write_report(&args.output, &result, true)?;
    Ok(exit_codes::SUCCESS)
}
