//! Codeowners command - Show CODEOWNERS files

use colored::Colorize;
use std::path::Path;

use super::{connect, load_config, write_report, CodeownersArgs};
use crate::audit::results::CodeownersMap;
use crate::audit::AuditResult;
use crate::cli::exit_codes;
use crate::config::ConfigOverrides;
use crate::error::AuditError;

pub async fn execute(args: CodeownersArgs, config_path: Option<&Path>) -> Result<i32, AuditError> {
    let config = load_config(config_path, &ConfigOverrides::default())?;
    let client = connect(&args.auth, &config)?;
    let mut result = AuditResult::new(&args.organization);

    match &args.repository {
        Some(repo) => {
            let mut codeowners = CodeownersMap::new();
            match client.get_codeowners(&args.organization, repo).await? {
                Some(content) => {
                    codeowners.insert(repo.clone(), content);
                }
                None => eprintln!(
                    "{} No CODEOWNERS file found for {}",
                    "Note:".yellow().bold(),
                    repo
                ),
            }
            result.codeowners = Some(codeowners);
        }
        None => {
            let collected = client.get_all_codeowners(&args.organization).await?;
            result.codeowners = Some(collected.items);
            result.record_skipped(collected.skipped);
        }
    }

    write_report(&args.output, &result, true)?;
    Ok(exit_codes::SUCCESS)
}
