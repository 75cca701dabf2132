//! Init command - Write a default configuration file

use colored::Colorize;
use std::fs;
use std::path::Path;

use super::InitArgs;
use crate::cli::exit_codes;
use crate::config::{AuditConfig, CONFIG_FILENAME};
use crate::error::{AuditError, OutputError};

pub async fn execute(args: InitArgs, config_path: Option<&Path>) -> Result<i32, AuditError> {
    let path = config_path.unwrap_or_else(|| Path::new(CONFIG_FILENAME));

    if path.exists() && !args.force {
        eprintln!(
            "{} Configuration file already exists. Use --force to overwrite.",
            "Error:".red().bold()
        );
        return Ok(exit_codes::ERROR);
    }

    let content = AuditConfig::default().to_string_for(path)?;
    fs::write(path, &content).map_err(|e| OutputError::FileWrite {
        path: path.display().to_string(),
        source: e,
    })?;

    println!(
        "{} Created {}",
        "Success:".green().bold(),
        path.display().to_string().cyan()
    );

    println!("\nNext steps:");
    println!(
        "  1. Review and customize {}",
        path.display().to_string().cyan()
    );
    println!("  2. Export {} with a personal access token", "GITHUB_TOKEN".cyan());
    println!(
        "  3. Run {} to audit an organization",
        "github-org-audit audit <org>".cyan()
    );

    Ok(exit_codes::SUCCESS)
}
