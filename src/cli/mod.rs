//! # CLI Module
//!
//! This module defines the command-line interface for github-org-audit using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `audit` | Audit every enabled dimension of an organization |
//! | `settings` | Show organization settings |
//! | `teams` | Show organization teams |
//! | `repositories` | Show organization repositories |
//! | `permissions` | Show collaborators and teams of one repository |
//! | `codeowners` | Show CODEOWNERS files |
//! | `security` | Check security-relevant organization settings |
//! | `coverage` | Find active repositories without CODEOWNERS |
//! | `init` | Write a default configuration file |
//!
//! ## Submodules
//!
//! - [`commands`] - Command implementations
//! - [`exit_codes`] - Standardized exit codes
//! - [`output`] - Report output formatters (JSON, YAML, tables)
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//! - `-c, --config <FILE>` - Path to configuration file
//! - `--log-json` - Emit logs as JSON lines on stderr
//!
//! ## Examples
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_...
//!
//! # Full audit as tables
//! github-org-audit audit acme
//!
//! # JSON report without permissions, archived repositories included
//! github-org-audit audit acme --no-permissions --include-archived -f json -o acme.json
//!
//! # CODEOWNERS of one repository
//! github-org-audit codeowners acme core
//! ```

pub mod commands;
pub mod exit_codes;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{
    AuditArgs, CodeownersArgs, CoverageArgs, GenerateManArgs, InitArgs, PermissionsArgs,
    RepositoriesArgs, SecurityArgs, SettingsArgs, TeamsArgs,
};

/// github-org-audit - Audit GitHub organization settings, teams, repositories, permissions and CODEOWNERS
#[derive(Parser, Debug)]
#[command(name = "github-org-audit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit a GitHub organization
    Audit(AuditArgs),

    /// Show organization settings
    Settings(SettingsArgs),

    /// Show organization teams
    Teams(TeamsArgs),

    /// Show organization repositories
    Repositories(RepositoriesArgs),

    /// Show collaborators and teams with access to a repository
    Permissions(PermissionsArgs),

    /// Show CODEOWNERS files of one or all repositories
    Codeowners(CodeownersArgs),

    /// Check security-relevant organization settings
    Security(SecurityArgs),

    /// Find active repositories without CODEOWNERS
    Coverage(CoverageArgs),

    /// Write a default configuration file
    Init(InitArgs),

    /// Generate man page (hidden, for packaging)
    #[command(hide = true)]
    GenerateMan(GenerateManArgs),
}
