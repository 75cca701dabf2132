//! CLI commands module

pub mod audit;
pub mod codeowners;
pub mod coverage;
pub mod generate_man;
pub mod init;
pub mod permissions;
pub mod repositories;
pub mod security;
pub mod settings;
pub mod teams;

use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::audit::{AuditClient, AuditResult, Auditor};
use crate::cli::output::{renderer, ReportFormat};
use crate::config::{AuditConfig, ConfigOverrides};
use crate::error::{AuditError, OutputError};
use crate::providers::github::{GitHubToken, OctocrabApi};

/// GitHub authentication
#[derive(Args, Debug)]
pub struct AuthArgs {
    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub token: GitHubToken,
}

/// Report format and destination
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: ReportFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// `--include-archived` / `--no-archived`
#[derive(Args, Debug, Default)]
pub struct ArchivedArgs {
    /// Include archived repositories
    #[arg(long, overrides_with = "no_archived")]
    pub include_archived: bool,

    /// Exclude archived repositories
    #[arg(long, overrides_with = "include_archived")]
    pub no_archived: bool,
}

/// `--include-team-members` / `--no-team-members`
#[derive(Args, Debug, Default)]
pub struct TeamMembersArgs {
    /// Attach member lists to teams
    #[arg(long, overrides_with = "no_team_members")]
    pub include_team_members: bool,

    /// Do not fetch team members
    #[arg(long, overrides_with = "include_team_members")]
    pub no_team_members: bool,
}

/// Per-dimension switches for the audit command
#[derive(Args, Debug, Default)]
pub struct DimensionArgs {
    /// Include organization settings
    #[arg(long, overrides_with = "no_settings")]
    pub settings: bool,
    /// Skip organization settings
    #[arg(long, overrides_with = "settings")]
    pub no_settings: bool,

    /// Include teams
    #[arg(long, overrides_with = "no_teams")]
    pub teams: bool,
    /// Skip teams
    #[arg(long, overrides_with = "teams")]
    pub no_teams: bool,

    /// Include repositories
    #[arg(long, overrides_with = "no_repositories")]
    pub repositories: bool,
    /// Skip repositories
    #[arg(long, overrides_with = "repositories")]
    pub no_repositories: bool,

    /// Include repository permissions
    #[arg(long, overrides_with = "no_permissions")]
    pub permissions: bool,
    /// Skip repository permissions
    #[arg(long, overrides_with = "permissions")]
    pub no_permissions: bool,

    /// Include CODEOWNERS files
    #[arg(long, overrides_with = "no_codeowners")]
    pub codeowners: bool,
    /// Skip CODEOWNERS files
    #[arg(long, overrides_with = "codeowners")]
    pub no_codeowners: bool,

    #[command(flatten)]
    pub archived: ArchivedArgs,

    #[command(flatten)]
    pub team_members: TeamMembersArgs,
}

impl ArchivedArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            include_archived: toggle(self.include_archived, self.no_archived),
            ..Default::default()
        }
    }
}

impl TeamMembersArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            include_team_members: toggle(self.include_team_members, self.no_team_members),
            ..Default::default()
        }
    }
}

impl DimensionArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            audit_settings: toggle(self.settings, self.no_settings),
            audit_teams: toggle(self.teams, self.no_teams),
            audit_repositories: toggle(self.repositories, self.no_repositories),
            audit_permissions: toggle(self.permissions, self.no_permissions),
            audit_codeowners: toggle(self.codeowners, self.no_codeowners),
            include_archived: self.archived.overrides().include_archived,
            include_team_members: self.team_members.overrides().include_team_members,
        }
    }
}

/// Arguments for the audit command
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Name of the GitHub organization to audit
    pub organization: String,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub dimensions: DimensionArgs,

    /// Include member lists, per-repository permissions and CODEOWNERS contents in tables
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for the settings command
#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Name of the GitHub organization
    pub organization: String,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the teams command
#[derive(Args, Debug)]
pub struct TeamsArgs {
    /// Name of the GitHub organization
    pub organization: String,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub team_members: TeamMembersArgs,
}

/// Arguments for the repositories command
#[derive(Args, Debug)]
pub struct RepositoriesArgs {
    /// Name of the GitHub organization
    pub organization: String,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub archived: ArchivedArgs,
}

/// Arguments for the permissions command
#[derive(Args, Debug)]
pub struct PermissionsArgs {
    /// Name of the GitHub organization
    pub organization: String,

    /// Name of the repository
    pub repository: String,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the codeowners command
#[derive(Args, Debug)]
pub struct CodeownersArgs {
    /// Name of the GitHub organization
    pub organization: String,

    /// Name of a single repository (all repositories when omitted)
    pub repository: Option<String>,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the security command
#[derive(Args, Debug)]
pub struct SecurityArgs {
    /// Name of the GitHub organization
    pub organization: String,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the coverage command
#[derive(Args, Debug)]
pub struct CoverageArgs {
    /// Name of the GitHub organization
    pub organization: String,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the generate-man command
#[derive(Args, Debug)]
pub struct GenerateManArgs {
    /// Directory to write the man page into (stdout when omitted)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// `Some(true)` for the positive flag, `Some(false)` for the negative one, `None` if neither
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Load the configuration file and apply command-line overrides
pub(crate) fn load_config(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<AuditConfig, AuditError> {
    let mut config = AuditConfig::resolve(config_path)?;
    config.apply_overrides(overrides);
    debug!(?config, "Effective configuration");
    Ok(config)
}

/// Build an authenticated client for the configured API
pub(crate) fn connect(
    auth: &AuthArgs,
    config: &AuditConfig,
) -> Result<AuditClient<OctocrabApi>, AuditError> {
    let api = OctocrabApi::new(&auth.token, config.api_url.as_deref())?;
    Ok(AuditClient::new(api))
}

/// Run an audit restricted to `config`'s enabled dimensions and write the report
pub(crate) async fn run_audit(
    organization: &str,
    auth: &AuthArgs,
    output: &OutputArgs,
    config: AuditConfig,
) -> Result<AuditResult, AuditError> {
    let client = connect(auth, &config)?;
    let auditor = Auditor::new(&client, config);
    let result = auditor.audit(organization).await?;

    write_report(output, &result, true)?;
    Ok(result)
}

/// Render an audit result in the requested format
pub(crate) fn write_report(
    output: &OutputArgs,
    result: &AuditResult,
    detailed: bool,
) -> Result<(), AuditError> {
    let content = renderer(output.format, detailed).render_report(result)?;
    emit(output, &content)
}

/// Write rendered content to `--output` or stdout
pub(crate) fn emit(output: &OutputArgs, content: &str) -> Result<(), AuditError> {
    match &output.output {
        Some(path) => {
            let mut text = content.to_string();
            if !text.ends_with('\n') {
                text.push('\n');
            }
            fs::write(path, text).map_err(|e| OutputError::FileWrite {
                path: path.display().to_string(),
                source: e,
            })?;
            eprintln!(
                "{} Report written to {}",
                "Success:".green().bold(),
                path.display().to_string().cyan()
            );
        }
        None => println!("{}", content.trim_end()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_toggle() {
        assert_eq!(toggle(true, false), Some(true));
        assert_eq!(toggle(false, true), Some(false));
        assert_eq!(toggle(false, false), None);
    }

    #[test]
    fn test_dimension_overrides() {
        let args = DimensionArgs {
            no_permissions: true,
            codeowners: true,
            archived: ArchivedArgs {
                include_archived: true,
                no_archived: false,
            },
            ..Default::default()
        };

        let overrides = args.overrides();
        assert_eq!(overrides.audit_permissions, Some(false));
        assert_eq!(overrides.audit_codeowners, Some(true));
        assert_eq!(overrides.include_archived, Some(true));
        assert_eq!(overrides.audit_settings, None);
        assert_eq!(overrides.include_team_members, None);
    }

    #[test]
    fn test_load_config_applies_overrides_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit.toml");
        fs::write(&path, "audit_teams = false\ninclude_archived = true\n").unwrap();

        let overrides = ConfigOverrides {
            include_archived: Some(false),
            ..Default::default()
        };
        let config = load_config(Some(&path), &overrides).unwrap();
        assert!(!config.audit_teams);
        assert!(!config.include_archived);
    }

    #[test]
    fn test_emit_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let output = OutputArgs {
            format: ReportFormat::Json,
            output: Some(path.clone()),
        };

        emit(&output, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn test_emit_to_missing_directory_fails() {
        let output = OutputArgs {
            format: ReportFormat::Table,
            output: Some(PathBuf::from("/nonexistent/dir/report.txt")),
        };

        let err = emit(&output, "text").unwrap_err();
        assert!(matches!(err, AuditError::Output(OutputError::FileWrite { .. })));
    }
}
