//! Configuration module

pub mod loader;

pub use loader::{AuditConfig, CONFIG_FILENAME};

/// Values given explicitly on the command line.
///
/// `None` leaves the value from the configuration file untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub audit_settings: Option<bool>,
    pub audit_teams: Option<bool>,
    pub audit_repositories: Option<bool>,
    pub audit_permissions: Option<bool>,
    pub audit_codeowners: Option<bool>,
    pub include_archived: Option<bool>,
    pub include_team_members: Option<bool>,
}

fn default_true() -> bool {
    true
}
