//! Security posture and CODEOWNERS coverage checks
//!
//! These checks build on the audit client's records and never call the API themselves.
//!
//! ## Checks
//!
//! - ORG001: two-factor authentication is required for members
//! - ORG002: the default repository permission is `read` or `none`
//! - ORG003: members cannot create repositories

use serde::{Deserialize, Serialize};

use super::results::{CodeownersMap, OrganizationSettings, Repository, SkippedItem};

/// Default repository permissions considered restrictive
const RESTRICTIVE_PERMISSIONS: [&str; 2] = ["read", "none"];

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The setting meets the recommendation
    Pass,
    /// The setting should be changed
    Warning,
    /// Worth a look, or not visible with the current token
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityCheck {
    pub id: String,
    pub status: CheckStatus,
    pub message: String,
}

impl SecurityCheck {
    fn new(id: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            status,
            message: message.into(),
        }
    }
}

/// Repository counts by visibility and state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryStats {
    pub total: usize,
    pub private: usize,
    pub public: usize,
    pub archived: usize,
}

impl RepositoryStats {
    pub fn from_repositories(repositories: &[Repository]) -> Self {
        let private = repositories.iter().filter(|r| r.private).count();
        Self {
            total: repositories.len(),
            private,
            public: repositories.len() - private,
            archived: repositories.iter().filter(|r| r.archived).count(),
        }
    }
}

/// Output of the `security` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityReport {
    pub organization: String,
    pub checks: Vec<SecurityCheck>,
    pub repositories: RepositoryStats,
}

impl SecurityReport {
    pub fn new(settings: &OrganizationSettings, repositories: &[Repository]) -> Self {
        Self {
            organization: settings.login.clone(),
            checks: check_security(settings),
            repositories: RepositoryStats::from_repositories(repositories),
        }
    }

    pub fn has_warnings(&self) -> bool {
        self.checks.iter().any(|c| c.status == CheckStatus::Warning)
    }
}

/// Evaluate the organization's security-relevant settings
pub fn check_security(settings: &OrganizationSettings) -> Vec<SecurityCheck> {
    let two_factor = match settings.two_factor_requirement_enabled {
        Some(true) => SecurityCheck::new(
            "ORG001",
            CheckStatus::Pass,
            "Two-factor authentication is required",
        ),
        Some(false) => SecurityCheck::new(
            "ORG001",
            CheckStatus::Warning,
            "Two-factor authentication is not required",
        ),
        None => SecurityCheck::new(
            "ORG001",
            CheckStatus::Notice,
            "Two-factor requirement is not visible with this token (owner access needed)",
        ),
    };

    let default_permission = match settings.default_repository_permission.as_deref() {
        Some(permission) if RESTRICTIVE_PERMISSIONS.contains(&permission) => SecurityCheck::new(
            "ORG002",
            CheckStatus::Pass,
            format!("Default repository permission is restrictive ({})", permission),
        ),
        Some(permission) => SecurityCheck::new(
            "ORG002",
            CheckStatus::Warning,
            format!(
                "Default repository permission may be too permissive ({})",
                permission
            ),
        ),
        None => SecurityCheck::new(
            "ORG002",
            CheckStatus::Notice,
            "Default repository permission is not visible with this token",
        ),
    };

    let repo_creation = match settings.members_can_create_repositories {
        Some(false) => SecurityCheck::new(
            "ORG003",
            CheckStatus::Pass,
            "Repository creation is restricted to owners",
        ),
        Some(true) => SecurityCheck::new(
            "ORG003",
            CheckStatus::Notice,
            "Members can create repositories",
        ),
        None => SecurityCheck::new(
            "ORG003",
            CheckStatus::Notice,
            "Member repository creation policy is not visible with this token",
        ),
    };

    vec![two_factor, default_permission, repo_creation]
}

/// Output of the `coverage` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub organization: String,
    pub active_repositories: usize,
    pub with_codeowners: Vec<String>,
    pub missing_codeowners: Vec<String>,
    pub coverage_percent: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedItem>,
}

impl CoverageReport {
    /// Compare active repositories against the CODEOWNERS found for them.
    ///
    /// Repositories that could not be checked count as neither covered nor missing.
    pub fn new(
        organization: impl Into<String>,
        active: &[Repository],
        codeowners: &CodeownersMap,
        skipped: Vec<SkippedItem>,
    ) -> Self {
        let mut with_codeowners = Vec::new();
        let mut missing_codeowners = Vec::new();

        for repo in active {
            if codeowners.contains_key(&repo.name) {
                with_codeowners.push(repo.name.clone());
            } else if !skipped.iter().any(|s| s.item == repo.name) {
                missing_codeowners.push(repo.name.clone());
            }
        }
        missing_codeowners.sort();

        let coverage_percent = if active.is_empty() {
            0.0
        } else {
            with_codeowners.len() as f64 / active.len() as f64 * 100.0
        };

        Self {
            organization: organization.into(),
            active_repositories: active.len(),
            with_codeowners,
            missing_codeowners,
            coverage_percent,
            skipped,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_codeowners.is_empty()
    }
}
