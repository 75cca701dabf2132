//! # Providers Module
//!
//! This module handles the integration with the GitHub REST API.
//!
//! ## GitHub Integration
//!
//! [`GitHubApi`] is the seam between the audit logic and the network. It exposes
//! the raw read endpoints the audit needs and returns the wire types defined here,
//! untouched. Normalization into report records happens in
//! [`crate::audit::client::AuditClient`].
//!
//! The production implementation is [`github::OctocrabApi`], built on `octocrab`,
//! which handles authentication and pagination.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use github_org_audit::providers::github::{GitHubToken, OctocrabApi};
//! use github_org_audit::providers::GitHubApi;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let api = OctocrabApi::new(&GitHubToken::new("ghp_example"), None)?;
//! let org = api.organization("acme").await?;
//! println!("{} has {} public repositories", org.login, org.public_repos);
//! # Ok(())
//! # }
//! ```

pub mod github;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ApiError;

/// Read-only access to the GitHub endpoints used by the audit.
///
/// Listing methods return every page. `file_content` returns `Ok(None)` when the
/// path does not exist or is not a regular file.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// `GET /orgs/{org}`
    async fn organization(&self, org: &str) -> Result<ApiOrganization, ApiError>;

    /// `GET /orgs/{org}/teams`
    async fn teams(&self, org: &str) -> Result<Vec<ApiTeam>, ApiError>;

    /// `GET /orgs/{org}/teams/{team_slug}`
    async fn team(&self, org: &str, team_slug: &str) -> Result<ApiTeam, ApiError>;

    /// `GET /orgs/{org}/teams/{team_slug}/members`
    async fn team_members(&self, org: &str, team_slug: &str) -> Result<Vec<ApiUser>, ApiError>;

    /// `GET /users/{login}`
    async fn user(&self, login: &str) -> Result<ApiUser, ApiError>;

    /// `GET /orgs/{org}/repos`
    async fn repositories(&self, org: &str) -> Result<Vec<ApiRepository>, ApiError>;

    /// `GET /repos/{org}/{repo}`
    async fn repository(&self, org: &str, repo: &str) -> Result<ApiRepository, ApiError>;

    /// `GET /repos/{org}/{repo}/collaborators`
    async fn collaborators(&self, org: &str, repo: &str) -> Result<Vec<ApiUser>, ApiError>;

    /// `GET /repos/{org}/{repo}/collaborators/{login}/permission`
    async fn collaborator_permission(
        &self,
        org: &str,
        repo: &str,
        login: &str,
    ) -> Result<String, ApiError>;

    /// `GET /repos/{org}/{repo}/teams`
    async fn repository_teams(&self, org: &str, repo: &str) -> Result<Vec<ApiTeam>, ApiError>;

    /// `GET /repos/{org}/{repo}/contents/{path}`, decoded to raw bytes
    async fn file_content(
        &self,
        org: &str,
        repo: &str,
        path: &str,
    ) -> Result<Option<Vec<u8>>, ApiError>;
}

/// Organization as returned by `GET /orgs/{org}`.
///
/// Plan, security and member policy fields are only returned to organization owners.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiOrganization {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub billing_email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub total_private_repos: Option<u64>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub default_repository_permission: Option<String>,
    #[serde(default)]
    pub members_can_create_repositories: Option<bool>,
    #[serde(default)]
    pub two_factor_requirement_enabled: Option<bool>,
    #[serde(default)]
    pub has_organization_projects: bool,
    #[serde(default)]
    pub has_repository_projects: bool,
}

/// Team as returned by the team listing and team detail endpoints.
///
/// The listing omits the member and repository counts.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTeam {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub privacy: Option<String>,
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub members_count: Option<u64>,
    #[serde(default)]
    pub repos_count: Option<u64>,
}

/// User as returned by member, collaborator and user endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Repository as returned by `GET /orgs/{org}/repos` and `GET /repos/{org}/{repo}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepository {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub allow_merge_commit: Option<bool>,
    #[serde(default)]
    pub allow_squash_merge: Option<bool>,
    #[serde(default)]
    pub allow_rebase_merge: Option<bool>,
    #[serde(default)]
    pub delete_branch_on_merge: Option<bool>,
    #[serde(default)]
    pub has_issues: bool,
    #[serde(default)]
    pub has_projects: bool,
    #[serde(default)]
    pub has_wiki: bool,
    #[serde(default)]
    pub has_downloads: bool,
}

#[cfg(test)]
pub(crate) mod fake;
