//! # Audit Result Structures
//!
//! This module defines the records produced by an organization audit.
//!
//! ## Overview
//!
//! - [`OrganizationSettings`], [`Team`], [`Repository`], [`RepositoryPermissions`] -
//!   normalized snapshots of GitHub objects
//! - [`Collected`] - the items of a multi-item enumeration plus the items that were skipped
//! - [`AuditResult`] - the combined report, one optional field per audit dimension
//!
//! Timestamps are stored as RFC 3339 strings. Parsing a serialized report gives
//! back the same strings, not typed dates.
//!
//! ## Examples
//!
//! ```rust
//! use github_org_audit::audit::results::AuditResult;
//!
//! let result = AuditResult::new("acme");
//! let json = serde_json::to_string(&result).unwrap();
//!
//! // Dimensions that were not audited are absent, not null
//! assert!(!json.contains("\"teams\""));
//! ```

use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AuditError;

/// Role reported for every team member; the membership listing carries no role
pub const MEMBER_ROLE: &str = "member";

/// Repository name to raw CODEOWNERS content, in repository enumeration order
pub type CodeownersMap = IndexMap<String, String>;

/// One audited aspect of an organization, in audit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Settings,
    Teams,
    Repositories,
    Permissions,
    Codeowners,
}

impl Dimension {
    /// All dimensions in the order an audit collects them
    pub const ALL: [Dimension; 5] = [
        Dimension::Settings,
        Dimension::Teams,
        Dimension::Repositories,
        Dimension::Permissions,
        Dimension::Codeowners,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Teams => "teams",
            Self::Repositories => "repositories",
            Self::Permissions => "permissions",
            Self::Codeowners => "codeowners",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Organization-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationSettings {
    pub name: Option<String>,
    pub login: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub billing_email: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub public_repos: u64,
    pub private_repos: Option<u64>,
    pub followers: u64,
    pub following: u64,
    pub default_repository_permission: Option<String>,
    pub members_can_create_repositories: Option<bool>,
    pub two_factor_requirement_enabled: Option<bool>,
    pub has_organization_projects: bool,
    pub has_repository_projects: bool,
}

impl OrganizationSettings {
    /// Setting name and display value pairs, in declaration order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", display_opt(&self.name)),
            ("login", self.login.clone()),
            ("description", display_opt(&self.description)),
            ("email", display_opt(&self.email)),
            ("billing_email", display_opt(&self.billing_email)),
            ("company", display_opt(&self.company)),
            ("location", display_opt(&self.location)),
            ("blog", display_opt(&self.blog)),
            ("created_at", self.created_at.clone()),
            ("updated_at", self.updated_at.clone()),
            ("public_repos", self.public_repos.to_string()),
            ("private_repos", display_opt(&self.private_repos)),
            ("followers", self.followers.to_string()),
            ("following", self.following.to_string()),
            (
                "default_repository_permission",
                display_opt(&self.default_repository_permission),
            ),
            (
                "members_can_create_repositories",
                display_opt(&self.members_can_create_repositories),
            ),
            (
                "two_factor_requirement_enabled",
                display_opt(&self.two_factor_requirement_enabled),
            ),
            (
                "has_organization_projects",
                self.has_organization_projects.to_string(),
            ),
            (
                "has_repository_projects",
                self.has_repository_projects.to_string(),
            ),
        ]
    }
}

/// Team and, when requested, its members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub privacy: Option<String>,
    pub permission: Option<String>,
    pub members_count: Option<u64>,
    pub repos_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<TeamMember>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub login: String,
    pub name: Option<String>,
    pub role: String,
}

/// Repository configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub private: bool,
    pub archived: bool,
    pub disabled: bool,
    pub default_branch: Option<String>,
    pub visibility: Option<String>,
    pub allow_merge_commit: Option<bool>,
    pub allow_squash_merge: Option<bool>,
    pub allow_rebase_merge: Option<bool>,
    pub delete_branch_on_merge: Option<bool>,
    pub has_issues: bool,
    pub has_projects: bool,
    pub has_wiki: bool,
    pub has_downloads: bool,
}

/// Who has access to one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryPermissions {
    pub repository: String,
    pub collaborators: Vec<Collaborator>,
    pub teams: Vec<TeamGrant>,
}

/// A user with direct access and their effective permission level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    pub login: String,
    pub permission: String,
}

/// A team with access to a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamGrant {
    pub name: String,
    pub slug: String,
    pub permission: String,
}

/// An item dropped from an enumeration because fetching it failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub dimension: Dimension,
    pub item: String,
    pub reason: String,
}

impl SkippedItem {
    pub fn new(dimension: Dimension, item: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            dimension,
            item: item.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result of an enumeration that tolerates per-item failures.
///
/// `items` holds everything that was fetched; `skipped` says what was left out and why,
/// so "nothing found" and "everything failed" can be told apart.
#[derive(Debug, Clone, PartialEq)]
pub struct Collected<T> {
    pub items: T,
    pub skipped: Vec<SkippedItem>,
}

impl<T> Collected<T> {
    pub fn new(items: T) -> Self {
        Self {
            items,
            skipped: Vec::new(),
        }
    }

    pub fn skip(&mut self, item: SkippedItem) {
        self.skipped.push(item);
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Combined audit report.
///
/// A dimension that was not audited is `None` and is left out of the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    pub organization: String,
    pub audit_timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<OrganizationSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<Team>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<Repository>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<RepositoryPermissions>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codeowners: Option<CodeownersMap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedItem>,
}

impl AuditResult {
    /// Create an empty result stamped with the current time
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            audit_timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            settings: None,
            teams: None,
            repositories: None,
            permissions: None,
            codeowners: None,
            skipped: Vec::new(),
        }
    }

    /// Parse a report previously written in JSON format
    pub fn from_json(json: &str) -> Result<Self, AuditError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Dimensions present in this result, in audit order
    pub fn dimensions(&self) -> Vec<Dimension> {
        Dimension::ALL
            .into_iter()
            .filter(|d| match d {
                Dimension::Settings => self.settings.is_some(),
                Dimension::Teams => self.teams.is_some(),
                Dimension::Repositories => self.repositories.is_some(),
                Dimension::Permissions => self.permissions.is_some(),
                Dimension::Codeowners => self.codeowners.is_some(),
            })
            .collect()
    }

    /// Append skipped items from an enumeration
    pub fn record_skipped(&mut self, skipped: Vec<SkippedItem>) {
        self.skipped.extend(skipped);
    }
}

/// Render an optional value for tables, `-` when absent
pub fn display_opt<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}
