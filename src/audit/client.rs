//! Audit client - one method per audit dimension
//!
//! [`AuditClient`] turns raw GitHub objects into the records of
//! [`crate::audit::results`]. Enumerations over repositories keep going when a single
//! repository fails and report it as a [`SkippedItem`]; only an authentication
//! failure stops them.

use tracing::{debug, warn};

use super::results::{
    Collaborator, CodeownersMap, Collected, Dimension, OrganizationSettings, Repository,
    RepositoryPermissions, SkippedItem, Team, TeamGrant, TeamMember, MEMBER_ROLE,
};
use crate::error::ApiError;
use crate::providers::{ApiOrganization, ApiRepository, ApiTeam, GitHubApi};

/// Locations GitHub reads CODEOWNERS from, in lookup order
pub const CODEOWNERS_PATHS: [&str; 3] = ["CODEOWNERS", ".github/CODEOWNERS", "docs/CODEOWNERS"];

/// Client for auditing GitHub organizations
pub struct AuditClient<A> {
    api: A,
}

impl<A: GitHubApi> AuditClient<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The underlying API
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Get organization settings
    pub async fn get_org_settings(&self, org: &str) -> Result<OrganizationSettings, ApiError> {
        let organization = self.api.organization(org).await?;
        Ok(settings_from_api(organization))
    }

    /// Get all teams in the organization, in API order.
    ///
    /// The team listing does not carry member and repository counts, so each team's
    /// detail is fetched. Counts stay empty when the detail cannot be read.
    pub async fn get_teams(&self, org: &str) -> Result<Vec<Team>, ApiError> {
        let listed = self.api.teams(org).await?;
        let mut teams = Vec::with_capacity(listed.len());

        for summary in listed {
            let detail = match self.api.team(org, &summary.slug).await {
                Ok(detail) => detail,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(org, team = %summary.slug, error = %e, "Could not fetch team detail");
                    summary
                }
            };
            teams.push(team_from_api(detail));
        }

        debug!(org, count = teams.len(), "Fetched teams");
        Ok(teams)
    }

    /// Get members of a specific team.
    ///
    /// Display names come from a user lookup per member and stay empty when it fails.
    pub async fn get_team_members(
        &self,
        org: &str,
        team_slug: &str,
    ) -> Result<Vec<TeamMember>, ApiError> {
        let listed = self.api.team_members(org, team_slug).await?;
        let mut members = Vec::with_capacity(listed.len());

        for member in listed {
            let name = match member.name {
                Some(name) => Some(name),
                None => match self.api.user(&member.login).await {
                    Ok(user) => user.name,
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        debug!(login = %member.login, error = %e, "Could not resolve display name");
                        None
                    }
                },
            };

            members.push(TeamMember {
                login: member.login,
                name,
                role: MEMBER_ROLE.to_string(),
            });
        }

        Ok(members)
    }

    /// Get all repositories in the organization, archived ones included
    pub async fn get_repositories(&self, org: &str) -> Result<Vec<Repository>, ApiError> {
        let repositories: Vec<Repository> = self
            .api
            .repositories(org)
            .await?
            .into_iter()
            .map(repository_from_api)
            .collect();

        debug!(org, count = repositories.len(), "Fetched repositories");
        Ok(repositories)
    }

    /// Get direct collaborators and teams with access to one repository
    pub async fn get_repository_permissions(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<RepositoryPermissions, ApiError> {
        let mut collaborators = Vec::new();
        for user in self.api.collaborators(org, repo).await? {
            let permission = self
                .api
                .collaborator_permission(org, repo, &user.login)
                .await?;
            collaborators.push(Collaborator {
                login: user.login,
                permission,
            });
        }

        let teams = self
            .api
            .repository_teams(org, repo)
            .await?
            .into_iter()
            .map(|team| TeamGrant {
                name: team.name,
                slug: team.slug,
                permission: team.permission.unwrap_or_default(),
            })
            .collect();

        Ok(RepositoryPermissions {
            repository: repo.to_string(),
            collaborators,
            teams,
        })
    }

    /// Get permissions across all repositories in the organization.
    ///
    /// Repositories whose permissions cannot be read are skipped.
    pub async fn get_org_permissions(
        &self,
        org: &str,
    ) -> Result<Collected<Vec<RepositoryPermissions>>, ApiError> {
        let repositories = self.api.repositories(org).await?;
        let mut collected = Collected::new(Vec::with_capacity(repositories.len()));

        for repo in repositories {
            match self.get_repository_permissions(org, &repo.name).await {
                Ok(permissions) => collected.items.push(permissions),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(org, repository = %repo.name, error = %e, "Skipping repository permissions");
                    collected.skip(SkippedItem::new(Dimension::Permissions, repo.name, e));
                }
            }
        }

        Ok(collected)
    }

    /// Get CODEOWNERS content for a repository.
    ///
    /// Returns the first of [`CODEOWNERS_PATHS`] that holds a UTF-8 file, or `None`,
    /// including when the candidate paths could not be read. Fails with `NotFound` if
    /// the repository itself does not exist.
    pub async fn get_codeowners(&self, org: &str, repo: &str) -> Result<Option<String>, ApiError> {
        self.api.repository(org, repo).await?;

        match self.find_codeowners(org, repo).await {
            Err(e) if !e.is_fatal() => {
                warn!(org, repository = repo, error = %e, "Could not read CODEOWNERS");
                Ok(None)
            }
            other => other,
        }
    }

    /// Get CODEOWNERS files for all repositories, keyed by repository name.
    ///
    /// Repositories without CODEOWNERS are left out; repositories that could not be
    /// checked are left out and reported as skipped.
    pub async fn get_all_codeowners(&self, org: &str) -> Result<Collected<CodeownersMap>, ApiError> {
        let names: Vec<String> = self
            .api
            .repositories(org)
            .await?
            .into_iter()
            .map(|repo| repo.name)
            .collect();

        self.collect_codeowners(org, &names).await
    }

    /// Look up CODEOWNERS for the given repositories only.
    ///
    /// An empty file counts as no CODEOWNERS.
    pub async fn collect_codeowners(
        &self,
        org: &str,
        repositories: &[String],
    ) -> Result<Collected<CodeownersMap>, ApiError> {
        let mut collected = Collected::new(CodeownersMap::new());

        for repo in repositories {
            match self.find_codeowners(org, repo).await {
                Ok(Some(content)) if !content.is_empty() => {
                    collected.items.insert(repo.clone(), content);
                }
                Ok(_) => debug!(org, repository = %repo, "No CODEOWNERS file"),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(org, repository = %repo, error = %e, "Skipping CODEOWNERS lookup");
                    collected.skip(SkippedItem::new(Dimension::Codeowners, repo.clone(), e));
                }
            }
        }

        Ok(collected)
    }

    /// Try each candidate path in order and stop at the first readable file.
    ///
    /// A path that errors does not stop the lookup. If no path resolves, the last
    /// such error is returned instead of `None`.
    async fn find_codeowners(&self, org: &str, repo: &str) -> Result<Option<String>, ApiError> {
        let mut last_error = None;

        for path in CODEOWNERS_PATHS {
            match self.api.file_content(org, repo, path).await {
                Ok(Some(bytes)) => match String::from_utf8(bytes) {
                    Ok(content) => {
                        debug!(org, repository = repo, path, "Found CODEOWNERS");
                        return Ok(Some(content));
                    }
                    Err(_) => {
                        debug!(org, repository = repo, path, "CODEOWNERS is not valid UTF-8");
                    }
                },
                Ok(None) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    debug!(org, repository = repo, path, error = %e, "CODEOWNERS path unreadable");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}

fn settings_from_api(org: ApiOrganization) -> OrganizationSettings {
    OrganizationSettings {
        name: org.name,
        login: org.login,
        description: org.description,
        email: org.email,
        billing_email: org.billing_email,
        company: org.company,
        location: org.location,
        blog: org.blog,
        created_at: org.created_at.to_rfc3339(),
        updated_at: org.updated_at.to_rfc3339(),
        public_repos: org.public_repos,
        private_repos: org.total_private_repos,
        followers: org.followers,
        following: org.following,
        default_repository_permission: org.default_repository_permission,
        members_can_create_repositories: org.members_can_create_repositories,
        two_factor_requirement_enabled: org.two_factor_requirement_enabled,
        has_organization_projects: org.has_organization_projects,
        has_repository_projects: org.has_repository_projects,
    }
}

fn team_from_api(team: ApiTeam) -> Team {
    Team {
        name: team.name,
        slug: team.slug,
        description: team.description,
        privacy: team.privacy,
        permission: team.permission,
        members_count: team.members_count,
        repos_count: team.repos_count,
        members: None,
    }
}

fn repository_from_api(repo: ApiRepository) -> Repository {
    Repository {
        name: repo.name,
        full_name: repo.full_name,
        description: repo.description,
        private: repo.private,
        archived: repo.archived,
        disabled: repo.disabled,
        default_branch: repo.default_branch,
        visibility: repo.visibility,
        allow_merge_commit: repo.allow_merge_commit,
        allow_squash_merge: repo.allow_squash_merge,
        allow_rebase_merge: repo.allow_rebase_merge,
        delete_branch_on_merge: repo.delete_branch_on_merge,
        has_issues: repo.has_issues,
        has_projects: repo.has_projects,
        has_wiki: repo.has_wiki,
        has_downloads: repo.has_downloads,
    }
}
