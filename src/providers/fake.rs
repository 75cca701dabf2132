//! In-memory [`GitHubApi`] used by unit tests

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use super::{ApiOrganization, ApiRepository, ApiTeam, ApiUser, GitHubApi};
use crate::error::ApiError;

/// Fake organization state. Failures are keyed by `"<endpoint>:<item>"`, for
/// example `"collaborators:legacy"` or `"file:core:CODEOWNERS"`.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub org: Option<ApiOrganization>,
    pub teams: Vec<ApiTeam>,
    pub members: HashMap<String, Vec<ApiUser>>,
    pub users: HashMap<String, ApiUser>,
    pub repos: Vec<ApiRepository>,
    pub collaborators: HashMap<String, Vec<(String, String)>>,
    pub repo_teams: HashMap<String, Vec<ApiTeam>>,
    pub files: HashMap<(String, String), Vec<u8>>,
    pub failures: HashMap<String, ApiError>,
    pub calls: Mutex<Vec<String>>,
}

pub(crate) fn org(login: &str) -> ApiOrganization {
    ApiOrganization {
        login: login.to_string(),
        name: Some(format!("{} Inc.", login)),
        description: None,
        email: None,
        billing_email: None,
        company: None,
        location: None,
        blog: None,
        created_at: Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        public_repos: 1,
        total_private_repos: Some(1),
        followers: 0,
        following: 0,
        default_repository_permission: Some("read".to_string()),
        members_can_create_repositories: Some(false),
        two_factor_requirement_enabled: Some(true),
        has_organization_projects: true,
        has_repository_projects: true,
    }
}

pub(crate) fn repo(name: &str, archived: bool) -> ApiRepository {
    ApiRepository {
        name: name.to_string(),
        full_name: format!("acme/{}", name),
        description: None,
        private: false,
        archived,
        disabled: false,
        default_branch: Some("main".to_string()),
        visibility: Some("public".to_string()),
        allow_merge_commit: Some(true),
        allow_squash_merge: Some(true),
        allow_rebase_merge: Some(false),
        delete_branch_on_merge: Some(true),
        has_issues: true,
        has_projects: false,
        has_wiki: false,
        has_downloads: true,
    }
}

pub(crate) fn team(name: &str, slug: &str) -> ApiTeam {
    ApiTeam {
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        privacy: Some("closed".to_string()),
        permission: Some("pull".to_string()),
        members_count: None,
        repos_count: None,
    }
}

pub(crate) fn user(login: &str, name: Option<&str>) -> ApiUser {
    ApiUser {
        login: login.to_string(),
        name: name.map(str::to_string),
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_org(mut self, login: &str) -> Self {
        self.org = Some(org(login));
        self
    }

    pub fn with_repo(mut self, name: &str, archived: bool) -> Self {
        self.repos.push(repo(name, archived));
        self
    }

    pub fn with_team(mut self, name: &str, slug: &str) -> Self {
        self.teams.push(team(name, slug));
        self
    }

    pub fn with_member(mut self, team_slug: &str, login: &str, name: Option<&str>) -> Self {
        self.members
            .entry(team_slug.to_string())
            .or_default()
            .push(user(login, None));
        self.users.insert(login.to_string(), user(login, name));
        self
    }

    pub fn with_collaborator(mut self, repo: &str, login: &str, permission: &str) -> Self {
        self.collaborators
            .entry(repo.to_string())
            .or_default()
            .push((login.to_string(), permission.to_string()));
        self
    }

    pub fn with_repo_team(mut self, repo: &str, name: &str, slug: &str, permission: &str) -> Self {
        let mut grant = team(name, slug);
        grant.permission = Some(permission.to_string());
        self.repo_teams.entry(repo.to_string()).or_default().push(grant);
        self
    }

    pub fn with_file(mut self, repo: &str, path: &str, content: &[u8]) -> Self {
        self.files
            .insert((repo.to_string(), path.to_string()), content.to_vec());
        self
    }

    pub fn with_failure(mut self, key: &str, error: ApiError) -> Self {
        self.failures.insert(key.to_string(), error);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, key: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(key.clone());
        match self.failures.get(&key) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn known_repo(&self, repo: &str) -> Result<&ApiRepository, ApiError> {
        self.repos
            .iter()
            .find(|r| r.name == repo)
            .ok_or_else(|| not_found(&format!("repos/acme/{}", repo)))
    }

    fn known_team(&self, slug: &str) -> Result<&ApiTeam, ApiError> {
        self.teams
            .iter()
            .find(|t| t.slug == slug)
            .ok_or_else(|| not_found(&format!("teams/{}", slug)))
    }
}

pub(crate) fn not_found(resource: &str) -> ApiError {
    ApiError::NotFound {
        resource: resource.to_string(),
    }
}

pub(crate) fn forbidden(resource: &str) -> ApiError {
    ApiError::Forbidden {
        resource: resource.to_string(),
        message: "Resource not accessible by integration".to_string(),
    }
}

pub(crate) fn bad_credentials() -> ApiError {
    ApiError::Auth {
        message: "Bad credentials".to_string(),
    }
}

#[async_trait]
impl GitHubApi for FakeApi {
    async fn organization(&self, org: &str) -> Result<ApiOrganization, ApiError> {
        self.record(format!("organization:{}", org))?;
        self.org
            .clone()
            .filter(|o| o.login == org)
            .ok_or_else(|| not_found(&format!("orgs/{}", org)))
    }

    async fn teams(&self, org: &str) -> Result<Vec<ApiTeam>, ApiError> {
        self.record(format!("teams:{}", org))?;
        Ok(self.teams.clone())
    }

    async fn team(&self, _org: &str, team_slug: &str) -> Result<ApiTeam, ApiError> {
        self.record(format!("team:{}", team_slug))?;
        let mut detail = self.known_team(team_slug)?.clone();
        let members = self.members.get(team_slug).map(Vec::len).unwrap_or(0);
        detail.members_count = Some(members as u64);
        detail.repos_count = Some(
            self.repo_teams
                .values()
                .filter(|grants| grants.iter().any(|g| g.slug == team_slug))
                .count() as u64,
        );
        Ok(detail)
    }

    async fn team_members(&self, _org: &str, team_slug: &str) -> Result<Vec<ApiUser>, ApiError> {
        self.record(format!("members:{}", team_slug))?;
        self.known_team(team_slug)?;
        Ok(self.members.get(team_slug).cloned().unwrap_or_default())
    }

    async fn user(&self, login: &str) -> Result<ApiUser, ApiError> {
        self.record(format!("user:{}", login))?;
        self.users
            .get(login)
            .cloned()
            .ok_or_else(|| not_found(&format!("users/{}", login)))
    }

    async fn repositories(&self, org: &str) -> Result<Vec<ApiRepository>, ApiError> {
        self.record(format!("repositories:{}", org))?;
        Ok(self.repos.clone())
    }

    async fn repository(&self, _org: &str, repo: &str) -> Result<ApiRepository, ApiError> {
        self.record(format!("repository:{}", repo))?;
        self.known_repo(repo).cloned()
    }

    async fn collaborators(&self, _org: &str, repo: &str) -> Result<Vec<ApiUser>, ApiError> {
        self.record(format!("collaborators:{}", repo))?;
        self.known_repo(repo)?;
        Ok(self
            .collaborators
            .get(repo)
            .map(|c| c.iter().map(|(login, _)| user(login, None)).collect())
            .unwrap_or_default())
    }

    async fn collaborator_permission(
        &self,
        _org: &str,
        repo: &str,
        login: &str,
    ) -> Result<String, ApiError> {
        self.record(format!("permission:{}:{}", repo, login))?;
        self.collaborators
            .get(repo)
            .and_then(|c| c.iter().find(|(l, _)| l == login))
            .map(|(_, permission)| permission.clone())
            .ok_or_else(|| not_found(&format!("{}/collaborators/{}", repo, login)))
    }

    async fn repository_teams(&self, _org: &str, repo: &str) -> Result<Vec<ApiTeam>, ApiError> {
        self.record(format!("repo_teams:{}", repo))?;
        self.known_repo(repo)?;
        Ok(self.repo_teams.get(repo).cloned().unwrap_or_default())
    }

    async fn file_content(
        &self,
        _org: &str,
        repo: &str,
        path: &str,
    ) -> Result<Option<Vec<u8>>, ApiError> {
        self.record(format!("file:{}:{}", repo, path))?;
        self.known_repo(repo)?;
        Ok(self.files.get(&(repo.to_string(), path.to_string())).cloned())
    }
}
