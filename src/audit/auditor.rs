//! Auditor - applies an [`AuditConfig`] and assembles one [`AuditResult`]

use tracing::{debug, info, span, warn, Instrument, Level};

use super::client::AuditClient;
use super::results::{AuditResult, Collected, Dimension, Repository, SkippedItem, Team};
use crate::config::AuditConfig;
use crate::error::ApiError;
use crate::providers::GitHubApi;

/// Called before each dimension with (dimension, position, total)
pub type ProgressCallback = Box<dyn Fn(Dimension, usize, usize) + Send + Sync>;

/// Auditor for GitHub organizations
pub struct Auditor<'a, A> {
    client: &'a AuditClient<A>,
    config: AuditConfig,
    progress: Option<ProgressCallback>,
}

impl<'a, A: GitHubApi> Auditor<'a, A> {
    /// Create a new auditor with the given client and configuration
    pub fn new(client: &'a AuditClient<A>, config: AuditConfig) -> Self {
        Self {
            client,
            config,
            progress: None,
        }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Set a callback invoked before each dimension is collected
    pub fn set_progress_callback(&mut self, callback: ProgressCallback) {
        self.progress = Some(callback);
    }

    /// Perform a full audit of the organization.
    ///
    /// Dimensions are collected one after the other in [`Dimension::ALL`] order; disabled
    /// dimensions stay `None`. Nothing is reconciled between dimensions, so a repository
    /// deleted mid-audit may show up in one section and not in another.
    pub async fn audit(&self, org: &str) -> Result<AuditResult, ApiError> {
        let dimensions = self.config.enabled_dimensions();
        let total = dimensions.len();
        info!(org, dimensions = total, "Starting audit");

        let mut result = AuditResult::new(org);

        for (index, dimension) in dimensions.into_iter().enumerate() {
            if let Some(progress) = &self.progress {
                progress(dimension, index + 1, total);
            }

            let span = span!(Level::INFO, "dimension", dimension = %dimension, org);
            self.collect(org, dimension, &mut result)
                .instrument(span)
                .await?;
        }

        info!(org, skipped = result.skipped.len(), "Audit complete");
        Ok(result)
    }

    async fn collect(
        &self,
        org: &str,
        dimension: Dimension,
        result: &mut AuditResult,
    ) -> Result<(), ApiError> {
        debug!("Collecting dimension");

        match dimension {
            Dimension::Settings => {
                result.settings = Some(self.client.get_org_settings(org).await?);
            }
            Dimension::Teams => {
                let teams = self.audit_teams(org).await?;
                result.teams = Some(teams.items);
                result.record_skipped(teams.skipped);
            }
            Dimension::Repositories => {
                result.repositories = Some(self.audit_repositories(org).await?);
            }
            Dimension::Permissions => {
                let permissions = self.client.get_org_permissions(org).await?;
                result.permissions = Some(permissions.items);
                result.record_skipped(permissions.skipped);
            }
            Dimension::Codeowners => {
                let codeowners = self.client.get_all_codeowners(org).await?;
                result.codeowners = Some(codeowners.items);
                result.record_skipped(codeowners.skipped);
            }
        }

        Ok(())
    }

    /// Audit all teams in the organization.
    ///
    /// With `include_team_members`, each team gets its member list. A team whose members
    /// cannot be read gets an empty list and a skipped entry.
    pub async fn audit_teams(&self, org: &str) -> Result<Collected<Vec<Team>>, ApiError> {
        let mut collected = Collected::new(self.client.get_teams(org).await?);

        if !self.config.include_team_members {
            return Ok(collected);
        }

        let mut skipped = Vec::new();
        for team in collected.items.iter_mut() {
            match self.client.get_team_members(org, &team.slug).await {
                Ok(members) => team.members = Some(members),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(org, team = %team.slug, error = %e, "Could not fetch team members");
                    team.members = Some(Vec::new());
                    skipped.push(SkippedItem::new(Dimension::Teams, team.slug.clone(), e));
                }
            }
        }

        for item in skipped {
            collected.skip(item);
        }
        Ok(collected)
    }

    /// Audit all repositories, dropping archived ones unless `include_archived` is set
    pub async fn audit_repositories(&self, org: &str) -> Result<Vec<Repository>, ApiError> {
        let repositories = self.client.get_repositories(org).await?;

        if self.config.include_archived {
            return Ok(repositories);
        }

        Ok(repositories.into_iter().filter(|r| !r.archived).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::fake::{bad_credentials, forbidden, FakeApi};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    fn acme() -> FakeApi {
        FakeApi::new()
            .with_org("acme")
            .with_team("Platform", "platform")
            .with_member("platform", "octocat", Some("Mona Lisa"))
            .with_repo("core", false)
            .with_repo("legacy", true)
            .with_collaborator("core", "octocat", "admin")
            .with_file("core", ".github/CODEOWNERS", b"* @acme/platform\n")
    }

    #[tokio::test]
    async fn test_full_audit_populates_every_dimension() {
        let client = AuditClient::new(acme());
        let auditor = Auditor::new(&client, AuditConfig::default());

        let result = auditor.audit("acme").await.unwrap();
        assert_eq!(result.organization, "acme");
        assert_eq!(result.dimensions(), Dimension::ALL.to_vec());
        assert_eq!(result.settings.as_ref().unwrap().login, "acme");
        assert_eq!(result.teams.as_ref().unwrap().len(), 1);
        // Permissions and CODEOWNERS cover archived repositories too
        assert_eq!(result.permissions.as_ref().unwrap().len(), 2);
        assert_eq!(
            result.codeowners.as_ref().unwrap().get("core").map(String::as_str),
            Some("* @acme/platform\n")
        );
        assert!(result.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_disabled_dimensions_are_absent() {
        let client = AuditClient::new(acme());
        let config = AuditConfig {
            audit_settings: false,
            audit_permissions: false,
            audit_codeowners: false,
            ..Default::default()
        };
        let auditor = Auditor::new(&client, config);

        let result = auditor.audit("acme").await.unwrap();
        assert!(result.settings.is_none());
        assert!(result.permissions.is_none());
        assert!(result.codeowners.is_none());

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("settings").is_none());
        assert!(json.get("permissions").is_none());
        assert!(json.get("codeowners").is_none());
        assert!(json.get("teams").is_some());

        // Disabled dimensions make no API calls
        assert!(!client
            .api()
            .calls()
            .iter()
            .any(|c| c.starts_with("organization:") || c.starts_with("file:")));
    }

    #[tokio::test]
    async fn test_archived_repositories_excluded_by_default() {
        let client = AuditClient::new(acme());
        let auditor = Auditor::new(&client, AuditConfig::default());

        let repos = auditor.audit_repositories("acme").await.unwrap();
        let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["core"]);
        assert!(repos.iter().all(|r| !r.archived));
    }

    #[tokio::test]
    async fn test_archived_repositories_included_on_request() {
        let client = AuditClient::new(acme());
        let config = AuditConfig {
            include_archived: true,
            ..Default::default()
        };
        let auditor = Auditor::new(&client, config);

        let repos = auditor.audit_repositories("acme").await.unwrap();
        assert_eq!(repos.len(), 2);
        assert!(repos[1].archived);
    }

    #[tokio::test]
    async fn test_team_members_not_fetched_by_default() {
        let client = AuditClient::new(acme());
        let auditor = Auditor::new(&client, AuditConfig::default());

        let teams = auditor.audit_teams("acme").await.unwrap();
        assert_eq!(teams.items[0].slug, "platform");
        assert!(teams.items[0].members.is_none());
        assert!(!client.api().calls().iter().any(|c| c.starts_with("members:")));
    }

    #[tokio::test]
    async fn test_team_members_attached_when_requested() {
        let client = AuditClient::new(acme());
        let config = AuditConfig {
            include_team_members: true,
            ..Default::default()
        };
        let auditor = Auditor::new(&client, config);

        let teams = auditor.audit_teams("acme").await.unwrap();
        let members = teams.items[0].members.as_ref().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].login, "octocat");
        assert_eq!(members[0].role, "member");
    }

    #[tokio::test]
    async fn test_team_member_failure_yields_empty_list() {
        let api = acme()
            .with_team("Security", "security")
            .with_failure("members:platform", forbidden("teams/platform/members"));
        let client = AuditClient::new(api);
        let config = AuditConfig {
            include_team_members: true,
            ..Default::default()
        };
        let auditor = Auditor::new(&client, config);

        let teams = auditor.audit_teams("acme").await.unwrap();
        assert_eq!(teams.items[0].members, Some(Vec::new()));
        assert_eq!(teams.items[1].members, Some(Vec::new()));
        assert_eq!(teams.skipped_count(), 1);
        assert_eq!(teams.skipped[0].item, "platform");
    }

    #[tokio::test]
    async fn test_audit_collects_skipped_items() {
        let api = acme().with_failure("collaborators:legacy", forbidden("repos/acme/legacy"));
        let client = AuditClient::new(api);
        let auditor = Auditor::new(&client, AuditConfig::default());

        let result = auditor.audit("acme").await.unwrap();
        assert_eq!(result.permissions.as_ref().unwrap().len(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].dimension, Dimension::Permissions);
        assert_eq!(result.skipped[0].item, "legacy");
    }

    #[tokio::test]
    async fn test_audit_aborts_on_auth_error() {
        let api = acme().with_failure("teams:acme", bad_credentials());
        let client = AuditClient::new(api);
        let auditor = Auditor::new(&client, AuditConfig::default());

        let err = auditor.audit("acme").await.unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_audit_unknown_organization_fails() {
        let client = AuditClient::new(acme());
        let auditor = Auditor::new(&client, AuditConfig::default());

        let err = auditor.audit("globex").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_progress_callback_sees_dimensions_in_order() {
        let client = AuditClient::new(acme());
        let config = AuditConfig {
            audit_teams: false,
            ..Default::default()
        };
        let mut auditor = Auditor::new(&client, config);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        auditor.set_progress_callback(Box::new(move |dimension, current, total| {
            sink.lock().unwrap().push((dimension, current, total));
        }));

        auditor.audit("acme").await.unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (Dimension::Settings, 1, 4),
                (Dimension::Repositories, 2, 4),
                (Dimension::Permissions, 3, 4),
                (Dimension::Codeowners, 4, 4),
            ]
        );
    }
}
