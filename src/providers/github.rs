//! GitHub provider - Interactions with the GitHub REST API via octocrab

use async_trait::async_trait;
use base64::Engine;
use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::{ApiOrganization, ApiRepository, ApiTeam, ApiUser, GitHubApi};
use crate::error::{ApiError, ConfigError};

/// Page size requested for every listing endpoint (GitHub maximum)
const PER_PAGE: u8 = 100;

/// Personal access token used to authenticate against GitHub.
///
/// `Debug` never prints the token.
#[derive(Clone)]
pub struct GitHubToken(String);

impl GitHubToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for GitHubToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Debug for GitHubToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GitHubToken(***)")
    }
}

/// [`GitHubApi`] implementation backed by an authenticated `octocrab` session
pub struct OctocrabApi {
    client: Octocrab,
}

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
}

#[derive(Debug, Deserialize)]
struct ApiPermission {
    permission: String,
}

#[derive(Debug, Deserialize)]
struct ApiContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl OctocrabApi {
    /// Create a client for github.com, or for a GitHub Enterprise API when `api_url` is set
    pub fn new(token: &GitHubToken, api_url: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Octocrab::builder().personal_token(token.expose().to_string());

        if let Some(url) = api_url {
            builder = builder
                .base_uri(url)
                .map_err(|e| ConfigError::InvalidApiUrl {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
        }

        let client = builder.build().map_err(|e| ConfigError::Client {
            message: e.to_string(),
        })?;

        Ok(Self { client })
    }

    async fn get_one<T: DeserializeOwned>(&self, route: &str) -> Result<T, ApiError> {
        debug!(route, "GET");
        self.client
            .get(route, None::<&()>)
            .await
            .map_err(|e| map_error(e, route))
    }

    async fn get_all<T: DeserializeOwned>(&self, route: &str) -> Result<Vec<T>, ApiError> {
        debug!(route, "GET (paginated)");
        let first: Page<T> = self
            .client
            .get(route, Some(&PageParams { per_page: PER_PAGE }))
            .await
            .map_err(|e| map_error(e, route))?;

        self.client
            .all_pages(first)
            .await
            .map_err(|e| map_error(e, route))
    }
}

#[async_trait]
impl GitHubApi for OctocrabApi {
    async fn organization(&self, org: &str) -> Result<ApiOrganization, ApiError> {
        self.get_one(&org_route(org)).await
    }

    async fn teams(&self, org: &str) -> Result<Vec<ApiTeam>, ApiError> {
        self.get_all(&format!("{}/teams", org_route(org))).await
    }

    async fn team(&self, org: &str, team_slug: &str) -> Result<ApiTeam, ApiError> {
        self.get_one(&team_route(org, team_slug)).await
    }

    async fn team_members(&self, org: &str, team_slug: &str) -> Result<Vec<ApiUser>, ApiError> {
        self.get_all(&format!("{}/members", team_route(org, team_slug)))
            .await
    }

    async fn user(&self, login: &str) -> Result<ApiUser, ApiError> {
        self.get_one(&format!("/users/{}", login)).await
    }

    async fn repositories(&self, org: &str) -> Result<Vec<ApiRepository>, ApiError> {
        self.get_all(&format!("{}/repos", org_route(org))).await
    }

    async fn repository(&self, org: &str, repo: &str) -> Result<ApiRepository, ApiError> {
        self.get_one(&repo_route(org, repo)).await
    }

    async fn collaborators(&self, org: &str, repo: &str) -> Result<Vec<ApiUser>, ApiError> {
        self.get_all(&format!("{}/collaborators", repo_route(org, repo)))
            .await
    }

    async fn collaborator_permission(
        &self,
        org: &str,
        repo: &str,
        login: &str,
    ) -> Result<String, ApiError> {
        let route = format!("{}/collaborators/{}/permission", repo_route(org, repo), login);
        let permission: ApiPermission = self.get_one(&route).await?;
        Ok(permission.permission)
    }

    async fn repository_teams(&self, org: &str, repo: &str) -> Result<Vec<ApiTeam>, ApiError> {
        self.get_all(&format!("{}/teams", repo_route(org, repo)))
            .await
    }

    async fn file_content(
        &self,
        org: &str,
        repo: &str,
        path: &str,
    ) -> Result<Option<Vec<u8>>, ApiError> {
        let route = format!("{}/contents/{}", repo_route(org, repo), path);

        // Directories come back as a JSON array
        let value: serde_json::Value = match self.get_one(&route).await {
            Ok(value) => value,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        if value.is_array() {
            return Ok(None);
        }

        let content: ApiContent =
            serde_json::from_value(value).map_err(|e| ApiError::Decode {
                resource: route.clone(),
                message: e.to_string(),
            })?;

        decode_content(&route, content)
    }
}

fn org_route(org: &str) -> String {
    format!("/orgs/{}", org)
}

fn team_route(org: &str, team_slug: &str) -> String {
    format!("/orgs/{}/teams/{}", org, team_slug)
}

fn repo_route(org: &str, repo: &str) -> String {
    format!("/repos/{}/{}", org, repo)
}

fn decode_content(route: &str, content: ApiContent) -> Result<Option<Vec<u8>>, ApiError> {
    if content.kind != "file" {
        return Ok(None);
    }

    match content.encoding.as_deref() {
        Some("base64") => {
            let encoded: String = content
                .content
                .unwrap_or_default()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();

            base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .map(Some)
                .map_err(|e| ApiError::Decode {
                    resource: route.to_string(),
                    message: e.to_string(),
                })
        }
        other => Err(ApiError::Decode {
            resource: route.to_string(),
            message: format!("unsupported content encoding {:?}", other),
        }),
    }
}

/// Translate an octocrab error into the audit error taxonomy
fn map_error(err: octocrab::Error, resource: &str) -> ApiError {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            let message = source.message.clone();
            match source.status_code.as_u16() {
                401 => ApiError::Auth { message },
                404 => ApiError::NotFound {
                    resource: resource.to_string(),
                },
                403 => ApiError::Forbidden {
                    resource: resource.to_string(),
                    message,
                },
                status => ApiError::Request {
                    resource: resource.to_string(),
                    message: format!("HTTP {}: {}", status, message),
                },
            }
        }
        other => ApiError::Request {
            resource: resource.to_string(),
            message: other.to_string(),
        },
    }
}
