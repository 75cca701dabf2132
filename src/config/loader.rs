//! Configuration loader

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::audit::results::Dimension;
use crate::error::{AuditError, ConfigError};

use super::{default_true, ConfigOverrides};

/// Configuration file picked up from the working directory when `--config` is not given
pub const CONFIG_FILENAME: &str = ".github-org-audit.toml";

/// Which dimensions to audit and how
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Include organization settings
    #[serde(default = "default_true")]
    pub audit_settings: bool,

    /// Include teams
    #[serde(default = "default_true")]
    pub audit_teams: bool,

    /// Include repositories
    #[serde(default = "default_true")]
    pub audit_repositories: bool,

    /// Include permissions of every repository
    #[serde(default = "default_true")]
    pub audit_permissions: bool,

    /// Include CODEOWNERS of every repository
    #[serde(default = "default_true")]
    pub audit_codeowners: bool,

    /// Keep archived repositories in the repository list
    #[serde(default)]
    pub include_archived: bool,

    /// Attach member lists to teams
    #[serde(default)]
    pub include_team_members: bool,

    /// GitHub Enterprise API base URL (defaults to api.github.com)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            audit_settings: true,
            audit_teams: true,
            audit_repositories: true,
            audit_permissions: true,
            audit_codeowners: true,
            include_archived: false,
            include_team_members: false,
            api_url: None,
        }
    }
}

impl AuditConfig {
    /// Load configuration from the default file or return default
    pub fn load_or_default() -> Result<Self, AuditError> {
        let config_path = Path::new(CONFIG_FILENAME);

        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            debug!("No {} found, using defaults", CONFIG_FILENAME);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    ///
    /// `.yml` and `.yaml` files are read as YAML, anything else as TOML. An empty
    /// file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, AuditError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = if content.trim().is_empty() {
            Self::default()
        } else if is_yaml(path) {
            serde_yaml::from_str(&content).map_err(ConfigError::Yaml)?
        } else {
            toml::from_str(&content).map_err(ConfigError::Toml)?
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to [`AuditConfig::load_or_default`]
    pub fn resolve(path: Option<&Path>) -> Result<Self, AuditError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_or_default(),
        }
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(api_url) = &self.api_url {
            let parsed = url::Url::parse(api_url).map_err(|e| ConfigError::InvalidApiUrl {
                url: api_url.clone(),
                message: e.to_string(),
            })?;

            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidApiUrl {
                    url: api_url.clone(),
                    message: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
        }
        Ok(())
    }

    /// Apply explicit command-line flags on top of the loaded values
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        let pairs = [
            (&mut self.audit_settings, overrides.audit_settings),
            (&mut self.audit_teams, overrides.audit_teams),
            (&mut self.audit_repositories, overrides.audit_repositories),
            (&mut self.audit_permissions, overrides.audit_permissions),
            (&mut self.audit_codeowners, overrides.audit_codeowners),
            (&mut self.include_archived, overrides.include_archived),
            (&mut self.include_team_members, overrides.include_team_members),
        ];

        for (field, value) in pairs {
            if let Some(value) = value {
                *field = value;
            }
        }
    }

    /// Check if a dimension is enabled
    pub fn is_enabled(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Settings => self.audit_settings,
            Dimension::Teams => self.audit_teams,
            Dimension::Repositories => self.audit_repositories,
            Dimension::Permissions => self.audit_permissions,
            Dimension::Codeowners => self.audit_codeowners,
        }
    }

    /// Enabled dimensions in audit order
    pub fn enabled_dimensions(&self) -> Vec<Dimension> {
        Dimension::ALL
            .into_iter()
            .filter(|d| self.is_enabled(*d))
            .collect()
    }

    /// Keep only `dimension` enabled, leaving the other options as they are
    pub fn only(mut self, dimension: Dimension) -> Self {
        self.audit_settings = dimension == Dimension::Settings;
        self.audit_teams = dimension == Dimension::Teams;
        self.audit_repositories = dimension == Dimension::Repositories;
        self.audit_permissions = dimension == Dimension::Permissions;
        self.audit_codeowners = dimension == Dimension::Codeowners;
        self
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, AuditError> {
        toml::to_string_pretty(self).map_err(Into::into)
    }

    /// Serialize in the format `load_from_file` expects for `path`
    pub fn to_string_for(&self, path: &Path) -> Result<String, AuditError> {
        if is_yaml(path) {
            Ok(serde_yaml::to_string(self).map_err(ConfigError::Yaml)?)
        } else {
            self.to_toml()
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn write_config(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = AuditConfig::default();
        assert!(config.audit_settings);
        assert!(config.audit_codeowners);
        assert!(!config.include_archived);
        assert!(!config.include_team_members);
        assert_eq!(config.enabled_dimensions(), Dimension::ALL.to_vec());
    }

    #[test]
    fn test_load_yaml_partial() {
        let file = write_config(
            ".yaml",
            "audit_permissions: false\ninclude_archived: true\n",
        );
        let config = AuditConfig::load_from_file(file.path()).unwrap();
        assert!(!config.audit_permissions);
        assert!(config.include_archived);
        // Unset keys keep their defaults
        assert!(config.audit_teams);
        assert!(!config.include_team_members);
    }

    #[test]
    fn test_load_toml() {
        let file = write_config(
            ".toml",
            "audit_codeowners = false\napi_url = \"https://github.example.com/api/v3\"\n",
        );
        let config = AuditConfig::load_from_file(file.path()).unwrap();
        assert!(!config.audit_codeowners);
        assert_eq!(
            config.api_url.as_deref(),
            Some("https://github.example.com/api/v3")
        );
    }

    #[test]
    fn test_load_empty_file_gives_defaults() {
        let file = write_config(".yml", "\n");
        let config = AuditConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config, AuditConfig::default());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let file = write_config(".yml", "audit_teams: [not a bool\n");
        let err = AuditConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, AuditError::Config(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = AuditConfig::load_from_file(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, AuditError::Config(ConfigError::FileRead { .. })));
    }

    #[test]
    fn test_invalid_api_url_scheme() {
        let config = AuditConfig {
            api_url: Some("ftp://github.example.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidApiUrl { .. })
        ));
    }

    #[test]
    fn test_overrides_only_touch_given_flags() {
        let mut config = AuditConfig {
            audit_teams: false,
            ..Default::default()
        };
        config.apply_overrides(&ConfigOverrides {
            audit_settings: Some(false),
            include_archived: Some(true),
            ..Default::default()
        });

        assert!(!config.audit_settings);
        assert!(config.include_archived);
        // Not overridden: keeps the file value
        assert!(!config.audit_teams);
        assert!(config.audit_repositories);
    }

    #[test]
    fn test_enabled_dimensions_keep_order() {
        let config = AuditConfig {
            audit_settings: false,
            audit_permissions: false,
            ..Default::default()
        };
        assert_eq!(
            config.enabled_dimensions(),
            vec![
                Dimension::Teams,
                Dimension::Repositories,
                Dimension::Codeowners
            ]
        );
    }

    #[test]
    fn test_only_keeps_options() {
        let config = AuditConfig {
            include_archived: true,
            ..Default::default()
        }
        .only(Dimension::Repositories);

        assert_eq!(config.enabled_dimensions(), vec![Dimension::Repositories]);
        assert!(config.include_archived);
    }

    #[test]
    fn test_to_string_for_yaml_path() {
        let config = AuditConfig::default();
        let yaml = config.to_string_for(Path::new("audit.yml")).unwrap();
        assert!(yaml.contains("audit_teams: true"));
        let parsed: AuditConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);

        let toml = config.to_string_for(Path::new(CONFIG_FILENAME)).unwrap();
        assert!(toml.contains("audit_teams = true"));
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = AuditConfig {
            include_team_members: true,
            ..Default::default()
        };
        let serialized = config.to_toml().unwrap();
        assert!(serialized.contains("include_team_members = true"));
        let parsed: AuditConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }
}
