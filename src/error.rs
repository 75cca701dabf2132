//! Error types for github-org-audit
//!
//! This module defines custom error types using `thiserror` for better error handling
//! and more descriptive error messages throughout the application.
//!
//! Only [`ApiError::Auth`] is fatal inside a multi-item enumeration. Every other
//! per-item failure is recorded as a skipped item by the audit client.

use thiserror::Error;

/// Main error type for github-org-audit
#[derive(Error, Debug)]
pub enum AuditError {
    /// GitHub API errors
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Output rendering or writing errors
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Errors returned by the GitHub API layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The token is missing, invalid or expired
    #[error("Authentication failed: {message}")]
    Auth {
        /// Message returned by GitHub
        message: String,
    },

    /// The organization, repository or file does not exist or is not visible
    #[error("Not found or not accessible: {resource}")]
    NotFound {
        /// The resource that was requested
        resource: String,
    },

    /// The token is valid but lacks access to the resource
    #[error("Access denied to {resource}: {message}")]
    Forbidden {
        /// The resource that was requested
        resource: String,
        /// Message returned by GitHub
        message: String,
    },

    /// Any other failed request (network, rate limit, server error)
    #[error("GitHub API request for {resource} failed: {message}")]
    Request {
        /// The resource that was requested
        resource: String,
        /// Underlying error message
        message: String,
    },

    /// The response could not be decoded
    #[error("Unexpected response for {resource}: {message}")]
    Decode {
        /// The resource that was requested
        resource: String,
        /// Underlying error message
        message: String,
    },
}

impl ApiError {
    /// Whether the error must abort the whole audit instead of skipping one item
    pub fn is_fatal(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }

    /// Whether the error means the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        /// Path to the configuration file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to parse a YAML configuration file
    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Failed to parse a TOML configuration file
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Failed to serialize configuration
    #[error("Failed to serialize config: {message}")]
    Serialize {
        /// Error message
        message: String,
    },

    /// The configured GitHub API URL is not usable
    #[error("Invalid API URL '{url}': {message}")]
    InvalidApiUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        message: String,
    },

    /// The GitHub client could not be constructed
    #[error("Failed to build GitHub client: {message}")]
    Client {
        /// Error message
        message: String,
    },
}

/// Output-related errors
#[derive(Error, Debug)]
pub enum OutputError {
    /// Failed to write the report
    #[error("Failed to write '{path}': {source}")]
    FileWrite {
        /// Path to the output file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding or decoding failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Man page rendering failed
    #[error("Failed to render man page: {0}")]
    Man(std::io::Error),
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Output(OutputError::Json(err))
    }
}

impl From<serde_yaml::Error> for AuditError {
    fn from(err: serde_yaml::Error) -> Self {
        AuditError::Output(OutputError::Yaml(err))
    }
}

impl From<toml::ser::Error> for AuditError {
    fn from(err: toml::ser::Error) -> Self {
        AuditError::Config(ConfigError::Serialize {
            message: err.to_string(),
        })
    }
}
