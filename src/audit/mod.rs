//! # Audit Module
//!
//! This module collects the state of a GitHub organization.
//!
//! ## Components
//!
//! - [`client::AuditClient`] - one method per audit dimension, normalizing API objects
//! - [`auditor::Auditor`] - applies an [`crate::config::AuditConfig`] and assembles one
//!   [`results::AuditResult`]
//! - [`checks`] - security posture and CODEOWNERS coverage built on the collected records
//!
//! ## Examples
//!
//! ```rust,no_run
//! use github_org_audit::audit::{AuditClient, Auditor};
//! use github_org_audit::config::AuditConfig;
//! use github_org_audit::providers::github::{GitHubToken, OctocrabApi};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let api = OctocrabApi::new(&GitHubToken::new("ghp_example"), None)?;
//! let client = AuditClient::new(api);
//! let auditor = Auditor::new(&client, AuditConfig::default());
//!
//! let result = auditor.audit("acme").await?;
//! println!("{} items skipped", result.skipped.len());
//! # Ok(())
//! # }
//! ```

pub mod auditor;
pub mod checks;
pub mod client;
pub mod results;

pub use auditor::Auditor;
pub use client::AuditClient;
pub use results::{AuditResult, Dimension};
