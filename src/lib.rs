//! github-org-audit Library
//!
//! This crate collects the state of a GitHub organization (settings, teams,
//! repositories, permissions and CODEOWNERS files) into one structured report.

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod providers;

pub use error::AuditError;
