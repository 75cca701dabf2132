//! Exit codes for the CLI
//!
//! # Exit Code Reference
//!
//! | Code | Constant | Meaning | Example |
//! |------|----------|---------|---------|
//! | 0 | `SUCCESS` | Success | Report written |
//! | 1 | `ERROR` | Runtime error | Bad credentials, unknown organization, unreadable config |
//! | 2 | - | Usage error | Reported by `clap` for invalid arguments |
//! | 3 | `FINDINGS` | Checks found problems | `security` warnings, repositories missing CODEOWNERS |
//!
//! # Usage
//!
//! ```rust
//! use github_org_audit::cli::exit_codes;
//!
//! assert_eq!(exit_codes::SUCCESS, 0);
//! ```

/// Success - the command completed normally.
pub const SUCCESS: i32 = 0;

/// Runtime error (authentication, API, configuration or output failure).
///
/// Used when:
/// - The token is rejected
/// - The organization or repository does not exist
/// - The configuration file cannot be read or parsed
/// - The report cannot be written
/// - `init` would overwrite an existing file without `--force`
pub const ERROR: i32 = 1;

/// Checks completed and found problems.
///
/// Used when:
/// - `security` reports at least one warning
/// - `coverage` finds active repositories without CODEOWNERS
pub const FINDINGS: i32 = 3;
