//! Plain-text table output
//!
//! One grid table per audited dimension, each under an underlined heading.

use console::{measure_text_width, pad_str, Alignment};

use super::ReportRenderer;
use crate::audit::checks::{CheckStatus, CoverageReport, SecurityReport};
use crate::audit::results::{display_opt, AuditResult, RepositoryPermissions, Team};
use crate::error::AuditError;

const RULE_WIDTH: usize = 80;

pub struct TableOutput {
    detailed: bool,
}

impl TableOutput {
    /// `detailed` adds member lists, per-repository permissions and CODEOWNERS contents
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }

    fn format_teams(&self, teams: &[Team], out: &mut Vec<String>) {
        heading("Teams", out);
        if teams.is_empty() {
            out.push("No teams found".to_string());
            return;
        }

        let rows: Vec<Vec<String>> = teams
            .iter()
            .map(|t| {
                vec![
                    t.name.clone(),
                    t.slug.clone(),
                    display_opt(&t.privacy),
                    display_opt(&t.permission),
                    display_opt(&t.members_count),
                    display_opt(&t.repos_count),
                ]
            })
            .collect();
        out.push(grid(
            &["Name", "Slug", "Privacy", "Permission", "Members", "Repos"],
            &rows,
        ));

        if !self.detailed {
            return;
        }

        for team in teams {
            let Some(members) = &team.members else {
                continue;
            };
            out.push(String::new());
            out.push(format!("Members of {}:", team.slug));
            if members.is_empty() {
                out.push("  (none)".to_string());
                continue;
            }
            let rows: Vec<Vec<String>> = members
                .iter()
                .map(|m| vec![m.login.clone(), display_opt(&m.name), m.role.clone()])
                .collect();
            out.push(grid(&["Login", "Name", "Role"], &rows));
        }
    }

    fn format_permissions(&self, permissions: &[RepositoryPermissions], out: &mut Vec<String>) {
        heading("Permissions Summary", out);
        out.push(format!(
            "Total repositories with permissions: {}",
            permissions.len()
        ));

        if !self.detailed {
            return;
        }

        for repo in permissions {
            out.push(String::new());
            out.push(format!("Repository: {}", repo.repository));

            if !repo.collaborators.is_empty() {
                out.push("Collaborators:".to_string());
                let rows: Vec<Vec<String>> = repo
                    .collaborators
                    .iter()
                    .map(|c| vec![c.login.clone(), c.permission.clone()])
                    .collect();
                out.push(grid(&["Login", "Permission"], &rows));
            }

            if !repo.teams.is_empty() {
                out.push("Teams:".to_string());
                let rows: Vec<Vec<String>> = repo
                    .teams
                    .iter()
                    .map(|t| vec![t.name.clone(), t.permission.clone()])
                    .collect();
                out.push(grid(&["Name", "Permission"], &rows));
            }
        }
    }
}

impl ReportRenderer for TableOutput {
    fn render_report(&self, result: &AuditResult) -> Result<String, AuditError> {
        let mut out = Vec::new();

        if let Some(settings) = &result.settings {
            heading("Organization Settings", &mut out);
            let rows: Vec<Vec<String>> = settings
                .rows()
                .into_iter()
                .map(|(key, value)| vec![key.to_string(), value])
                .collect();
            out.push(grid(&["Setting", "Value"], &rows));
            out.push(String::new());
        }

        if let Some(teams) = &result.teams {
            self.format_teams(teams, &mut out);
            out.push(String::new());
        }

        if let Some(repositories) = &result.repositories {
            heading("Repositories", &mut out);
            if repositories.is_empty() {
                out.push("No repositories found".to_string());
            } else {
                let rows: Vec<Vec<String>> = repositories
                    .iter()
                    .map(|r| {
                        vec![
                            r.name.clone(),
                            r.private.to_string(),
                            r.archived.to_string(),
                            display_opt(&r.default_branch),
                            display_opt(&r.visibility),
                        ]
                    })
                    .collect();
                out.push(grid(
                    &["Name", "Private", "Archived", "Default Branch", "Visibility"],
                    &rows,
                ));
                out.push(String::new());
                out.push(format!("Total repositories: {}", repositories.len()));
            }
            out.push(String::new());
        }

        if let Some(permissions) = &result.permissions {
            self.format_permissions(permissions, &mut out);
            out.push(String::new());
        }

        if let Some(codeowners) = &result.codeowners {
            heading("CODEOWNERS Summary", &mut out);
            if codeowners.is_empty() {
                out.push("No CODEOWNERS files found".to_string());
            } else {
                out.push(format!("Repositories with CODEOWNERS: {}", codeowners.len()));
                for repo in codeowners.keys() {
                    out.push(format!("  - {}", repo));
                }
                if self.detailed {
                    for (repo, content) in codeowners {
                        out.push(String::new());
                        out.push(format!("CODEOWNERS for {}:", repo));
                        out.push("-".repeat(RULE_WIDTH));
                        out.push(content.trim_end().to_string());
                    }
                }
            }
            out.push(String::new());
        }

        if !result.skipped.is_empty() {
            heading("Skipped Items", &mut out);
            let rows: Vec<Vec<String>> = result
                .skipped
                .iter()
                .map(|s| vec![s.dimension.to_string(), s.item.clone(), s.reason.clone()])
                .collect();
            out.push(grid(&["Dimension", "Item", "Reason"], &rows));
            out.push(String::new());
        }

        Ok(out.join("\n"))
    }

    fn render_security(&self, report: &SecurityReport) -> Result<String, AuditError> {
        let mut out = Vec::new();

        heading(&format!("Security Audit for: {}", report.organization), &mut out);
        for check in &report.checks {
            let marker = match check.status {
                CheckStatus::Pass => "✓",
                CheckStatus::Warning => "✗",
                CheckStatus::Notice => "⚠",
            };
            out.push(format!("{} [{}] {}", marker, check.id, check.message));
        }
        out.push(String::new());

        let stats = &report.repositories;
        heading("Repository Security Check", &mut out);
        out.push(format!("Total repositories: {}", stats.total));
        out.push(format!("  Private: {}", stats.private));
        out.push(format!("  Public: {}", stats.public));
        out.push(format!("  Archived: {}", stats.archived));
        out.push(String::new());

        Ok(out.join("\n"))
    }

    fn render_coverage(&self, report: &CoverageReport) -> Result<String, AuditError> {
        let mut out = Vec::new();

        heading(&format!("CODEOWNERS coverage for: {}", report.organization), &mut out);
        out.push(format!("Total active repositories: {}", report.active_repositories));
        out.push(format!(
            "Repositories with CODEOWNERS: {}",
            report.with_codeowners.len()
        ));
        out.push(format!(
            "Repositories without CODEOWNERS: {}",
            report.missing_codeowners.len()
        ));

        if !report.missing_codeowners.is_empty() {
            out.push(String::new());
            out.push("Repositories missing CODEOWNERS:".to_string());
            out.push("-".repeat(RULE_WIDTH));
            for repo in &report.missing_codeowners {
                out.push(format!("  - {}", repo));
            }
        }

        if !report.skipped.is_empty() {
            out.push(String::new());
            out.push("Repositories that could not be checked:".to_string());
            out.push("-".repeat(RULE_WIDTH));
            for item in &report.skipped {
                out.push(format!("  - {} ({})", item.item, item.reason));
            }
        }

        out.push(String::new());
        out.push(format!("CODEOWNERS coverage: {:.1}%", report.coverage_percent));
        out.push(String::new());

        Ok(out.join("\n"))
    }
}

fn heading(title: &str, out: &mut Vec<String>) {
    out.push(title.to_string());
    out.push("=".repeat(RULE_WIDTH));
}

/// Render rows as a grid with a `=` rule under the header and a `-` rule between rows
fn grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.replace('\n', " ")).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let rule = |fill: char| -> String {
        let segments: Vec<String> = widths
            .iter()
            .map(|w| fill.to_string().repeat(w + 2))
            .collect();
        format!("+{}+", segments.join("+"))
    };
    let line = |values: Vec<&str>| -> String {
        let padded: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(value, width)| pad_str(value, *width, Alignment::Left, None).into_owned())
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let mut lines = vec![rule('-'), line(headers.to_vec()), rule('=')];
    for row in &cells {
        lines.push(line(row.iter().map(String::as_str).collect()));
        lines.push(rule('-'));
    }
    if cells.is_empty() {
        lines.pop();
        lines.push(rule('-'));
    }

    lines.join("\n")
}
