use crate::error::Result;
use crate::model::RepoActivity;
use crate::util::{date_key, format_timestamp};
use chrono::{DateTime, Utc};
use console::style;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_EXTENSION: &str = "mdx";

pub fn render_lines(entries: &[RepoActivity], now: &DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![format!("# GitHub Commits - {}\n", date_key(now))];

    for entry in entries {
        lines.push(format!(
            "\n## {} ({})\n",
            entry.repo.full_name,
            entry.repo.visibility()
        ));
        for commit in &entry.commits {
            lines.push(format!(
                "- `{}` [{}]({})",
                format_timestamp(&commit.timestamp),
                commit.message,
                commit.url
            ));
        }
    }

    lines
}

pub fn render(entries: &[RepoActivity], now: &DateTime<Utc>) -> String {
    render_lines(entries, now).join("\n")
}

pub fn report_path(output_dir: &Path, now: &DateTime<Utc>) -> PathBuf {
    output_dir.join(format!("{}.{}", date_key(now), REPORT_EXTENSION))
}

/// Writes the report, creating `output_dir` if needed. An existing report for
/// the same day is replaced.
pub fn write_report(output_dir: &Path, now: &DateTime<Utc>, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = report_path(output_dir, now);
    fs::write(&path, contents)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Report written");
    Ok(path)
}

pub fn output_summary(path: &Path, entries: &[RepoActivity]) {
    let commits: usize = entries.iter().map(|e| e.commits.len()).sum();

    println!(
        "{} Commit log saved to {}",
        style("✔").green(),
        style(path.display()).bold()
    );
    println!(
        "Repositories: {}  Commits: {}",
        style(entries.len()).cyan(),
        style(commits).cyan()
    );
}
