use super::{output_summary, render, sort_activity, write_report};
use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::ReportError;
use crate::github::{GitHubClient, Repository};
use crate::model::{Aggregate, RepoActivity};
use anyhow::Context;
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

pub struct Report {
    pub path: PathBuf,
    pub entries: Vec<RepoActivity>,
}

pub fn exec(args: &RunArgs) -> anyhow::Result<()> {
    let config = Config::from_args(args).context("Invalid configuration")?;
    let report = run(&config, Utc::now())?;
    output_summary(&report.path, &report.entries);
    Ok(())
}

/// Runs the whole job as of `now` and returns where the report landed.
pub fn run(config: &Config, now: DateTime<Utc>) -> anyhow::Result<Report> {
    let since = cutoff(now, config)?;
    let client = GitHubClient::new(config).context("Failed to build HTTP client")?;

    tracing::info!(api = %client.base_url(), author = %config.author, %since, "Collecting commits");

    let repos = client
        .list_repositories()
        .context("Failed to list repositories")?;

    let aggregate = fetch_activity(&client, &repos, since, config.show_progress)?;
    let entries = sort_activity(aggregate);

    let contents = render(&entries, &now);
    let path = write_report(&config.output_dir, &now, &contents)
        .with_context(|| format!("Failed to write report to {}", config.output_dir.display()))?;

    Ok(Report { path, entries })
}

fn cutoff(now: DateTime<Utc>, config: &Config) -> anyhow::Result<DateTime<Utc>> {
    let lookback = chrono::Duration::from_std(config.lookback)
        .context("Lookback duration is out of range")?;
    now.checked_sub_signed(lookback)
        .context("Lookback duration reaches before the supported date range")
}

fn fetch_activity(
    client: &GitHubClient,
    repos: &[Repository],
    since: DateTime<Utc>,
    show_progress: bool,
) -> anyhow::Result<Aggregate> {
    let total = repos.len();
    let pb = if show_progress {
        ProgressBar::new(total as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut aggregate = Aggregate::new();

    for (i, repo) in repos.iter().enumerate() {
        pb.suspend(|| {
            tracing::info!("[{}/{}] Fetching commits from {}", i + 1, total, repo.full_name)
        });
        pb.set_message(format!("Fetching commits from {}", repo.full_name));

        let commits = match client.list_commits(&repo.full_name, since) {
            Ok(commits) => commits,
            Err(ReportError::InvalidRepository(name)) => {
                pb.suspend(|| tracing::warn!(repo = %name, "Skipping repository with malformed name"));
                pb.inc(1);
                continue;
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to fetch commits for {}", repo.full_name))
            }
        };

        let fetched = commits.len();
        let entries: Vec<_> = commits.into_iter().filter_map(|c| c.into_entry()).collect();
        if entries.len() < fetched {
            tracing::debug!(
                repo = %repo.full_name,
                skipped = fetched - entries.len(),
                "Skipped commits without an author date"
            );
        }
        aggregate.extend(repo.key(), entries);

        pb.inc(1);
    }

    pb.finish_with_message("Commits collected");
    Ok(aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;
    use tokio::runtime::Runtime;
    use url::Url;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_url: &str, output_dir: PathBuf) -> Config {
        Config {
            token: "t".into(),
            author: "e".into(),
            api_url: Url::parse(api_url).unwrap(),
            lookback: Duration::from_secs(7 * 86400),
            output_dir,
            show_progress: false,
        }
    }

    fn mount_page(rt: &Runtime, server: &MockServer, route: &str, page: &str, body: serde_json::Value) {
        rt.block_on(
            Mock::given(method("GET"))
                .and(path(route))
                .and(query_param("page", page))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(server),
        );
    }

    #[test]
    fn cutoff_is_lookback_before_now() {
        let config = config("https://api.github.com", PathBuf::from("data"));
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 12, 30, 0).unwrap();
        assert_eq!(
            cutoff(now, &config).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn run_skips_malformed_names_and_authorless_commits() {
        let rt = Runtime::new().unwrap();
        let server = rt.block_on(MockServer::start());
        let dir = tempdir().unwrap();

        mount_page(
            &rt,
            &server,
            "/user/repos",
            "1",
            json!([
                { "full_name": "noslash", "private": false },
                { "full_name": "a/b", "private": false }
            ]),
        );
        mount_page(&rt, &server, "/user/repos", "2", json!([]));
        mount_page(
            &rt,
            &server,
            "/repos/a/b/commits",
            "1",
            json!([
                { "html_url": "u1", "commit": { "message": "x", "author": null } },
                { "html_url": "u2", "commit": { "message": "y\r\nz", "author": { "date": "2024-01-02T10:00:00Z" } } }
            ]),
        );
        mount_page(&rt, &server, "/repos/a/b/commits", "2", json!([]));

        let out = dir.path().join("data");
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 6, 0, 0).unwrap();
        let report = run(&config(&server.uri(), out.clone()), now).unwrap();

        assert_eq!(report.path, out.join("2024-01-08.mdx"));
        assert_eq!(report.entries.len(), 1);
        assert_eq!(
            fs::read_to_string(&report.path).unwrap(),
            "# GitHub Commits - 2024-01-08\n\n\n## a/b (public)\n\n- `2024-01-02 10:00` [y z](u2)"
        );

        let requests = rt.block_on(server.received_requests()).unwrap();
        assert!(requests.iter().all(|r| !r.url.path().contains("noslash")));
    }
}
