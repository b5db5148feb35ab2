use super::model::{ApiMessage, Commit, Repository};
use crate::config::Config;
use crate::error::{ReportError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

pub const PER_PAGE: u32 = 100;
pub const AFFILIATION: &str = "owner,collaborator,organization_member";
const ACCEPT_GITHUB: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct RepoQuery<'a> {
    per_page: u32,
    page: u32,
    affiliation: &'a str,
}

#[derive(Serialize)]
struct CommitQuery<'a> {
    author: &'a str,
    since: &'a str,
    per_page: u32,
    page: u32,
}

/// Blocking GitHub REST client. Every call waits for its response before the
/// next one is issued.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
    author: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("token {}", config.token))
            .map_err(|_| ReportError::Config("GITHUB_TOKEN is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            author: config.author.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Every repository the token can see as owner, collaborator or
    /// organization member. Any non-success status fails the whole listing.
    pub fn list_repositories(&self) -> Result<Vec<Repository>> {
        let url = self.endpoint(&["user", "repos"])?;
        let mut repos = Vec::new();

        for page in 1.. {
            let query = RepoQuery {
                per_page: PER_PAGE,
                page,
                affiliation: AFFILIATION,
            };
            tracing::debug!(%url, page, "Listing repositories");
            let response = self.client.get(url.clone()).query(&query).send()?;

            if !response.status().is_success() {
                return Err(api_error(response));
            }

            let batch: Vec<Repository> = decode(response)?;
            if batch.is_empty() {
                break;
            }
            repos.extend(batch);
        }

        tracing::debug!(count = repos.len(), "Repository listing complete");
        Ok(repos)
    }

    /// Commits by the configured author on or after `since`.
    ///
    /// A non-success status ends pagination for this repository and keeps
    /// whatever pages were already read.
    pub fn list_commits(&self, full_name: &str, since: DateTime<Utc>) -> Result<Vec<Commit>> {
        let (owner, repo) = full_name
            .split_once('/')
            .filter(|(o, r)| !o.is_empty() && !r.is_empty())
            .ok_or_else(|| ReportError::InvalidRepository(full_name.to_string()))?;

        let url = self.endpoint(&["repos", owner, repo, "commits"])?;
        let since = since.to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut commits = Vec::new();

        for page in 1.. {
            let query = CommitQuery {
                author: &self.author,
                since: &since,
                per_page: PER_PAGE,
                page,
            };
            tracing::debug!(repo = full_name, page, "Listing commits");
            let response = self.client.get(url.clone()).query(&query).send()?;

            let status = response.status();
            if !status.is_success() {
                tracing::warn!(
                    repo = full_name,
                    status = status.as_u16(),
                    page,
                    kept = commits.len(),
                    "Stopped fetching commits"
                );
                break;
            }

            let batch: Vec<Commit> = decode(response)?;
            if batch.is_empty() {
                break;
            }
            commits.extend(batch);
        }

        Ok(commits)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ReportError::Config(format!("API URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text()?;
    Ok(serde_json::from_str(&body)?)
}

fn api_error(response: Response) -> ReportError {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ApiMessage>(&body)
        .map(|m| m.message)
        .unwrap_or(body);
    ReportError::api(status, message)
}
