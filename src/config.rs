//! Run configuration.
//!
//! Everything the job needs is resolved here once, before any request is made,
//! and handed down explicitly.

use crate::cli::RunArgs;
use crate::error::{ReportError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_LOOKBACK: &str = "7days";
pub const DEFAULT_OUTPUT_DIR: &str = "data";

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    /// Value sent as the `author` filter on commit queries; falls back to the
    /// `EMAILID` contact address
    pub author: String,
    pub api_url: Url,
    pub lookback: Duration,
    pub output_dir: PathBuf,
    pub show_progress: bool,
}

impl Config {
    pub fn from_args(args: &RunArgs) -> Result<Self> {
        let token = required(args.token.as_deref(), "GITHUB_TOKEN")?;
        let email = required(args.email.as_deref(), "EMAILID")?;

        let author = args
            .author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(email.as_str())
            .to_string();

        let api_url = parse_api_url(&args.api_url)?;

        let lookback = humantime::parse_duration(args.since.trim()).map_err(|e| {
            ReportError::Config(format!("Invalid --since duration '{}': {e}", args.since))
        })?;

        Ok(Self {
            token,
            author,
            api_url,
            lookback,
            output_dir: args.output_dir.clone(),
            show_progress: !args.no_progress,
        })
    }
}

fn required(value: Option<&str>, var: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ReportError::Config(format!(
            "{var} must be set in environment variables"
        ))),
    }
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim_end_matches('/'))?;
    if url.cannot_be_a_base() {
        return Err(ReportError::Config(format!("API URL cannot be a base: {raw}")));
    }
    Ok(url)
}
