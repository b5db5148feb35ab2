use crate::model::{CommitEntry, RepoKey};
use crate::util::single_line;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
}

impl Repository {
    pub fn key(&self) -> RepoKey {
        RepoKey::new(self.full_name.clone(), self.private)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub html_url: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    pub author: Option<Signature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Signature {
    pub date: DateTime<Utc>,
}

impl Commit {
    /// `None` when the API omitted the git author block.
    pub fn into_entry(self) -> Option<CommitEntry> {
        let timestamp = self.commit.author?.date;
        Some(CommitEntry {
            timestamp,
            message: single_line(&self.commit.message),
            url: self.html_url,
        })
    }
}

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}
