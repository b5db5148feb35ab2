use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoKey {
    pub full_name: String,
    pub private: bool,
}

impl RepoKey {
    pub fn new(full_name: impl Into<String>, private: bool) -> Self {
        Self {
            full_name: full_name.into(),
            private,
        }
    }

    pub fn visibility(&self) -> &'static str {
        if self.private {
            "private"
        } else {
            "public"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct RepoActivity {
    pub repo: RepoKey,
    pub commits: Vec<CommitEntry>,
}

impl RepoActivity {
    pub fn latest(&self) -> Option<DateTime<Utc>> {
        self.commits.iter().map(|c| c.timestamp).max()
    }
}

/// Commits grouped by repository, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    entries: Vec<RepoActivity>,
    index: HashMap<RepoKey, usize>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, repo: RepoKey, commits: Vec<CommitEntry>) {
        if commits.is_empty() {
            return;
        }
        match self.index.get(&repo) {
            Some(&i) => self.entries[i].commits.extend(commits),
            None => {
                self.index.insert(repo.clone(), self.entries.len());
                self.entries.push(RepoActivity { repo, commits });
            }
        }
    }

    pub fn into_entries(self) -> Vec<RepoActivity> {
        self.entries
    }
}
