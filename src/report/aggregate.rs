use crate::model::{Aggregate, RepoActivity};
use std::cmp::Reverse;

/// Orders repositories newest-first by their latest commit, and commits
/// newest-first within each repository. Ties keep first-seen order.
pub fn sort_activity(aggregate: Aggregate) -> Vec<RepoActivity> {
    let mut entries = aggregate.into_entries();

    for entry in &mut entries {
        entry.commits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }
    entries.sort_by_cached_key(|e| Reverse(e.latest()));

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommitEntry, RepoKey};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn commit(day: u32, hour: u32, msg: &str) -> CommitEntry {
        CommitEntry {
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap(),
            message: msg.to_string(),
            url: format!("https://example.com/{msg}"),
        }
    }

    fn names(entries: &[RepoActivity]) -> Vec<&str> {
        entries.iter().map(|e| e.repo.full_name.as_str()).collect()
    }

    #[test]
    fn repositories_sorted_by_latest_commit_descending() {
        let mut agg = Aggregate::new();
        agg.extend(RepoKey::new("old/one", false), vec![commit(1, 9, "a"), commit(2, 9, "b")]);
        agg.extend(RepoKey::new("new/one", true), vec![commit(1, 8, "c"), commit(5, 9, "d")]);
        agg.extend(RepoKey::new("mid/one", false), vec![commit(3, 9, "e")]);

        let sorted = sort_activity(agg);
        assert_eq!(names(&sorted), vec!["new/one", "mid/one", "old/one"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut agg = Aggregate::new();
        agg.extend(RepoKey::new("first/x", false), vec![commit(4, 12, "a")]);
        agg.extend(RepoKey::new("second/x", false), vec![commit(4, 12, "b")]);
        agg.extend(RepoKey::new("third/x", false), vec![commit(4, 12, "c")]);

        let sorted = sort_activity(agg);
        assert_eq!(names(&sorted), vec!["first/x", "second/x", "third/x"]);
    }

    #[test]
    fn commits_sorted_descending_within_repository() {
        let mut agg = Aggregate::new();
        agg.extend(
            RepoKey::new("a/b", false),
            vec![commit(1, 9, "init"), commit(3, 9, "third"), commit(2, 10, "fix")],
        );

        let sorted = sort_activity(agg);
        let messages: Vec<_> = sorted[0].commits.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, vec!["third", "fix", "init"]);
    }
}
