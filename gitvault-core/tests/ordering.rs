//! Ordering and identity invariants of `RepositorySet`.
//!
//! Each `#[case]` is isolated — no shared state.

use chrono::{DateTime, TimeZone, Utc};
use gitvault_core::types::{RepoId, RepositoryRecord, RepositorySet};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ts(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, minute, 0).unwrap()
}

fn record(id: u64, name: &str, updated_at: Option<DateTime<Utc>>) -> RepositoryRecord {
    RepositoryRecord {
        id: RepoId(id),
        name: name.to_string(),
        full_name: format!("octocat/{name}"),
        private: false,
        owner_login: "octocat".to_string(),
        html_url: format!("https://github.com/octocat/{name}"),
        clone_url: format!("https://github.com/octocat/{name}.git"),
        created_at: updated_at,
        updated_at,
        pushed_at: updated_at,
        description: None,
    }
}

fn names(set: &RepositorySet) -> Vec<&str> {
    set.iter().map(|r| r.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Cases
// ---------------------------------------------------------------------------

#[test]
fn sorts_descending_by_updated_at() {
    let set = RepositorySet::from_fetched(vec![
        record(1, "oldest", Some(ts(1))),
        record(2, "newest", Some(ts(30))),
        record(3, "middle", Some(ts(15))),
    ]);
    assert_eq!(names(&set), vec!["newest", "middle", "oldest"]);
}

#[test]
fn equal_timestamps_preserve_fetch_order() {
    let set = RepositorySet::from_fetched(vec![
        record(1, "first", Some(ts(5))),
        record(2, "second", Some(ts(5))),
        record(3, "third", Some(ts(5))),
    ]);
    assert_eq!(names(&set), vec!["first", "second", "third"]);
}

#[test]
fn missing_update_timestamp_sorts_last() {
    let set = RepositorySet::from_fetched(vec![
        record(1, "untouched", None),
        record(2, "recent", Some(ts(10))),
    ]);
    assert_eq!(names(&set), vec!["recent", "untouched"]);
}

#[test]
fn duplicate_ids_keep_first_occurrence() {
    let set = RepositorySet::from_fetched(vec![
        record(7, "kept", Some(ts(1))),
        record(7, "dropped", Some(ts(20))),
        record(8, "other", Some(ts(2))),
    ]);
    assert_eq!(set.len(), 2);
    assert_eq!(names(&set), vec!["other", "kept"]);
}

#[rstest]
#[case(vec![], 0)]
#[case(vec![1], 1)]
#[case(vec![1, 2, 3], 3)]
#[case(vec![1, 1, 2], 2)]
fn len_counts_unique_ids(#[case] ids: Vec<u64>, #[case] expected: usize) {
    let records = ids
        .into_iter()
        .map(|id| record(id, &format!("repo-{id}"), Some(ts(0))))
        .collect();
    let set = RepositorySet::from_fetched(records);
    assert_eq!(set.len(), expected);
    assert_eq!(set.is_empty(), expected == 0);
}

#[test]
fn record_serde_roundtrip() {
    let original = record(42, "hello-world", Some(ts(3)));
    let json = serde_json::to_string(&original).expect("serialize");
    let back: RepositoryRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(original, back);
}
