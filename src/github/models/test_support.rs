//! JSON fixtures mirroring GitHub REST API responses.
//!
//! These builders keep mock server setups in unit and behavioural tests
//! consistent with the fields the gateway actually reads.
//!
//! # Examples
//!
//! ```
//! use spamguard::github::models::test_support::{changed_files_json, repositories_json};
//!
//! let files = changed_files_json(&["README.md"]);
//! assert_eq!(files[0]["filename"], "README.md");
//!
//! let repos = repositories_json(&[("fork-a", true), ("tool", false)]);
//! assert_eq!(repos.as_array().map(Vec::len), Some(2));
//! ```

use serde_json::{Value, json};

/// Builds an open pull request body with diff statistics and head fork flag.
#[must_use]
pub fn pull_request_json(
    number: u64,
    author: &str,
    additions: u64,
    deletions: u64,
    head_fork: bool,
) -> Value {
    json!({
        "number": number,
        "state": "open",
        "html_url": format!("https://github.com/owner/repo/pull/{number}"),
        "user": { "login": author },
        "created_at": "2025-10-02T12:00:00Z",
        "additions": additions,
        "deletions": deletions,
        "labels": [],
        "head": { "repo": { "name": "repo", "fork": head_fork } }
    })
}

/// Builds a user account body with the given creation timestamp (RFC 3339).
#[must_use]
pub fn account_json(login: &str, created_at: &str) -> Value {
    json!({
        "login": login,
        "type": "User",
        "created_at": created_at
    })
}

/// Builds a repository listing from `(name, fork)` pairs.
#[must_use]
pub fn repositories_json(repositories: &[(&str, bool)]) -> Value {
    Value::Array(
        repositories
            .iter()
            .map(|(name, fork)| json!({ "name": name, "fork": fork }))
            .collect(),
    )
}

/// Builds a changed-file listing from file paths.
#[must_use]
pub fn changed_files_json(paths: &[&str]) -> Value {
    Value::Array(
        paths
            .iter()
            .map(|path| json!({ "filename": path, "status": "modified" }))
            .collect(),
    )
}
