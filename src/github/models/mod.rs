//! Data models for pull requests, accounts, and repositories.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into public domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

const OPEN_STATE: &str = "open";

/// Pull request metadata needed for eligibility checks and classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestMetadata {
    /// Pull request number.
    pub number: u64,
    /// State (e.g. open, closed).
    pub state: Option<String>,
    /// Author login if present.
    pub author: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Lines added across the diff.
    pub additions: u64,
    /// Lines removed across the diff.
    pub deletions: u64,
    /// Names of the labels currently applied.
    pub labels: Vec<String>,
    /// Whether the head repository is a fork. `None` when the head
    /// repository has been deleted.
    pub head_repository_fork: Option<bool>,
}

impl PullRequestMetadata {
    /// Returns true when GitHub reports the pull request as open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.as_deref() == Some(OPEN_STATE)
    }

    /// Returns true when `label` is already applied, ignoring case as
    /// GitHub does for label names.
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(label))
    }
}

/// A file touched by a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Repository-relative path of the file.
    pub path: String,
}

/// GitHub account details for a pull request author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMetadata {
    /// Account login.
    pub login: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Repository entry from an account's repository listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySummary {
    /// Repository name.
    pub name: String,
    /// Whether the repository is a fork.
    pub fork: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequest {
    pub(crate) number: u64,
    pub(crate) state: Option<String>,
    pub(crate) user: Option<ApiUser>,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) additions: Option<u64>,
    pub(crate) deletions: Option<u64>,
    #[serde(default)]
    pub(crate) labels: Vec<ApiLabel>,
    pub(crate) head: Option<ApiBranch>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiLabel {
    pub(crate) name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiBranch {
    pub(crate) repo: Option<ApiRepository>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRepository {
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) fork: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiChangedFile {
    pub(crate) filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiAccount {
    pub(crate) login: String,
    pub(crate) created_at: DateTime<Utc>,
}

/// Pull request entry from the commit association listing.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequestSummary {
    pub(crate) number: u64,
    pub(crate) state: Option<String>,
}

impl ApiPullRequestSummary {
    pub(crate) fn is_open(&self) -> bool {
        self.state.as_deref() == Some(OPEN_STATE)
    }
}

impl From<ApiPullRequest> for PullRequestMetadata {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            number: value.number,
            state: value.state,
            author: value.user.and_then(|user| user.login),
            created_at: value.created_at,
            additions: value.additions.unwrap_or_default(),
            deletions: value.deletions.unwrap_or_default(),
            labels: value.labels.into_iter().map(|label| label.name).collect(),
            head_repository_fork: value
                .head
                .and_then(|head| head.repo)
                .map(|repo| repo.fork),
        }
    }
}

impl From<ApiChangedFile> for ChangedFile {
    fn from(value: ApiChangedFile) -> Self {
        Self {
            path: value.filename,
        }
    }
}

impl From<ApiAccount> for AccountMetadata {
    fn from(value: ApiAccount) -> Self {
        Self {
            login: value.login,
            created_at: value.created_at,
        }
    }
}

impl From<ApiRepository> for RepositorySummary {
    fn from(value: ApiRepository) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            fork: value.fork,
        }
    }
}
