//! Webhook event payload for `pull_request` triggered runs.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;

use crate::error::GuardError;

/// The parts of a `pull_request` event payload the bot relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestEvent {
    /// Pull request number from the top-level `number` field.
    pub number: u64,
    /// Whether `pull_request.head.repo` is a fork. A deleted head
    /// repository counts as not forked.
    pub head_repository_fork: bool,
}

#[derive(Debug, Deserialize)]
struct ApiEvent {
    number: Option<u64>,
    pull_request: Option<ApiEventPullRequest>,
}

#[derive(Debug, Deserialize)]
struct ApiEventPullRequest {
    head: Option<ApiEventHead>,
}

#[derive(Debug, Deserialize)]
struct ApiEventHead {
    repo: Option<ApiEventRepository>,
}

#[derive(Debug, Deserialize)]
struct ApiEventRepository {
    #[serde(default)]
    fork: bool,
}

impl PullRequestEvent {
    /// Parses an event payload from its JSON text.
    ///
    /// Returns `Ok(None)` for payloads of other event types, which carry no
    /// `pull_request` object.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::EventPayload`] when the JSON is malformed or a
    /// pull request payload lacks a `number`.
    pub fn from_json(content: &str) -> Result<Option<Self>, GuardError> {
        let event: ApiEvent =
            serde_json::from_str(content).map_err(|error| GuardError::EventPayload {
                message: format!("failed to decode event data: {error}"),
            })?;

        let Some(pull_request) = event.pull_request else {
            return Ok(None);
        };
        let number = event.number.ok_or_else(|| GuardError::EventPayload {
            message: "pull request event has no number".to_owned(),
        })?;
        let head_repository_fork = pull_request
            .head
            .and_then(|head| head.repo)
            .is_some_and(|repo| repo.fork);

        Ok(Some(Self {
            number,
            head_repository_fork,
        }))
    }

    /// Reads and parses the event payload at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::EventPayload`] when the file cannot be read or
    /// parsed.
    pub fn read(path: &Utf8Path) -> Result<Option<Self>, GuardError> {
        let parent = path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = path.file_name().ok_or_else(|| GuardError::EventPayload {
            message: format!("invalid event path '{path}': no file name"),
        })?;

        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
            GuardError::EventPayload {
                message: format!("failed to open event directory '{parent}': {error}"),
            }
        })?;
        let content = dir
            .read_to_string(file_name)
            .map_err(|error| GuardError::EventPayload {
                message: format!("failed to read '{path}': {error}"),
            })?;

        Self::from_json(&content)
    }
}
