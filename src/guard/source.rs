//! Resolution of the pull request number a run evaluates.

use crate::error::GuardError;
use crate::github::event::PullRequestEvent;
use crate::github::gateway::PullRequestGateway;
use crate::github::locator::{PullRequestNumber, RepositorySlug};

/// Where the pull request number comes from, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequestSource {
    /// A `pull_request` webhook payload.
    Event(PullRequestEvent),
    /// An explicitly configured number.
    Number(PullRequestNumber),
    /// A `refs/pull/<N>/merge` reference, with an optional commit to fall
    /// back on when the reference is malformed.
    MergeRef {
        /// The reference as configured.
        git_ref: String,
        /// Commit searched when the reference does not parse.
        fallback_sha: Option<String>,
    },
    /// A commit contained in the pull request.
    Commit {
        /// Commit SHA.
        sha: String,
    },
}

impl PullRequestSource {
    /// Head fork flag reported by the event payload, when there is one.
    #[must_use]
    pub const fn event_fork(&self) -> Option<bool> {
        match self {
            Self::Event(event) => Some(event.head_repository_fork),
            _ => None,
        }
    }

    /// Resolves the pull request number, querying GitHub only for the
    /// commit fallback.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::InvalidPullRequestRef`] for a malformed
    /// reference with no fallback commit,
    /// [`GuardError::NoOpenPullRequestForCommit`] when the commit belongs to
    /// no open pull request, and propagates gateway failures.
    pub async fn resolve<Pulls>(
        &self,
        slug: &RepositorySlug,
        pulls: &Pulls,
    ) -> Result<PullRequestNumber, GuardError>
    where
        Pulls: PullRequestGateway,
    {
        match self {
            Self::Event(event) => PullRequestNumber::new(event.number),
            Self::Number(number) => Ok(*number),
            Self::MergeRef {
                git_ref,
                fallback_sha,
            } => match (PullRequestNumber::from_merge_ref(git_ref), fallback_sha) {
                (Ok(number), _) => Ok(number),
                (Err(error), Some(sha)) => {
                    tracing::warn!(%git_ref, %error, %sha, "falling back to commit lookup");
                    find_by_commit(slug, sha, pulls).await
                }
                (Err(error), None) => Err(error),
            },
            Self::Commit { sha } => find_by_commit(slug, sha, pulls).await,
        }
    }
}

async fn find_by_commit<Pulls>(
    slug: &RepositorySlug,
    sha: &str,
    pulls: &Pulls,
) -> Result<PullRequestNumber, GuardError>
where
    Pulls: PullRequestGateway,
{
    let candidates = pulls.open_pull_requests_for_commit(slug, sha).await?;
    let first = candidates
        .into_iter()
        .next()
        .ok_or_else(|| GuardError::NoOpenPullRequestForCommit {
            sha: sha.to_owned(),
        })?;
    tracing::debug!(%slug, %sha, number = first, "resolved pull request from commit");
    PullRequestNumber::new(first)
}
