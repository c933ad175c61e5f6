//! Signal gathering for a single pull request and its author.
//!
//! The gatherer reads the pull request's diff statistics and changed files,
//! the author's account, and the author's full repository listing. Every
//! listing is paginated to completion by the gateway: a partial repository
//! page would undercount forks and silently change the verdict.

use chrono::{DateTime, Utc};

use crate::error::GuardError;
use crate::github::gateway::{AccountGateway, PullRequestGateway};
use crate::github::locator::PullRequestLocator;
use crate::github::models::{
    AccountMetadata, ChangedFile, PullRequestMetadata, RepositorySummary,
};
use crate::github::GatewayError;

/// Path suffix that marks a file as documentation.
pub const DOCUMENTATION_SUFFIX: &str = ".md";

/// Facts about the pull request under evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    /// Repository and number of the pull request.
    pub locator: PullRequestLocator,
    /// Author login.
    pub author: String,
    /// Creation timestamp, when GitHub reports one.
    pub created_at: Option<DateTime<Utc>>,
    /// Lines added across the diff.
    pub additions: u64,
    /// Lines removed across the diff.
    pub deletions: u64,
    /// Every file the pull request touches.
    pub changed_files: Vec<ChangedFile>,
    /// Whether the head repository is a fork.
    pub head_repository_fork: bool,
}

impl PullRequestContext {
    /// Number of files the pull request touches.
    #[must_use]
    pub fn changed_file_count(&self) -> usize {
        self.changed_files.len()
    }

    /// Total lines changed in either direction.
    #[must_use]
    pub const fn change_size(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }

    /// True when every changed file is documentation. Vacuously true for an
    /// empty file list.
    #[must_use]
    pub fn is_docs_only(&self) -> bool {
        self.changed_files
            .iter()
            .all(|file| file.path.ends_with(DOCUMENTATION_SUFFIX))
    }
}

/// Account provenance of the pull request author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorProfile {
    /// Account login.
    pub login: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Number of repositories the account owns.
    pub repository_count: usize,
    /// Number of those repositories that are forks.
    pub fork_count: usize,
}

impl AuthorProfile {
    /// Builds a profile from account metadata and the complete repository
    /// listing.
    #[must_use]
    pub fn from_repositories(account: AccountMetadata, repositories: &[RepositorySummary]) -> Self {
        Self {
            login: account.login,
            created_at: account.created_at,
            repository_count: repositories.len(),
            fork_count: repositories.iter().filter(|repo| repo.fork).count(),
        }
    }

    /// True when the account owns no original repository. An account with
    /// no repositories at all qualifies.
    #[must_use]
    pub const fn has_only_forks(&self) -> bool {
        self.repository_count == self.fork_count
    }
}

/// Names of the repositories in `repositories` that are not forks.
pub(crate) fn original_repository_names(repositories: &[RepositorySummary]) -> Vec<&str> {
    repositories
        .iter()
        .filter(|repo| !repo.fork)
        .map(|repo| repo.name.as_str())
        .collect()
}

/// Everything the classifier needs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signals {
    /// Pull request facts.
    pub pull_request: PullRequestContext,
    /// Author facts.
    pub author: AuthorProfile,
}

/// Collects [`Signals`] through the pull request and account gateways.
pub struct SignalGatherer<'client, Pulls, Accounts>
where
    Pulls: PullRequestGateway,
    Accounts: AccountGateway,
{
    pulls: &'client Pulls,
    accounts: &'client Accounts,
}

impl<'client, Pulls, Accounts> SignalGatherer<'client, Pulls, Accounts>
where
    Pulls: PullRequestGateway,
    Accounts: AccountGateway,
{
    /// Create a gatherer over the provided gateways.
    #[must_use]
    pub const fn new(pulls: &'client Pulls, accounts: &'client Accounts) -> Self {
        Self { pulls, accounts }
    }

    /// Borrow the pull request gateway.
    #[must_use]
    pub const fn pulls(&self) -> &'client Pulls {
        self.pulls
    }

    /// Fetch the pull request and gather its signals.
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure; no partial signals are returned.
    pub async fn gather(&self, locator: &PullRequestLocator) -> Result<Signals, GuardError> {
        let metadata = self.pulls.pull_request(locator).await?;
        self.gather_from(locator, metadata).await
    }

    /// Gather signals for a pull request whose metadata is already loaded.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the pull request has no
    /// author, and propagates any gateway failure.
    pub async fn gather_from(
        &self,
        locator: &PullRequestLocator,
        metadata: PullRequestMetadata,
    ) -> Result<Signals, GuardError> {
        let login = metadata.author.ok_or_else(|| GatewayError::NotFound {
            operation: "pull request author".to_owned(),
            target: locator.to_string(),
        })?;

        let changed_files = self.pulls.changed_files(locator).await?;
        let account = self.accounts.account(&login).await?;
        let repositories = self.accounts.repositories(&login).await?;
        let author = AuthorProfile::from_repositories(account, &repositories);

        tracing::debug!(
            target_pr = %locator,
            author = %author.login,
            repositories = author.repository_count,
            forks = author.fork_count,
            originals = ?original_repository_names(&repositories),
            files = changed_files.len(),
            "gathered signals"
        );

        Ok(Signals {
            pull_request: PullRequestContext {
                locator: locator.clone(),
                author: login,
                created_at: metadata.created_at,
                additions: metadata.additions,
                deletions: metadata.deletions,
                changed_files,
                head_repository_fork: metadata.head_repository_fork.unwrap_or(false),
            },
            author,
        })
    }
}
