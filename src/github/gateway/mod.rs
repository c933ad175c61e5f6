//! Gateways for reading pull request signals and applying moderation
//! through Octocrab.
//!
//! Each concern is a trait so the gatherer, moderator, and orchestrator can
//! be exercised with mocks while [`OctocrabGateway`] handles real HTTP
//! requests.

mod client;
mod error_mapping;
mod octocrab_impl;


pub use octocrab_impl::OctocrabGateway;

use async_trait::async_trait;

use crate::github::error::GatewayError;
use crate::github::locator::{PullRequestLocator, RepositorySlug};
use crate::github::models::{
    AccountMetadata, ChangedFile, PullRequestMetadata, RepositorySummary,
};

/// Gateway that can load pull request data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Fetch the pull request metadata, including diff statistics.
    async fn pull_request(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestMetadata, GatewayError>;

    /// Fetch every changed file, following pagination to the last page.
    async fn changed_files(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<ChangedFile>, GatewayError>;

    /// List the numbers of open pull requests that contain `sha`.
    async fn open_pull_requests_for_commit(
        &self,
        slug: &RepositorySlug,
        sha: &str,
    ) -> Result<Vec<u64>, GatewayError>;
}

/// Gateway for account-level lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// Fetch account metadata by login.
    async fn account(&self, login: &str) -> Result<AccountMetadata, GatewayError>;

    /// List every repository owned by `login`, following pagination to the
    /// last page.
    async fn repositories(&self, login: &str) -> Result<Vec<RepositorySummary>, GatewayError>;
}

/// Gateway for the mutations a spam verdict triggers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModerationGateway: Send + Sync {
    /// Add `label` to the pull request's label set.
    async fn add_label(
        &self,
        locator: &PullRequestLocator,
        label: &str,
    ) -> Result<(), GatewayError>;

    /// Transition the pull request to the closed state.
    async fn close_pull_request(&self, locator: &PullRequestLocator) -> Result<(), GatewayError>;
}
