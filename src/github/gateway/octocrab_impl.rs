//! Octocrab implementation of the GitHub gateways.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;

use crate::github::error::GatewayError;
use crate::github::locator::{PersonalAccessToken, PullRequestLocator, RepositorySlug};
use crate::github::models::{
    AccountMetadata, ApiAccount, ApiChangedFile, ApiPullRequest, ApiPullRequestSummary,
    ApiRepository, ChangedFile, PullRequestMetadata, RepositorySummary,
};

use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;
use super::{AccountGateway, ModerationGateway, PullRequestGateway};

const PER_PAGE: &str = "100";

/// Octocrab-backed gateway implementing every GitHub concern of a run.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and API base URL.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Api` when the base URI cannot be parsed or
    /// Octocrab fails to construct a client.
    pub fn for_token(token: &PersonalAccessToken, api_base: &Url) -> Result<Self, GatewayError> {
        let octocrab = build_octocrab_client(token, api_base)?;
        Ok(Self::new(octocrab))
    }

    /// Fetches the first page at `path` and follows `Link: rel="next"` until
    /// the listing is exhausted.
    async fn fetch_all<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        operation: &str,
        target: &str,
    ) -> Result<Vec<T>, GatewayError>
    where
        T: DeserializeOwned,
    {
        let first_page = self
            .client
            .get::<Page<T>, _, _>(path, Some(query))
            .await
            .map_err(|error| map_octocrab_error(operation, target, &error))?;

        self.client
            .all_pages(first_page)
            .await
            .map_err(|error| map_octocrab_error(operation, target, &error))
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn pull_request(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestMetadata, GatewayError> {
        self.client
            .get::<ApiPullRequest, _, _>(locator.pull_request_path(), None::<&()>)
            .await
            .map(ApiPullRequest::into)
            .map_err(|error| map_octocrab_error("pull request", &locator.to_string(), &error))
    }

    async fn changed_files(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<ChangedFile>, GatewayError> {
        let files: Vec<ApiChangedFile> = self
            .fetch_all(
                &locator.files_path(),
                &[("per_page", PER_PAGE)],
                "changed files",
                &locator.to_string(),
            )
            .await?;

        Ok(files.into_iter().map(ApiChangedFile::into).collect())
    }

    async fn open_pull_requests_for_commit(
        &self,
        slug: &RepositorySlug,
        sha: &str,
    ) -> Result<Vec<u64>, GatewayError> {
        let pulls: Vec<ApiPullRequestSummary> = self
            .fetch_all(
                &slug.commit_pulls_path(sha),
                &[("per_page", PER_PAGE)],
                "pull requests for commit",
                &format!("{slug}@{sha}"),
            )
            .await?;

        Ok(pulls
            .into_iter()
            .filter(ApiPullRequestSummary::is_open)
            .map(|pull| pull.number)
            .collect())
    }
}

#[async_trait]
impl AccountGateway for OctocrabGateway {
    async fn account(&self, login: &str) -> Result<AccountMetadata, GatewayError> {
        self.client
            .get::<ApiAccount, _, _>(format!("/users/{login}"), None::<&()>)
            .await
            .map(ApiAccount::into)
            .map_err(|error| map_octocrab_error("user", login, &error))
    }

    async fn repositories(&self, login: &str) -> Result<Vec<RepositorySummary>, GatewayError> {
        let repositories: Vec<ApiRepository> = self
            .fetch_all(
                &format!("/users/{login}/repos"),
                &[("type", "owner"), ("per_page", PER_PAGE)],
                "user repositories",
                login,
            )
            .await?;

        Ok(repositories.into_iter().map(ApiRepository::into).collect())
    }
}

#[async_trait]
impl ModerationGateway for OctocrabGateway {
    async fn add_label(
        &self,
        locator: &PullRequestLocator,
        label: &str,
    ) -> Result<(), GatewayError> {
        let body = json!({ "labels": [label] });
        let _labels: Value = self
            .client
            .post(locator.labels_path(), Some(&body))
            .await
            .map_err(|error| map_octocrab_error("add label", &locator.to_string(), &error))?;
        Ok(())
    }

    async fn close_pull_request(&self, locator: &PullRequestLocator) -> Result<(), GatewayError> {
        let body = json!({ "state": "closed" });
        let _pull_request: Value = self
            .client
            .patch(locator.pull_request_path(), Some(&body))
            .await
            .map_err(|error| {
                map_octocrab_error("close pull request", &locator.to_string(), &error)
            })?;
        Ok(())
    }
}
