//! GitHub identities, payloads, and API gateways.
//!
//! This module wraps Octocrab to read pull request, account, and repository
//! data and to apply labels and state changes. Errors are mapped into
//! [`GatewayError`] variants so that callers can distinguish missing
//! resources from transient failures without exposing Octocrab internals.

pub mod error;
pub mod event;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::GatewayError;
pub use event::PullRequestEvent;
pub use gateway::{AccountGateway, ModerationGateway, OctocrabGateway, PullRequestGateway};
pub use locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName, RepositoryOwner,
    RepositorySlug,
};
pub use models::{AccountMetadata, ChangedFile, PullRequestMetadata, RepositorySummary};

#[cfg(test)]
pub use gateway::{MockAccountGateway, MockModerationGateway, MockPullRequestGateway};

#[cfg(test)]
mod tests;
