//! Errors that abort a moderation run.

use thiserror::Error;

use crate::github::GatewayError;

/// Coarse classification of a run failure, used for logging and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed configuration, detected before any remote call.
    Configuration,
    /// The referenced pull request, user, or commit does not resolve.
    NotFound,
    /// Network failure, rate limiting, or an unexpected API response.
    Transient,
}

/// Errors surfaced while resolving configuration or gathering signals.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// No access token was supplied by any configuration source.
    #[error("access token is required")]
    MissingToken,

    /// The repository identifier is not of the form `owner/repo`.
    #[error("invalid repository name {value:?}: expected owner/repo")]
    InvalidRepository {
        /// The rejected identifier.
        value: String,
    },

    /// A `refs/pull/<N>/merge` reference did not carry an integer.
    #[error("invalid pull request ref {value:?}")]
    InvalidPullRequestRef {
        /// The rejected reference.
        value: String,
    },

    /// The pull request number is zero or otherwise unusable.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// The webhook event payload could not be read or decoded.
    #[error("failed to read event data: {message}")]
    EventPayload {
        /// Error detail from reading or parsing the payload.
        message: String,
    },

    /// No open pull request contains the commit used as a fallback.
    #[error("could not find an open pull request containing {sha}")]
    NoOpenPullRequestForCommit {
        /// Commit SHA that was searched for.
        sha: String,
    },

    /// Writing run output failed.
    #[error("failed to write output: {message}")]
    Io {
        /// Error detail from the writer.
        message: String,
    },

    /// A GitHub API call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl GuardError {
    /// Classifies the error for reporting.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. }
            | Self::MissingToken
            | Self::InvalidRepository { .. }
            | Self::InvalidPullRequestRef { .. }
            | Self::InvalidPullRequestNumber
            | Self::EventPayload { .. } => ErrorKind::Configuration,
            Self::NoOpenPullRequestForCommit { .. } => ErrorKind::NotFound,
            Self::Io { .. } => ErrorKind::Transient,
            Self::Gateway(source) => {
                if source.is_not_found() {
                    ErrorKind::NotFound
                } else {
                    ErrorKind::Transient
                }
            }
        }
    }
}
