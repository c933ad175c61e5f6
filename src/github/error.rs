//! Error types exposed by the GitHub gateway layer.

use thiserror::Error;

/// Errors surfaced while communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The requested pull request, user, or commit does not exist.
    #[error("{operation} for {target} failed: not found")]
    NotFound {
        /// Operation that was attempted (e.g. `pull request`).
        operation: String,
        /// Resource the operation targeted (e.g. `octo/repo#4`).
        target: String,
    },

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// Rate limit exceeded - the API returned 403/429 with a rate limit message.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Error message from GitHub.
        message: String,
    },

    /// GitHub rejected the request payload (HTTP 422).
    #[error("GitHub validation failed: {message}")]
    Validation {
        /// Validation message and error codes from GitHub.
        message: String,
    },

    /// GitHub returned any other API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response detail from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },
}

impl GatewayError {
    /// Returns true when the target resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true when GitHub reported that a label is already present.
    #[must_use]
    pub fn is_already_present(&self) -> bool {
        match self {
            Self::Validation { message } => {
                let lowered = message.to_lowercase();
                lowered.contains("already_exists") || lowered.contains("already exists")
            }
            _ => false,
        }
    }
}
