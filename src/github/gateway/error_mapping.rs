//! Error mapping helpers for the Octocrab GitHub gateway.

use http::StatusCode;

use crate::github::error::GatewayError;

/// Checks if a GitHub error status indicates an authentication failure.
const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether the GitHub error represents a rate limit error based on the
/// HTTP status and message / documentation URL content.
fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

/// Joins the validation error codes GitHub attaches to 422 responses.
fn validation_detail(source: &octocrab::GitHubError) -> String {
    let codes: Vec<String> = source
        .errors
        .iter()
        .flatten()
        .map(|entry| {
            entry
                .get("code")
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| entry.to_string(), ToOwned::to_owned)
        })
        .collect();

    if codes.is_empty() {
        source.message.clone()
    } else {
        format!("{} ({})", source.message, codes.join(", "))
    }
}

pub(super) fn map_octocrab_error(
    operation: &str,
    target: &str,
    error: &octocrab::Error,
) -> GatewayError {
    if let octocrab::Error::GitHub { source, .. } = error {
        let status = source.status_code;
        return if status == StatusCode::NOT_FOUND {
            GatewayError::NotFound {
                operation: operation.to_owned(),
                target: target.to_owned(),
            }
        } else if is_rate_limit_error(source) {
            GatewayError::RateLimitExceeded {
                message: format!(
                    "{operation} for {target} failed: {message}",
                    message = source.message
                ),
            }
        } else if is_auth_failure(status) {
            GatewayError::Authentication {
                message: format!(
                    "{operation} for {target} failed: GitHub returned {status} {message}",
                    message = source.message
                ),
            }
        } else if status == StatusCode::UNPROCESSABLE_ENTITY {
            GatewayError::Validation {
                message: format!(
                    "{operation} for {target} failed: {detail}",
                    detail = validation_detail(source)
                ),
            }
        } else {
            GatewayError::Api {
                message: format!(
                    "{operation} for {target} failed with status {status}: {message}",
                    message = source.message
                ),
            }
        };
    }

    if is_network_error(error) {
        return GatewayError::Network {
            message: format!("{operation} for {target} failed: {error}"),
        };
    }

    GatewayError::Api {
        message: format!("{operation} for {target} failed: {error}"),
    }
}
