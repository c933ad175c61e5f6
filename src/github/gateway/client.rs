//! Octocrab client construction helpers for gateway implementations.

use http::Uri;
use octocrab::Octocrab;
use url::Url;

use crate::github::error::GatewayError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the given token and API base URL.
///
/// # Errors
///
/// Returns `GatewayError::Api` when the base URI cannot be parsed or
/// Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &Url,
) -> Result<Octocrab, GatewayError> {
    let base_uri: Uri = api_base
        .as_str()
        .parse::<Uri>()
        .map_err(|error| GatewayError::Api {
            message: format!("invalid API base URL {api_base}: {error}"),
        })?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| GatewayError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", api_base.as_str(), &error))
}
