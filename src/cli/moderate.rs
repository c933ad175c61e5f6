//! Evaluates the configured pull request and moderates it when it is spam.

use ortho_config::OrthoConfig;
use spamguard::{
    GuardError, OctocrabGateway, PullRequestLocator, RunOutcome, RunSettings, SpamGuard,
    SpamGuardConfig,
};

use super::output::write_outcome;

/// Runs one evaluation using configuration from every source.
///
/// # Errors
///
/// Returns [`GuardError`] when configuration is incomplete, the pull request
/// cannot be resolved, or signal gathering fails.
pub async fn run() -> Result<RunOutcome, GuardError> {
    let config = load_config()?;
    let settings = config.resolve()?;
    tracing::debug!(repository = %settings.slug, source = ?settings.source, "resolved settings");
    run_with(&settings).await
}

/// Runs one evaluation with already resolved settings.
///
/// # Errors
///
/// See [`run`].
pub async fn run_with(settings: &RunSettings) -> Result<RunOutcome, GuardError> {
    let gateway = OctocrabGateway::for_token(&settings.token, &settings.api_base)?;
    let number = settings.source.resolve(&settings.slug, &gateway).await?;
    let locator = PullRequestLocator::new(settings.slug.clone(), number);

    let guard = SpamGuard::new(
        &gateway,
        &gateway,
        &gateway,
        settings.classifier,
        settings.action.clone(),
    );
    let outcome = guard
        .evaluate(&locator, settings.source.event_fork())
        .await?;

    write_outcome(&locator, &outcome)?;
    Ok(outcome)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`GuardError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<SpamGuardConfig, GuardError> {
    SpamGuardConfig::load().map_err(|error| GuardError::Configuration {
        message: error.to_string(),
    })
}
