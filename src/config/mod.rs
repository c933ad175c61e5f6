//! Run configuration loaded from CLI, environment, and files.
//!
//! [`SpamGuardConfig`] merges its sources with ortho-config's layered
//! approach, then [`SpamGuardConfig::resolve`] folds in the GitHub Actions
//! environment and validates everything once, producing an immutable
//! [`RunSettings`] for the rest of the run.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **GitHub Actions environment** – `INPUT_*` and `GITHUB_*` variables,
//!    consulted only for fields no other source sets
//! 2. **Defaults** – Built-in application defaults
//! 3. **Configuration file** – `.spamguard.toml` in the current directory,
//!    home directory, or XDG config directory
//! 4. **Environment variables** – `SPAMGUARD_TOKEN`, `SPAMGUARD_REPOSITORY`,
//!    and so on
//! 5. **Command-line arguments** – `--token`/`-t`, `--repository`/`-r`, ...
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! repository = "octocat/hello-world"
//! spam_label = "invalid"
//! close_on_spam = true
//! campaign_start = "2025-10-01T00:00:00Z"
//! trivial_change_threshold = 10
//! ```

use std::env;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::campaign::CampaignWindow;
use crate::classifier::{ClassifierSettings, DEFAULT_TRIVIAL_CHANGE_THRESHOLD};
use crate::error::GuardError;
use crate::github::event::PullRequestEvent;
use crate::github::locator::{PersonalAccessToken, PullRequestNumber, RepositorySlug};
use crate::guard::PullRequestSource;
use crate::moderation::{DEFAULT_SPAM_LABEL, ModerationAction};

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Value GitHub Actions inputs use for an enabled boolean.
const ACTION_INPUT_ENABLED: &str = "yes";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use spamguard::SpamGuardConfig;
///
/// let config = SpamGuardConfig::load().expect("failed to load configuration");
/// let settings = config.resolve().expect("configuration should be complete");
/// println!("moderating {}", settings.slug);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "SPAMGUARD",
    discovery(
        dotfile_name = ".spamguard.toml",
        config_file_name = "spamguard.toml",
        app_name = "spamguard"
    )
)]
pub struct SpamGuardConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `SPAMGUARD_TOKEN`, `INPUT_ACCESS_TOKEN`, or
    ///   `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Label applied to spam pull requests. Defaults to `Spam`.
    ///
    /// Can be provided via:
    /// - CLI: `--spam-label <LABEL>` or `-l <LABEL>`
    /// - Environment: `SPAMGUARD_SPAM_LABEL` or `INPUT_SPAM_LABEL`
    /// - Config file: `spam_label = "..."`
    #[ortho_config(cli_short = 'l')]
    pub spam_label: Option<String>,

    /// Closes spam pull requests after labelling them.
    ///
    /// Can be provided via:
    /// - CLI: `--close-on-spam` / `-c`
    /// - Environment: `INPUT_CLOSE_SPAM_PRS=yes`
    /// - Config file: `close_on_spam = true`
    ///
    /// Note: `SPAMGUARD_CLOSE_ON_SPAM` is not supported because
    /// `ortho_config` does not load boolean values from the environment.
    #[ortho_config(cli_short = 'c')]
    pub close_on_spam: bool,

    /// Logs the moderation steps without sending any mutation.
    ///
    /// Can be provided via:
    /// - CLI: `--dry-run` / `-n`
    /// - Environment: `INPUT_DRY_RUN=yes`
    /// - Config file: `dry_run = true`
    #[ortho_config(cli_short = 'n')]
    pub dry_run: bool,

    /// Repository in `owner/repo` form.
    ///
    /// Can be provided via:
    /// - CLI: `--repository <OWNER/REPO>` or `-r <OWNER/REPO>`
    /// - Environment: `SPAMGUARD_REPOSITORY` or `GITHUB_REPOSITORY`
    /// - Config file: `repository = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repository: Option<String>,

    /// Pull request number to evaluate.
    ///
    /// Can be provided via:
    /// - CLI: `--pr-number <N>` or `-p <N>`
    /// - Environment: `SPAMGUARD_PR_NUMBER` or `INPUT_PR_NUM`
    /// - Config file: `pr_number = 42`
    ///
    /// A non-numeric `INPUT_PR_NUM` is a configuration error; it does not
    /// fall back to `GITHUB_REF` or `GITHUB_SHA`.
    #[ortho_config(cli_short = 'p')]
    pub pr_number: Option<u64>,

    /// Git ref of the form `refs/pull/<N>/merge`.
    #[ortho_config()]
    pub git_ref: Option<String>,

    /// Commit SHA used to find the pull request when nothing else names it.
    #[ortho_config()]
    pub commit_sha: Option<String>,

    /// Path to a `pull_request` webhook payload.
    ///
    /// Can be provided via:
    /// - CLI: `--event-path <PATH>` or `-e <PATH>`
    /// - Environment: `SPAMGUARD_EVENT_PATH` or `GITHUB_EVENT_PATH`
    #[ortho_config(cli_short = 'e')]
    pub event_path: Option<String>,

    /// GitHub REST API base URL. Defaults to `https://api.github.com`.
    #[ortho_config()]
    pub api_url: Option<String>,

    /// Campaign start as an RFC 3339 timestamp.
    ///
    /// Defaults to October 1st 00:00 UTC of the current year, computed once
    /// when configuration is resolved.
    #[ortho_config()]
    pub campaign_start: Option<String>,

    /// Changes strictly smaller than this many lines are trivial.
    ///
    /// Defaults to 10. Zero is rejected.
    #[ortho_config()]
    pub trivial_change_threshold: u64,
}

impl Default for SpamGuardConfig {
    fn default() -> Self {
        Self {
            token: None,
            spam_label: None,
            close_on_spam: false,
            dry_run: false,
            repository: None,
            pr_number: None,
            git_ref: None,
            commit_sha: None,
            event_path: None,
            api_url: None,
            campaign_start: None,
            trivial_change_threshold: DEFAULT_TRIVIAL_CHANGE_THRESHOLD,
        }
    }
}

/// Variables a GitHub Actions runner exposes to the bot.
///
/// Blank values are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionEnvironment {
    /// `INPUT_ACCESS_TOKEN`.
    pub access_token: Option<String>,
    /// `GITHUB_TOKEN`.
    pub github_token: Option<String>,
    /// `INPUT_SPAM_LABEL`.
    pub spam_label: Option<String>,
    /// `INPUT_CLOSE_SPAM_PRS`.
    pub close_spam_prs: Option<String>,
    /// `INPUT_DRY_RUN`.
    pub dry_run: Option<String>,
    /// `INPUT_PR_NUM`.
    pub pr_number: Option<String>,
    /// `GITHUB_REPOSITORY`.
    pub repository: Option<String>,
    /// `GITHUB_REF`.
    pub git_ref: Option<String>,
    /// `GITHUB_SHA`.
    pub sha: Option<String>,
    /// `GITHUB_EVENT_PATH`.
    pub event_path: Option<String>,
    /// `GITHUB_API_URL`.
    pub api_url: Option<String>,
}

impl ActionEnvironment {
    /// Captures the Actions variables from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            access_token: non_blank_var("INPUT_ACCESS_TOKEN"),
            github_token: non_blank_var("GITHUB_TOKEN"),
            spam_label: non_blank_var("INPUT_SPAM_LABEL"),
            close_spam_prs: non_blank_var("INPUT_CLOSE_SPAM_PRS"),
            dry_run: non_blank_var("INPUT_DRY_RUN"),
            pr_number: non_blank_var("INPUT_PR_NUM"),
            repository: non_blank_var("GITHUB_REPOSITORY"),
            git_ref: non_blank_var("GITHUB_REF"),
            sha: non_blank_var("GITHUB_SHA"),
            event_path: non_blank_var("GITHUB_EVENT_PATH"),
            api_url: non_blank_var("GITHUB_API_URL"),
        }
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn is_enabled(input: Option<&String>) -> bool {
    input.is_some_and(|value| value.trim() == ACTION_INPUT_ENABLED)
}

/// Validated, immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Token used for every API call.
    pub token: PersonalAccessToken,
    /// Repository the pull request belongs to.
    pub slug: RepositorySlug,
    /// Where the pull request number comes from.
    pub source: PullRequestSource,
    /// What to do with a spam pull request.
    pub action: ModerationAction,
    /// Classifier inputs.
    pub classifier: ClassifierSettings,
    /// GitHub REST API base URL.
    pub api_base: Url,
}

impl SpamGuardConfig {
    /// Resolves settings against the process environment and the current
    /// time.
    ///
    /// # Errors
    ///
    /// See [`SpamGuardConfig::resolve_with`].
    pub fn resolve(&self) -> Result<RunSettings, GuardError> {
        self.resolve_with(&ActionEnvironment::from_env(), Utc::now())
    }

    /// Resolves settings against an explicit Actions environment and clock
    /// reading.
    ///
    /// `now` is only used to pick the default campaign year.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::MissingToken`] without a token,
    /// [`GuardError::InvalidRepository`] for a malformed repository,
    /// [`GuardError::EventPayload`] for an unreadable event file, and
    /// [`GuardError::Configuration`] for any other missing or malformed
    /// value.
    pub fn resolve_with(
        &self,
        actions: &ActionEnvironment,
        now: DateTime<Utc>,
    ) -> Result<RunSettings, GuardError> {
        let token = self
            .token
            .as_ref()
            .or(actions.access_token.as_ref())
            .or(actions.github_token.as_ref())
            .ok_or(GuardError::MissingToken)
            .and_then(PersonalAccessToken::new)?;

        let repository = self
            .repository
            .as_ref()
            .or(actions.repository.as_ref())
            .ok_or_else(|| GuardError::Configuration {
                message: "repository is required (use --repository or -r)".to_owned(),
            })?;
        let slug = RepositorySlug::parse(repository)?;

        let source = self.pull_request_source(actions)?;

        let action = ModerationAction {
            label: self
                .spam_label
                .clone()
                .or_else(|| actions.spam_label.clone())
                .unwrap_or_else(|| DEFAULT_SPAM_LABEL.to_owned()),
            close_on_spam: self.close_on_spam || is_enabled(actions.close_spam_prs.as_ref()),
            dry_run: self.dry_run || is_enabled(actions.dry_run.as_ref()),
        };

        let campaign = self.campaign_start.as_deref().map_or_else(
            || CampaignWindow::hacktoberfest_of(now),
            CampaignWindow::parse,
        )?;
        if self.trivial_change_threshold == 0 {
            return Err(GuardError::Configuration {
                message: "trivial_change_threshold must be positive".to_owned(),
            });
        }
        let classifier = ClassifierSettings::new(campaign)
            .with_trivial_change_threshold(self.trivial_change_threshold);

        let api_url = self
            .api_url
            .as_deref()
            .or(actions.api_url.as_deref())
            .unwrap_or(DEFAULT_API_URL);
        let api_base = Url::parse(api_url).map_err(|error| GuardError::Configuration {
            message: format!("invalid API URL {api_url:?}: {error}"),
        })?;

        Ok(RunSettings {
            token,
            slug,
            source,
            action,
            classifier,
            api_base,
        })
    }

    fn pull_request_source(
        &self,
        actions: &ActionEnvironment,
    ) -> Result<PullRequestSource, GuardError> {
        let event_path = self.event_path.as_ref().or(actions.event_path.as_ref());
        if let Some(path) = event_path {
            if let Some(event) = PullRequestEvent::read(&Utf8PathBuf::from(path))? {
                return Ok(PullRequestSource::Event(event));
            }
            tracing::debug!(%path, "event payload is not a pull request event");
        }

        if let Some(number) = self.explicit_number(actions)? {
            return Ok(PullRequestSource::Number(number));
        }

        let sha = self.commit_sha.clone().or_else(|| actions.sha.clone());
        if let Some(git_ref) = self.git_ref.clone().or_else(|| actions.git_ref.clone()) {
            return Ok(PullRequestSource::MergeRef {
                git_ref,
                fallback_sha: sha,
            });
        }

        sha.map(|sha| PullRequestSource::Commit { sha })
            .ok_or_else(|| GuardError::Configuration {
                message: "no event payload, pull request number, ref, or commit configured"
                    .to_owned(),
            })
    }

    fn explicit_number(
        &self,
        actions: &ActionEnvironment,
    ) -> Result<Option<PullRequestNumber>, GuardError> {
        if let Some(number) = self.pr_number {
            return PullRequestNumber::new(number).map(Some);
        }

        actions
            .pr_number
            .as_deref()
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|error| GuardError::Configuration {
                        message: format!("INPUT_PR_NUM {raw:?} is not a number: {error}"),
                    })
                    .and_then(PullRequestNumber::new)
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests;
