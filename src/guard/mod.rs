//! Run orchestration: eligibility gate, signal gathering, classification,
//! and moderation for one pull request.

mod source;


pub use source::PullRequestSource;

use std::fmt;

use crate::classifier::{ClassifierSettings, SpamReason, Verdict, classify};
use crate::error::GuardError;
use crate::github::gateway::{AccountGateway, ModerationGateway, PullRequestGateway};
use crate::github::locator::PullRequestLocator;
use crate::moderation::{ModerationAction, ModerationReport, Moderator};
use crate::signals::SignalGatherer;

/// Why a pull request was not evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneligibleReason {
    /// The head repository is not a fork.
    NotFromFork,
    /// The pull request is closed or merged.
    NotOpen,
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFromFork => f.write_str("pull request is not from a fork"),
            Self::NotOpen => f.write_str("pull request is not open"),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The pull request was skipped before classification.
    Ineligible(IneligibleReason),
    /// The pull request was classified as not spam.
    Clean,
    /// The pull request was classified as spam and moderation was attempted.
    SpamDetected {
        /// Rule that matched.
        reason: SpamReason,
        /// Per-step moderation outcomes.
        report: ModerationReport,
    },
}

/// Wires gathering, classification, and moderation together.
pub struct SpamGuard<'client, Pulls, Accounts, Moderation>
where
    Pulls: PullRequestGateway,
    Accounts: AccountGateway,
    Moderation: ModerationGateway,
{
    gatherer: SignalGatherer<'client, Pulls, Accounts>,
    moderator: Moderator<'client, Moderation>,
    classifier: ClassifierSettings,
    action: ModerationAction,
}

impl<'client, Pulls, Accounts, Moderation> SpamGuard<'client, Pulls, Accounts, Moderation>
where
    Pulls: PullRequestGateway,
    Accounts: AccountGateway,
    Moderation: ModerationGateway,
{
    /// Creates a guard over the provided gateways and resolved settings.
    #[must_use]
    pub const fn new(
        pulls: &'client Pulls,
        accounts: &'client Accounts,
        moderation: &'client Moderation,
        classifier: ClassifierSettings,
        action: ModerationAction,
    ) -> Self {
        Self {
            gatherer: SignalGatherer::new(pulls, accounts),
            moderator: Moderator::new(moderation),
            classifier,
            action,
        }
    }

    /// Evaluates one pull request and moderates it when it is spam.
    ///
    /// `event_fork` is the head fork flag from the webhook payload; when
    /// absent the flag on the fetched pull request is used. A pull request
    /// with no head repository counts as not from a fork.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError`] when fetching the pull request or gathering
    /// signals fails. Moderation failures are reported in the outcome.
    pub async fn evaluate(
        &self,
        locator: &PullRequestLocator,
        event_fork: Option<bool>,
    ) -> Result<RunOutcome, GuardError> {
        let metadata = self.gatherer.pulls().pull_request(locator).await?;

        let from_fork = event_fork
            .or(metadata.head_repository_fork)
            .unwrap_or(false);
        if !from_fork {
            tracing::info!(target_pr = %locator, "not from a fork, skipping");
            return Ok(RunOutcome::Ineligible(IneligibleReason::NotFromFork));
        }
        if !metadata.is_open() {
            tracing::info!(target_pr = %locator, state = ?metadata.state, "not open, skipping");
            return Ok(RunOutcome::Ineligible(IneligibleReason::NotOpen));
        }

        let label_present = metadata.has_label(&self.action.label);
        let signals = self.gatherer.gather_from(locator, metadata).await?;

        match classify(&signals.pull_request, &signals.author, &self.classifier) {
            Verdict::NotSpam => {
                tracing::info!(target_pr = %locator, "not spam");
                Ok(RunOutcome::Clean)
            }
            Verdict::Spam(reason) => {
                tracing::warn!(target_pr = %locator, %reason, "spam detected");
                let report = self
                    .moderator
                    .apply(locator, &self.action, label_present)
                    .await;
                Ok(RunOutcome::SpamDetected { reason, report })
            }
        }
    }
}
