//! Moderation actuator applying a spam verdict to a pull request.
//!
//! Labelling is the required step and closing is best-effort. Each step
//! reports its own [`StepOutcome`], so a failed close never hides a
//! successful label and vice versa.

use std::fmt;

use crate::github::gateway::ModerationGateway;
use crate::github::locator::PullRequestLocator;

/// Default label applied to spam pull requests.
pub const DEFAULT_SPAM_LABEL: &str = "Spam";

/// What to do with a pull request classified as spam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationAction {
    /// Label to apply.
    pub label: String,
    /// Whether to close the pull request after labelling.
    pub close_on_spam: bool,
    /// Report the intended steps without sending any mutation.
    pub dry_run: bool,
}

impl Default for ModerationAction {
    fn default() -> Self {
        Self {
            label: DEFAULT_SPAM_LABEL.to_owned(),
            close_on_spam: false,
            dry_run: false,
        }
    }
}

/// Result of a single moderation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The mutation was sent and accepted.
    Applied,
    /// The label was already on the pull request.
    AlreadyPresent,
    /// The step was not requested.
    Skipped,
    /// The step would have run but dry-run mode is enabled.
    DryRun,
    /// The mutation failed.
    Failed {
        /// Error detail from the gateway.
        message: String,
    },
}

impl StepOutcome {
    /// Returns true for [`StepOutcome::Failed`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("applied"),
            Self::AlreadyPresent => f.write_str("already present"),
            Self::Skipped => f.write_str("skipped"),
            Self::DryRun => f.write_str("dry run"),
            Self::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}

/// Independent outcomes of the label and close steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationReport {
    /// Outcome of applying the label.
    pub label: StepOutcome,
    /// Outcome of closing the pull request.
    pub close: StepOutcome,
}

impl ModerationReport {
    /// The run's moderation status follows the label step only.
    #[must_use]
    pub const fn label_succeeded(&self) -> bool {
        !self.label.is_failure()
    }

    /// True when exactly one of the two steps failed.
    #[must_use]
    pub const fn is_partial_failure(&self) -> bool {
        self.label.is_failure() != self.close.is_failure()
    }
}

/// Applies [`ModerationAction`]s through a [`ModerationGateway`].
pub struct Moderator<'client, Gateway>
where
    Gateway: ModerationGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> Moderator<'client, Gateway>
where
    Gateway: ModerationGateway,
{
    /// Create a moderator using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Label the pull request and, when requested, close it.
    ///
    /// `label_present` reports whether the label is already applied, in
    /// which case no label request is sent. Gateway failures are captured in
    /// the report rather than returned.
    pub async fn apply(
        &self,
        locator: &PullRequestLocator,
        action: &ModerationAction,
        label_present: bool,
    ) -> ModerationReport {
        let label = self.apply_label(locator, action, label_present).await;
        let close = self.close(locator, action).await;
        ModerationReport { label, close }
    }

    async fn apply_label(
        &self,
        locator: &PullRequestLocator,
        action: &ModerationAction,
        label_present: bool,
    ) -> StepOutcome {
        if label_present {
            tracing::info!(target_pr = %locator, label = %action.label, "label already present");
            return StepOutcome::AlreadyPresent;
        }

        if action.dry_run {
            tracing::info!(target_pr = %locator, label = %action.label, "dry run: would apply label");
            return StepOutcome::DryRun;
        }

        match self.client.add_label(locator, &action.label).await {
            Ok(()) => {
                tracing::info!(target_pr = %locator, label = %action.label, "marked as spam");
                StepOutcome::Applied
            }
            Err(error) if error.is_already_present() => {
                tracing::info!(target_pr = %locator, label = %action.label, "label already present");
                StepOutcome::AlreadyPresent
            }
            Err(error) => {
                tracing::error!(target_pr = %locator, label = %action.label, %error, "failed to mark as spam");
                StepOutcome::Failed {
                    message: error.to_string(),
                }
            }
        }
    }

    async fn close(&self, locator: &PullRequestLocator, action: &ModerationAction) -> StepOutcome {
        if !action.close_on_spam {
            return StepOutcome::Skipped;
        }

        if action.dry_run {
            tracing::info!(target_pr = %locator, "dry run: would close pull request");
            return StepOutcome::DryRun;
        }

        match self.client.close_pull_request(locator).await {
            Ok(()) => {
                tracing::info!(target_pr = %locator, "closed");
                StepOutcome::Applied
            }
            Err(error) => {
                tracing::warn!(target_pr = %locator, %error, "failed to close spam pull request");
                StepOutcome::Failed {
                    message: error.to_string(),
                }
            }
        }
    }
}
