//! Spam classification over gathered signals.
//!
//! Rules run in a fixed priority order, from the strongest behavioural
//! signal (account provenance) to the weakest (diff shape). The first rule
//! that matches decides the verdict; later rules are not consulted.

use std::fmt;

use crate::campaign::CampaignWindow;
use crate::signals::{AuthorProfile, PullRequestContext};

/// Default upper bound (exclusive) on lines changed for a trivial change.
pub const DEFAULT_TRIVIAL_CHANGE_THRESHOLD: u64 = 10;

/// Why a pull request was classified as spam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamReason {
    /// Account created within a day of the campaign start and owning no
    /// original repositories.
    NewAccountNoOriginalWork,
    /// A single file or documentation-only change below the size threshold.
    TrivialChange,
    /// A single file changed in one direction only.
    OneSidedSingleFileChange,
}

impl SpamReason {
    /// Stable machine-readable identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewAccountNoOriginalWork => "new_account_no_original_work",
            Self::TrivialChange => "trivial_change",
            Self::OneSidedSingleFileChange => "one_sided_single_file_change",
        }
    }

    /// Human-readable explanation suitable for annotations.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::NewAccountNoOriginalWork => {
                "user registered less than one day before the campaign and has only forked repositories"
            }
            Self::TrivialChange => "pull request is only a few changes to a single file or documentation",
            Self::OneSidedSingleFileChange => {
                "only one file changed with either additions or deletions only"
            }
        }
    }
}

impl fmt::Display for SpamReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No rule matched.
    NotSpam,
    /// A rule matched.
    Spam(SpamReason),
}

impl Verdict {
    /// Returns true for a spam verdict.
    #[must_use]
    pub const fn is_spam(self) -> bool {
        matches!(self, Self::Spam(_))
    }
}

/// Inputs to the classifier that come from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierSettings {
    /// Campaign the new-account rule is measured against.
    pub campaign: CampaignWindow,
    /// Changes strictly smaller than this many lines are trivial.
    pub trivial_change_threshold: u64,
}

impl ClassifierSettings {
    /// Settings with the default trivial-change threshold.
    #[must_use]
    pub const fn new(campaign: CampaignWindow) -> Self {
        Self {
            campaign,
            trivial_change_threshold: DEFAULT_TRIVIAL_CHANGE_THRESHOLD,
        }
    }

    /// Overrides the trivial-change threshold.
    #[must_use]
    pub const fn with_trivial_change_threshold(mut self, threshold: u64) -> Self {
        self.trivial_change_threshold = threshold;
        self
    }
}

/// Classifies a pull request from its gathered signals.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use spamguard::github::{ChangedFile, PullRequestLocator, PullRequestNumber, RepositorySlug};
/// use spamguard::{
///     AuthorProfile, CampaignWindow, ClassifierSettings, PullRequestContext, SpamReason,
///     Verdict, classify,
/// };
///
/// let campaign = CampaignWindow::hacktoberfest(2025).expect("valid year");
/// let locator = PullRequestLocator::new(
///     RepositorySlug::parse("octo/repo").expect("valid slug"),
///     PullRequestNumber::new(1).expect("valid number"),
/// );
/// let pull_request = PullRequestContext {
///     locator,
///     author: "veteran".to_owned(),
///     created_at: None,
///     additions: 3,
///     deletions: 1,
///     changed_files: vec![ChangedFile { path: "README.md".to_owned() }],
///     head_repository_fork: true,
/// };
/// let author = AuthorProfile {
///     login: "veteran".to_owned(),
///     created_at: Utc.with_ymd_and_hms(2019, 5, 1, 0, 0, 0).single().expect("valid timestamp"),
///     repository_count: 12,
///     fork_count: 4,
/// };
///
/// let verdict = classify(&pull_request, &author, &ClassifierSettings::new(campaign));
/// assert_eq!(verdict, Verdict::Spam(SpamReason::TrivialChange));
/// ```
#[must_use]
pub fn classify(
    pull_request: &PullRequestContext,
    author: &AuthorProfile,
    settings: &ClassifierSettings,
) -> Verdict {
    if is_new_account_without_original_work(author, &settings.campaign) {
        return Verdict::Spam(SpamReason::NewAccountNoOriginalWork);
    }

    if is_trivial_change(pull_request, settings.trivial_change_threshold) {
        return Verdict::Spam(SpamReason::TrivialChange);
    }

    if is_one_sided_single_file_change(pull_request) {
        return Verdict::Spam(SpamReason::OneSidedSingleFileChange);
    }

    Verdict::NotSpam
}

fn is_new_account_without_original_work(author: &AuthorProfile, campaign: &CampaignWindow) -> bool {
    author.created_at >= campaign.new_account_cutoff() && author.has_only_forks()
}

fn is_trivial_change(pull_request: &PullRequestContext, threshold: u64) -> bool {
    let narrow = pull_request.changed_file_count() == 1 || pull_request.is_docs_only();
    narrow && pull_request.change_size() < threshold
}

fn is_one_sided_single_file_change(pull_request: &PullRequestContext) -> bool {
    pull_request.changed_file_count() == 1
        && (pull_request.additions == 0 || pull_request.deletions == 0)
}
