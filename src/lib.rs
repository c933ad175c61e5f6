//! Spamguard library crate providing pull request spam moderation.
//!
//! The library gathers signals about a single pull request and its author
//! through Octocrab, classifies the contribution with a small fixed rule set,
//! and applies a label (and optionally closes the pull request) when the
//! verdict is spam. Configuration, errors, and the GitHub gateway are exposed
//! so the CLI can wire a run together.

pub mod campaign;
pub mod classifier;
pub mod config;
pub mod error;
pub mod github;
pub mod guard;
pub mod moderation;
pub mod signals;

pub use campaign::CampaignWindow;
pub use classifier::{ClassifierSettings, SpamReason, Verdict, classify};
pub use config::{RunSettings, SpamGuardConfig};
pub use error::{ErrorKind, GuardError};
pub use github::{
    GatewayError, OctocrabGateway, PersonalAccessToken, PullRequestLocator, PullRequestNumber,
    RepositorySlug,
};
pub use guard::{IneligibleReason, PullRequestSource, RunOutcome, SpamGuard};
pub use moderation::{ModerationAction, ModerationReport, Moderator, StepOutcome};
pub use signals::{AuthorProfile, PullRequestContext, SignalGatherer};
