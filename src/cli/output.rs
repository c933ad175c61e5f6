//! Output formatting and exit statuses for a moderation run.

use std::io::{self, Write};

use spamguard::{GuardError, ModerationReport, PullRequestLocator, RunOutcome};

/// The pull request was skipped or is not spam.
pub const CLEAN_STATUS: u8 = 0;
/// Spam was detected and the label is in place (or would be, in dry-run).
pub const SPAM_STATUS: u8 = 1;
/// Configuration or signal gathering failed.
pub const FAILURE_STATUS: u8 = 2;
/// Spam was detected but the label could not be applied.
pub const LABEL_FAILED_STATUS: u8 = 3;

/// Maps a completed run to the process exit status.
#[must_use]
pub const fn exit_status(outcome: &RunOutcome) -> u8 {
    match outcome {
        RunOutcome::Ineligible(_) | RunOutcome::Clean => CLEAN_STATUS,
        RunOutcome::SpamDetected { report, .. } => spam_status(report),
    }
}

const fn spam_status(report: &ModerationReport) -> u8 {
    if report.label_succeeded() {
        SPAM_STATUS
    } else {
        LABEL_FAILED_STATUS
    }
}

/// Writes the run outcome to stdout.
///
/// # Errors
///
/// Returns [`GuardError::Io`] when stdout cannot be written.
pub fn write_outcome(locator: &PullRequestLocator, outcome: &RunOutcome) -> Result<(), GuardError> {
    let mut stdout = io::stdout().lock();
    write_outcome_to(&mut stdout, locator, outcome)
}

/// Writes the run outcome to the given writer.
///
/// Spam verdicts are written as a GitHub Actions `::error::` workflow
/// command so the run surfaces an annotation.
///
/// # Errors
///
/// Returns [`GuardError::Io`] when the writer fails.
pub fn write_outcome_to<W: Write>(
    writer: &mut W,
    locator: &PullRequestLocator,
    outcome: &RunOutcome,
) -> Result<(), GuardError> {
    render_outcome(writer, locator, outcome).map_err(|error| io_error(&error))
}

fn render_outcome<W: Write>(
    writer: &mut W,
    locator: &PullRequestLocator,
    outcome: &RunOutcome,
) -> io::Result<()> {
    match outcome {
        RunOutcome::Ineligible(reason) => writeln!(writer, "{locator}: skipped, {reason}"),
        RunOutcome::Clean => writeln!(writer, "{locator}: not spam"),
        RunOutcome::SpamDetected { reason, report } => {
            writeln!(writer, "::error::{locator}: {}", reason.description())?;
            if report.label.is_failure() {
                writeln!(writer, "::warning::{locator}: label {}", report.label)?;
            }
            if report.close.is_failure() {
                writeln!(writer, "::warning::{locator}: close {}", report.close)?;
            }
            Ok(())
        }
    }
}

fn io_error(error: &io::Error) -> GuardError {
    GuardError::Io {
        message: error.to_string(),
    }
}
