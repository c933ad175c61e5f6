//! Contribution campaign window.
//!
//! The classifier never reads the clock. The campaign start is resolved once
//! when configuration is loaded and passed in as a plain timestamp.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

use crate::error::GuardError;

const CAMPAIGN_MONTH: u32 = 10;
const CAMPAIGN_DAY: u32 = 1;

/// Start of the campaign during which contribution-counting incentives run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignWindow {
    start: DateTime<Utc>,
}

impl CampaignWindow {
    /// Creates a window starting at `start`.
    #[must_use]
    pub const fn starting_at(start: DateTime<Utc>) -> Self {
        Self { start }
    }

    /// Hacktoberfest window for `year`: October 1st, 00:00 UTC.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::Configuration`] when the year is outside the
    /// range chrono can represent.
    pub fn hacktoberfest(year: i32) -> Result<Self, GuardError> {
        Utc.with_ymd_and_hms(year, CAMPAIGN_MONTH, CAMPAIGN_DAY, 0, 0, 0)
            .single()
            .map(Self::starting_at)
            .ok_or_else(|| GuardError::Configuration {
                message: format!("cannot compute campaign start for year {year}"),
            })
    }

    /// Hacktoberfest window for the year of `now`.
    ///
    /// Evaluating a pull request in January uses the upcoming October, so the
    /// effective window shifts at every year boundary.
    ///
    /// # Errors
    ///
    /// See [`CampaignWindow::hacktoberfest`].
    pub fn hacktoberfest_of(now: DateTime<Utc>) -> Result<Self, GuardError> {
        Self::hacktoberfest(now.year())
    }

    /// Parses an RFC 3339 start timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::Configuration`] when the value does not parse.
    pub fn parse(value: &str) -> Result<Self, GuardError> {
        DateTime::parse_from_rfc3339(value)
            .map(|start| Self::starting_at(start.with_timezone(&Utc)))
            .map_err(|error| GuardError::Configuration {
                message: format!("campaign start {value:?} is not an RFC 3339 timestamp: {error}"),
            })
    }

    /// Campaign start timestamp.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Accounts created at or after this instant count as new: one day
    /// before the campaign starts.
    #[must_use]
    pub fn new_account_cutoff(&self) -> DateTime<Utc> {
        self.start - Duration::hours(24)
    }
}
