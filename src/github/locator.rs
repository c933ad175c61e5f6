//! Identity wrappers for repositories, pull requests, and tokens.

use std::fmt;

use crate::error::GuardError;

const PULL_REF_PREFIX: &str = "refs/pull/";
const PULL_REF_SUFFIX: &str = "/merge";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Target repository in `owner/repo` form.
///
/// # Example
///
/// ```
/// use spamguard::RepositorySlug;
///
/// let slug = RepositorySlug::parse("octo/repo").expect("slug should parse");
/// assert_eq!(slug.owner().as_str(), "octo");
/// assert_eq!(slug.repository().as_str(), "repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositorySlug {
    /// Parses an `owner/repo` identifier such as the value of
    /// `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::InvalidRepository`] unless the input splits on
    /// `/` into exactly two non-empty segments.
    pub fn parse(input: &str) -> Result<Self, GuardError> {
        let invalid = || GuardError::InvalidRepository {
            value: input.to_owned(),
        };

        let mut segments = input.split('/');
        let owner = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let repository = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        if segments.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            owner: RepositoryOwner(owner.to_owned()),
            repository: RepositoryName(repository.to_owned()),
        })
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    pub(crate) fn commit_pulls_path(&self, sha: &str) -> String {
        format!(
            "/repos/{}/{}/commits/{sha}/pulls",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner.as_str(), self.repository.as_str())
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Validates that the number is positive.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::InvalidPullRequestNumber`] for zero.
    pub const fn new(value: u64) -> Result<Self, GuardError> {
        if value == 0 {
            return Err(GuardError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Parses a merge ref of the form `refs/pull/<N>/merge`.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::InvalidPullRequestRef`] naming the ref when the
    /// remainder is not a positive integer.
    pub fn from_merge_ref(git_ref: &str) -> Result<Self, GuardError> {
        let without_suffix = git_ref.strip_suffix(PULL_REF_SUFFIX).unwrap_or(git_ref);
        let digits = without_suffix
            .strip_prefix(PULL_REF_PREFIX)
            .unwrap_or(without_suffix);

        digits
            .parse::<u64>()
            .ok()
            .and_then(|value| Self::new(value).ok())
            .ok_or_else(|| GuardError::InvalidPullRequestRef {
                value: git_ref.to_owned(),
            })
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::MissingToken`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, GuardError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GuardError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PersonalAccessToken(***)")
    }
}

/// A pull request within a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    slug: RepositorySlug,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Creates a locator for pull request `number` in `slug`.
    #[must_use]
    pub const fn new(slug: RepositorySlug, number: PullRequestNumber) -> Self {
        Self { slug, number }
    }

    /// Repository the pull request targets.
    #[must_use]
    pub const fn slug(&self) -> &RepositorySlug {
        &self.slug
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        self.slug.owner()
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        self.slug.repository()
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    pub(crate) fn pull_request_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls/{}",
            self.owner().as_str(),
            self.repository().as_str(),
            self.number.get()
        )
    }

    pub(crate) fn files_path(&self) -> String {
        format!("{}/files", self.pull_request_path())
    }

    pub(crate) fn labels_path(&self) -> String {
        format!(
            "/repos/{}/{}/issues/{}/labels",
            self.owner().as_str(),
            self.repository().as_str(),
            self.number.get()
        )
    }
}

impl fmt::Display for PullRequestLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.slug, self.number)
    }
}
