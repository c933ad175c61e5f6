//! Unit tests for GitHub identity parsing.

use rstest::rstest;

use super::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositorySlug,
};
use crate::error::GuardError;

#[rstest]
fn parses_owner_and_repository() {
    let slug = RepositorySlug::parse("octo/repo").expect("should parse slug");
    assert_eq!(slug.owner().as_str(), "octo", "owner mismatch");
    assert_eq!(slug.repository().as_str(), "repo", "repository mismatch");
    assert_eq!(slug.to_string(), "octo/repo");
}

#[rstest]
#[case::no_separator("octo")]
#[case::empty("")]
#[case::empty_owner("/repo")]
#[case::empty_repository("octo/")]
#[case::too_many_segments("octo/repo/extra")]
fn rejects_malformed_repository(#[case] input: &str) {
    let result = RepositorySlug::parse(input);
    assert_eq!(
        result,
        Err(GuardError::InvalidRepository {
            value: input.to_owned()
        }),
        "expected InvalidRepository for {input:?}"
    );
}

#[rstest]
#[case::merge_ref("refs/pull/42/merge", 42)]
#[case::bare_number("7", 7)]
fn parses_merge_ref(#[case] git_ref: &str, #[case] expected: u64) {
    let number = PullRequestNumber::from_merge_ref(git_ref).expect("ref should parse");
    assert_eq!(number.get(), expected);
}

#[rstest]
#[case::branch_ref("refs/heads/main")]
#[case::non_numeric("refs/pull/abc/merge")]
#[case::zero("refs/pull/0/merge")]
#[case::empty("")]
fn rejects_non_pull_ref(#[case] git_ref: &str) {
    let result = PullRequestNumber::from_merge_ref(git_ref);
    assert_eq!(
        result,
        Err(GuardError::InvalidPullRequestRef {
            value: git_ref.to_owned()
        })
    );
}

#[rstest]
fn rejects_zero_number() {
    let result = PullRequestNumber::new(0);
    assert!(
        matches!(result, Err(GuardError::InvalidPullRequestNumber)),
        "expected InvalidPullRequestNumber for zero, got {result:?}"
    );
}

#[rstest]
#[case::empty("")]
#[case::whitespace("   ")]
fn rejects_blank_token(#[case] value: &str) {
    let result = PersonalAccessToken::new(value);
    assert!(
        matches!(result, Err(GuardError::MissingToken)),
        "expected MissingToken, got {result:?}"
    );
}

#[rstest]
fn token_debug_output_is_redacted() {
    let token = PersonalAccessToken::new(" ghp_secret ").expect("token should be valid");
    assert_eq!(token.value(), "ghp_secret", "token should be trimmed");
    assert!(
        !format!("{token:?}").contains("ghp_secret"),
        "debug output must not leak the token"
    );
}

#[rstest]
fn locator_builds_api_paths() {
    let slug = RepositorySlug::parse("octo/repo").expect("should parse slug");
    let number = PullRequestNumber::new(12).expect("number should be valid");
    let locator = PullRequestLocator::new(slug, number);

    assert_eq!(locator.to_string(), "octo/repo#12");
    assert_eq!(locator.pull_request_path(), "/repos/octo/repo/pulls/12");
    assert_eq!(locator.files_path(), "/repos/octo/repo/pulls/12/files");
    assert_eq!(locator.labels_path(), "/repos/octo/repo/issues/12/labels");
    assert_eq!(
        locator.slug().commit_pulls_path("abc123"),
        "/repos/octo/repo/commits/abc123/pulls"
    );
}
