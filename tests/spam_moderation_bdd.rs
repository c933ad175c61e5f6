//! Behavioural tests for spam detection and moderation against a mock
//! GitHub API.

#[path = "spam_moderation_bdd/mod.rs"]
mod spam_moderation_bdd_support;

use chrono::{Duration, SecondsFormat};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use spam_moderation_bdd_support::{
    CAMPAIGN_YEAR, ModerationState, ensure_runtime_and_server, moderation_requests, mount,
    mount_account, mount_pull_request,
};
use spamguard::github::models::test_support::pull_request_json;
use spamguard::{
    CampaignWindow, ClassifierSettings, GuardError, IneligibleReason, ModerationAction,
    ModerationReport, OctocrabGateway, PersonalAccessToken, PullRequestLocator,
    PullRequestNumber, PullRequestSource, RepositorySlug, RunOutcome, SpamGuard, StepOutcome,
};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ESTABLISHED_ACCOUNT_CREATED_AT: &str = "2016-04-12T08:00:00Z";

#[fixture]
fn moderation_state() -> ModerationState {
    ModerationState::default()
}

fn campaign() -> CampaignWindow {
    CampaignWindow::hacktoberfest(CAMPAIGN_YEAR)
        .unwrap_or_else(|error| panic!("campaign should resolve: {error}"))
}

fn spam_report(moderation_state: &ModerationState) -> (String, ModerationReport) {
    let outcome = moderation_state
        .outcome
        .with_ref(Clone::clone)
        .unwrap_or_else(|| {
            let error = moderation_state.error.with_ref(ToString::to_string);
            panic!("run produced no outcome, error: {error:?}")
        });

    match outcome {
        RunOutcome::SpamDetected { reason, report } => (reason.to_string(), report),
        other => panic!("expected a spam verdict, got {other:?}"),
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given(
    "a forked pull request {number:u64} by {login} touching {files:u64} source files with \
     {additions:u64} additions and {deletions:u64} deletions"
)]
fn seed_multi_file_pull_request(
    moderation_state: &ModerationState,
    number: u64,
    login: String,
    files: u64,
    additions: u64,
    deletions: u64,
) {
    let names: Vec<String> = (0..files).map(|index| format!("src/module_{index}.rs")).collect();
    let paths: Vec<&str> = names.iter().map(String::as_str).collect();
    let body = pull_request_json(number, &login, additions, deletions, true);
    mount_pull_request(moderation_state, number, &body, &paths);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given(
    "a forked pull request {number:u64} by {login} editing the file {file} with \
     {additions:u64} additions and {deletions:u64} deletions"
)]
fn seed_single_file_pull_request(
    moderation_state: &ModerationState,
    number: u64,
    login: String,
    file: String,
    additions: u64,
    deletions: u64,
) {
    let body = pull_request_json(number, &login, additions, deletions, true);
    mount_pull_request(moderation_state, number, &body, &[file.as_str()]);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a pull request {number:u64} from the base repository by {login}")]
fn seed_same_repository_pull_request(moderation_state: &ModerationState, number: u64, login: String) {
    let body = pull_request_json(number, &login, 1, 0, false);
    mount_pull_request(moderation_state, number, &body, &["README.md"]);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given(
    "{login} registered {hours:u64} hours before the campaign owning {repositories:u64} \
     repositories of which {forks:u64} are forks"
)]
fn seed_new_account(
    moderation_state: &ModerationState,
    login: String,
    hours: u64,
    repositories: u64,
    forks: u64,
) {
    let offset = i64::try_from(hours)
        .unwrap_or_else(|error| panic!("hours out of range: {error}"));
    let created_at = (campaign().start() - Duration::hours(offset))
        .to_rfc3339_opts(SecondsFormat::Secs, true);
    mount_account(moderation_state, &login, &created_at, repositories, forks);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given(
    "{login} is an established account owning {repositories:u64} repositories of which \
     {forks:u64} are forks"
)]
fn seed_established_account(
    moderation_state: &ModerationState,
    login: String,
    repositories: u64,
    forks: u64,
) {
    mount_account(
        moderation_state,
        &login,
        ESTABLISHED_ACCOUNT_CREATED_AT,
        repositories,
        forks,
    );
}

#[given("spam pull requests are closed")]
fn enable_closing(moderation_state: &ModerationState) {
    moderation_state.close_on_spam.set(true);
}

#[given("the label API reports the label already exists")]
fn seed_duplicate_label(moderation_state: &ModerationState) {
    let response = ResponseTemplate::new(422).set_body_json(json!({
        "message": "Validation Failed",
        "errors": [{ "resource": "Label", "code": "already_exists", "field": "name" }],
        "documentation_url": "https://docs.github.com/rest/issues/labels"
    }));
    mount(
        moderation_state,
        Mock::given(method("POST"))
            .and(path("/repos/owner/repo/issues/9/labels"))
            .respond_with(response)
            .with_priority(1),
    );
}

#[when("the bot evaluates pull request {number:u64}")]
fn evaluate_pull_request(moderation_state: &ModerationState, number: u64) {
    let runtime = ensure_runtime_and_server(moderation_state);
    let server_url = moderation_state
        .server
        .with_ref(MockServer::uri)
        .unwrap_or_else(|| panic!("mock server URL missing"));
    let close_on_spam = moderation_state.close_on_spam.get().unwrap_or(false);

    let result = runtime.block_on(async {
        let api_base = Url::parse(&server_url)
            .unwrap_or_else(|error| panic!("mock server URL should parse: {error}"));
        let token = PersonalAccessToken::new("ghp_example")?;
        let gateway = OctocrabGateway::for_token(&token, &api_base)?;
        let slug = RepositorySlug::parse("owner/repo")?;
        let source = PullRequestSource::Number(PullRequestNumber::new(number)?);
        let resolved = source.resolve(&slug, &gateway).await?;
        let locator = PullRequestLocator::new(slug, resolved);

        let action = ModerationAction {
            close_on_spam,
            ..ModerationAction::default()
        };
        let guard = SpamGuard::new(
            &gateway,
            &gateway,
            &gateway,
            ClassifierSettings::new(campaign()),
            action,
        );
        let outcome = guard.evaluate(&locator, source.event_fork()).await?;
        Ok::<RunOutcome, GuardError>(outcome)
    });

    match result {
        Ok(outcome) => {
            drop(moderation_state.error.take());
            moderation_state.outcome.set(outcome);
        }
        Err(error) => {
            drop(moderation_state.outcome.take());
            moderation_state.error.set(error);
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the pull request is labelled as spam for reason {reason}")]
fn assert_labelled(moderation_state: &ModerationState, reason: String) {
    let (actual_reason, report) = spam_report(moderation_state);
    assert_eq!(actual_reason, reason.trim_matches('"'));
    assert_eq!(report.label, StepOutcome::Applied);

    let requests = moderation_requests(moderation_state);
    assert!(
        requests
            .iter()
            .any(|(verb, target)| verb == "POST" && target.ends_with("/labels")),
        "expected a label request, got {requests:?}"
    );
}

#[then("the pull request is closed")]
fn assert_closed(moderation_state: &ModerationState) {
    let (_, report) = spam_report(moderation_state);
    assert_eq!(report.close, StepOutcome::Applied);

    let requests = moderation_requests(moderation_state);
    assert!(
        requests.iter().any(|(verb, _)| verb == "PATCH"),
        "expected a close request, got {requests:?}"
    );
}

#[then("the run finishes without a spam verdict")]
fn assert_clean(moderation_state: &ModerationState) {
    let outcome = moderation_state.outcome.with_ref(Clone::clone);
    assert_eq!(outcome, Some(RunOutcome::Clean));
}

#[then("the run is skipped because the pull request is not from a fork")]
fn assert_not_from_fork(moderation_state: &ModerationState) {
    let outcome = moderation_state.outcome.with_ref(Clone::clone);
    assert_eq!(
        outcome,
        Some(RunOutcome::Ineligible(IneligibleReason::NotFromFork))
    );
}

#[then("no moderation request was sent")]
fn assert_no_mutations(moderation_state: &ModerationState) {
    let requests = moderation_requests(moderation_state);
    assert!(requests.is_empty(), "unexpected mutations: {requests:?}");
}

#[then("the label step reports the label as already present")]
fn assert_already_present(moderation_state: &ModerationState) {
    let (_, report) = spam_report(moderation_state);
    assert_eq!(report.label, StepOutcome::AlreadyPresent);
    assert!(report.label_succeeded());
}

#[scenario(path = "tests/features/spam_moderation.feature", index = 0)]
fn new_account_with_only_forks(moderation_state: ModerationState) {
    let _ = moderation_state;
}

#[scenario(path = "tests/features/spam_moderation.feature", index = 1)]
fn tiny_readme_edit(moderation_state: ModerationState) {
    let _ = moderation_state;
}

#[scenario(path = "tests/features/spam_moderation.feature", index = 2)]
fn large_pure_addition_is_closed(moderation_state: ModerationState) {
    let _ = moderation_state;
}

#[scenario(path = "tests/features/spam_moderation.feature", index = 3)]
fn balanced_change_is_clean(moderation_state: ModerationState) {
    let _ = moderation_state;
}

#[scenario(path = "tests/features/spam_moderation.feature", index = 4)]
fn base_repository_pull_request_is_skipped(moderation_state: ModerationState) {
    let _ = moderation_state;
}

#[scenario(path = "tests/features/spam_moderation.feature", index = 5)]
fn duplicate_label_is_tolerated(moderation_state: ModerationState) {
    let _ = moderation_state;
}
