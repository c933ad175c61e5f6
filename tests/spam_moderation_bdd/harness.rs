//! Mock GitHub API helpers for the spam moderation BDD tests.

use serde_json::{Value, json};
use spamguard::github::models::test_support::{
    account_json, changed_files_json, repositories_json,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::state::{ModerationState, ensure_runtime_and_server};

/// Campaign every scenario is evaluated against.
pub(crate) const CAMPAIGN_YEAR: i32 = 2025;

/// Mounts `mock` on the scenario's server.
pub(crate) fn mount(state: &ModerationState, mock: Mock) {
    let runtime = ensure_runtime_and_server(state);
    state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

/// Mounts the pull request, its files, and the moderation endpoints.
pub(crate) fn mount_pull_request(state: &ModerationState, number: u64, body: &Value, files: &[&str]) {
    let pull_path = format!("/repos/owner/repo/pulls/{number}");

    mount(
        state,
        Mock::given(method("GET"))
            .and(path(pull_path.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body)),
    );
    mount(
        state,
        Mock::given(method("GET"))
            .and(path(format!("{pull_path}/files")))
            .respond_with(ResponseTemplate::new(200).set_body_json(changed_files_json(files))),
    );
    mount(
        state,
        Mock::given(method("POST"))
            .and(path(format!("/repos/owner/repo/issues/{number}/labels")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "name": "Spam" }])),
            ),
    );
    mount(
        state,
        Mock::given(method("PATCH"))
            .and(path(pull_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "number": number, "state": "closed" })),
            ),
    );
}

/// Mounts the account and its repository listing.
pub(crate) fn mount_account(
    state: &ModerationState,
    login: &str,
    created_at: &str,
    repositories: u64,
    forks: u64,
) {
    let names: Vec<(String, bool)> = (0..repositories)
        .map(|index| (format!("repo-{index}"), index < forks))
        .collect();
    let listing: Vec<(&str, bool)> = names
        .iter()
        .map(|(name, fork)| (name.as_str(), *fork))
        .collect();

    mount(
        state,
        Mock::given(method("GET"))
            .and(path(format!("/users/{login}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(account_json(login, created_at)),
            ),
    );
    mount(
        state,
        Mock::given(method("GET"))
            .and(path(format!("/users/{login}/repos")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(repositories_json(&listing)),
            ),
    );
}

/// Returns `(method, path)` for every mutation the server received.
pub(crate) fn moderation_requests(state: &ModerationState) -> Vec<(String, String)> {
    let runtime = ensure_runtime_and_server(state);
    let requests = state
        .server
        .with_ref(|server| runtime.block_on(MockServer::received_requests(server)))
        .flatten()
        .unwrap_or_default();

    requests
        .into_iter()
        .filter(|request| request.method.as_str() != "GET")
        .map(|request| (request.method.to_string(), request.url.path().to_owned()))
        .collect()
}
