//! Scenario state for the spam moderation BDD tests.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use spamguard::{GuardError, RunOutcome};
use tokio::runtime::{Builder, Runtime};
use wiremock::MockServer;

/// Current-thread runtime that can live in a [`Slot`] across steps.
#[derive(Clone)]
pub(crate) struct ScenarioRuntime(Rc<RefCell<Runtime>>);

impl ScenarioRuntime {
    fn start() -> Self {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap_or_else(|error| panic!("failed to build scenario runtime: {error}"));
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

#[derive(ScenarioState, Default)]
pub(crate) struct ModerationState {
    pub(crate) runtime: Slot<ScenarioRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) close_on_spam: Slot<bool>,
    pub(crate) outcome: Slot<RunOutcome>,
    pub(crate) error: Slot<GuardError>,
}

/// Starts the runtime and mock GitHub server on first use.
pub(crate) fn ensure_runtime_and_server(state: &ModerationState) -> ScenarioRuntime {
    let runtime = state.runtime.get().unwrap_or_else(|| {
        let started = ScenarioRuntime::start();
        state.runtime.set(started.clone());
        started
    });

    if state.server.with_ref(|_| ()).is_none() {
        state.server.set(runtime.block_on(MockServer::start()));
    }

    runtime
}
