//! Support code for the spam moderation BDD tests.

mod harness;
mod state;

pub(crate) use harness::{
    CAMPAIGN_YEAR, moderation_requests, mount, mount_account, mount_pull_request,
};
pub(crate) use state::{ModerationState, ensure_runtime_and_server};
