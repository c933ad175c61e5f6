//! CLI wiring for a moderation run.
//!
//! - [`moderate`]: Loads configuration and evaluates the pull request
//! - [`output`]: Workflow annotations and exit statuses

pub mod moderate;
pub mod output;
