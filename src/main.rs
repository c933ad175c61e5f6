//! Spamguard CLI entrypoint: evaluates one pull request and moderates spam.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use cli::output::{FAILURE_STATUS, exit_status};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    match cli::moderate::run().await {
        Ok(outcome) => ExitCode::from(exit_status(&outcome)),
        Err(error) => {
            tracing::debug!(kind = ?error.kind(), "run failed");
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::from(FAILURE_STATUS);
            }
            ExitCode::from(FAILURE_STATUS)
        }
    }
}

/// Logs go to stderr so stdout carries only workflow commands.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
