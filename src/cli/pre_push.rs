use std::path::Path;
use std::process::ExitCode;

use tracing::debug;

use crate::config::Config;
use crate::logging;
use crate::runner::HookRunner;

/// Execute the pre-push subcommand: run the test suite, exit non-zero on failure.
///
/// Without `--config` the hook runs `go test -v ./...` and logs at debug level.
/// A config that cannot be loaded aborts the push before any test runs.
pub fn run(config_path: Option<&Path>, remote: Option<&str>, url: Option<&str>) -> ExitCode {
    let config = match config_path.map(Config::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            super::report(e);
            return ExitCode::FAILURE;
        }
    };

    let subscriber = logging::subscriber(config.log_level, std::io::stderr);
    tracing::subscriber::with_default(subscriber, || {
        if let Some(remote) = remote {
            debug!(remote, url = url.unwrap_or_default(), "invoked by git");
        }
        HookRunner::new(config.command).run().into()
    })
}
