pub mod command;
pub mod config;
pub mod install;
pub mod logging;
pub mod runner;

pub(crate) mod cli;

pub use command::TestCommand;
pub use runner::{HookError, HookRunner, Outcome};

use std::path::Path;
use std::process::ExitCode;

/// Run the pre-push subcommand: run the test suite and report the outcome as an exit code.
///
/// This is the binary entry point. It exists to bridge the binary crate (`main.rs`)
/// to the library without exposing `cli` internals. Library callers should use
/// [`HookRunner`] and [`config::Config`] directly.
pub fn run_pre_push(
    config_path: Option<&Path>,
    remote: Option<&str>,
    url: Option<&str>,
) -> ExitCode {
    cli::pre_push::run(config_path, remote, url)
}

/// Run the hooks subcommand: install or uninstall the repository's git hooks.
pub fn run_hooks(install: bool, uninstall: bool, hooks_dir: &Path, git_dir: &Path) -> ExitCode {
    cli::hooks::run(install, uninstall, hooks_dir, git_dir)
}
