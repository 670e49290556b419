use std::path::Path;
use std::process::ExitCode;

use crate::install::{install as install_hooks, uninstall as uninstall_hooks};
use crate::install::{Action, HookLayout, InstallError};
use crate::logging;

/// Execute the hooks subcommand: install or uninstall the scripts in `hooks_dir`.
pub fn run(install: bool, uninstall: bool, hooks_dir: &Path, git_dir: &Path) -> ExitCode {
    let subscriber = logging::subscriber(logging::DEFAULT_LEVEL, std::io::stderr);
    tracing::subscriber::with_default(subscriber, || {
        match execute(install, uninstall, &HookLayout::new(hooks_dir, git_dir)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                super::report(e);
                ExitCode::FAILURE
            }
        }
    })
}

fn execute(install: bool, uninstall: bool, layout: &HookLayout) -> Result<(), InstallError> {
    // Each hook is logged as it is handled.
    match Action::from_flags(install, uninstall)? {
        Action::Install => install_hooks(layout)?,
        Action::Uninstall => uninstall_hooks(layout)?,
    };
    Ok(())
}
