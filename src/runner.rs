use std::process::{ExitCode, ExitStatus};

use tracing::{debug, error, info};

use crate::command::TestCommand;

/// Why a pre-push run did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// The test command could not be started at all.
    #[error("could not launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The test command ran and reported failure.
    #[error("tests failed: `{command}` finished with {status}")]
    TestsFailed { command: String, status: ExitStatus },
}

/// Terminal state of a hook run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl Outcome {
    /// Process exit code git sees: 0 lets the push through, anything else aborts it.
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Succeeded => 0,
            Outcome::Failed => 1,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// Runs the project's test suite and turns its exit status into a hook outcome.
#[derive(Debug, Clone, Default)]
pub struct HookRunner {
    command: TestCommand,
}

impl HookRunner {
    pub fn new(command: TestCommand) -> Self {
        Self { command }
    }

    /// Launch the test command and block until it exits.
    ///
    /// The child inherits the console, so its output is shown as-is. The child
    /// is always reaped before this returns.
    ///
    /// # Errors
    ///
    /// [`HookError::Launch`] if the program cannot be started,
    /// [`HookError::TestsFailed`] if it exits non-zero or is killed by a signal.
    pub fn run_tests(&self) -> Result<(), HookError> {
        info!("Running Application tests");
        debug!(command = %self.command, "launching test command");

        let status = self
            .command
            .to_process()
            .status()
            .map_err(|source| HookError::Launch {
                program: self.command.program().to_string(),
                source,
            })?;

        debug!(%status, "test command exited");

        if status.success() {
            Ok(())
        } else {
            Err(HookError::TestsFailed {
                command: self.command.to_string(),
                status,
            })
        }
    }

    /// Run the tests and log the result. Failures are reported, never retried.
    pub fn run(&self) -> Outcome {
        match self.run_tests() {
            Ok(()) => {
                info!("Application tests passed");
                Outcome::Succeeded
            }
            Err(e) => {
                error!("{e}");
                Outcome::Failed
            }
        }
    }
}
