use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Git pre-push hook that runs the project's test suite.
#[derive(Debug, Parser)]
#[command(name = "prepush-hook", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the test suite; exits non-zero (aborting the push) if it fails
    PrePush {
        /// Name of the remote being pushed to (passed by git)
        remote: Option<String>,
        /// URL of the remote being pushed to (passed by git)
        url: Option<String>,
        /// Path to a KDL config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Install or uninstall the repository's git hooks
    Hooks {
        /// Install hooks
        #[arg(long)]
        install: bool,
        /// Uninstall hooks
        #[arg(long)]
        uninstall: bool,
        /// Directory holding the hook scripts
        #[arg(long, default_value = prepush_hook::install::HOOKS_DIR)]
        hooks_dir: PathBuf,
        /// Git directory the hooks are installed into
        #[arg(long, default_value = prepush_hook::install::GIT_DIR)]
        git_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::PrePush {
            remote,
            url,
            config,
        } => prepush_hook::run_pre_push(config.as_deref(), remote.as_deref(), url.as_deref()),
        Commands::Hooks {
            install,
            uninstall,
            hooks_dir,
            git_dir,
        } => prepush_hook::run_hooks(install, uninstall, &hooks_dir, &git_dir),
    }
}
