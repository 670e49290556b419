//! Installing the repository's hook scripts into `.git/hooks`.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

/// Directory holding the hook scripts, relative to the repository root.
pub const HOOKS_DIR: &str = "hooks";
/// Git's directory, relative to the repository root.
pub const GIT_DIR: &str = ".git";

/// What `hooks` should do, derived from the `--install`/`--uninstall` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Uninstall,
}

impl Action {
    /// Exactly one of the two flags must be set.
    pub fn from_flags(install: bool, uninstall: bool) -> Result<Self, InstallError> {
        match (install, uninstall) {
            (true, true) => Err(InstallError::ConflictingActions),
            (true, false) => Ok(Action::Install),
            (false, true) => Ok(Action::Uninstall),
            (false, false) => Err(InstallError::NoAction),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Install => f.write_str("installed"),
            Action::Uninstall => f.write_str("uninstalled"),
        }
    }
}

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum InstallError {
    #[error("Cannot install and uninstall at the same time.")]
    #[diagnostic(code(prepush_hook::hooks::conflict))]
    ConflictingActions,
    #[error("No action specified. Use --install or --uninstall.")]
    #[diagnostic(code(prepush_hook::hooks::no_action))]
    NoAction,
    #[error("failed to read hooks directory {}: {source}", .path.display())]
    #[diagnostic(
        code(prepush_hook::hooks::read_dir),
        help("run from the repository root or pass --hooks-dir")
    )]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create {}: {source}", .path.display())]
    #[diagnostic(code(prepush_hook::hooks::create_dir))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{failed} of {total} hooks could not be {action}")]
    #[diagnostic(code(prepush_hook::hooks::partial))]
    Incomplete {
        action: Action,
        failed: usize,
        total: usize,
    },
}

/// Where hook scripts come from and where git looks for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookLayout {
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
}

impl HookLayout {
    /// `hooks_dir` holds the scripts; they are placed in `<git_dir>/hooks`.
    pub fn new(hooks_dir: impl Into<PathBuf>, git_dir: impl AsRef<Path>) -> Self {
        Self {
            source_dir: hooks_dir.into(),
            target_dir: git_dir.as_ref().join("hooks"),
        }
    }

    /// Names of the regular files in the source directory, sorted.
    pub fn hook_names(&self) -> Result<Vec<OsString>, InstallError> {
        let read_dir_error = |source| InstallError::ReadDir {
            path: self.source_dir.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.source_dir).map_err(read_dir_error)? {
            let entry = entry.map_err(read_dir_error)?;
            if entry.file_type().map_err(read_dir_error)?.is_dir() {
                continue;
            }
            names.push(entry.file_name());
        }
        names.sort();
        Ok(names)
    }
}

/// Place every hook script into git's hooks directory.
///
/// On Unix each hook becomes a symlink to the absolute path of its script, so
/// edits to `hooks/` take effect without reinstalling. On Windows the script is
/// copied. An existing entry with the same name is replaced. A failing hook is
/// logged and skipped; the rest are still installed.
///
/// Returns the names of the hooks that were installed.
pub fn install(layout: &HookLayout) -> Result<Vec<OsString>, InstallError> {
    let names = layout.hook_names()?;
    std::fs::create_dir_all(&layout.target_dir).map_err(|source| InstallError::CreateDir {
        path: layout.target_dir.clone(),
        source,
    })?;

    let mut installed = Vec::new();
    let mut failed = 0;
    for name in &names {
        let dest = layout.target_dir.join(name);
        match install_one(&layout.source_dir.join(name), &dest) {
            Ok(()) => {
                info!(dest = %dest.display(), "Installed {}", Path::new(name).display());
                installed.push(name.clone());
            }
            Err(e) => {
                error!("failed to install {}: {e}", Path::new(name).display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(InstallError::Incomplete {
            action: Action::Install,
            failed,
            total: names.len(),
        });
    }
    Ok(installed)
}

/// Remove the hooks this repository installs from git's hooks directory.
///
/// Only names present in the source directory are touched; git's sample hooks
/// and any other files are left alone. Hooks that are not installed are skipped.
///
/// Returns the names of the hooks that were removed.
pub fn uninstall(layout: &HookLayout) -> Result<Vec<OsString>, InstallError> {
    let names = layout.hook_names()?;

    let mut removed = Vec::new();
    let mut failed = 0;
    for name in &names {
        let dest = layout.target_dir.join(name);
        match std::fs::remove_file(&dest) {
            Ok(()) => {
                info!("Uninstalled {}", Path::new(name).display());
                removed.push(name.clone());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(dest = %dest.display(), "hook not installed, skipping");
            }
            Err(e) => {
                error!("failed to uninstall {}: {e}", Path::new(name).display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(InstallError::Incomplete {
            action: Action::Uninstall,
            failed,
            total: names.len(),
        });
    }
    Ok(removed)
}

fn install_one(source: &Path, dest: &Path) -> io::Result<()> {
    let source = std::fs::canonicalize(source)?;
    // symlink_metadata so a dangling symlink from an older install is still replaced.
    if let Ok(meta) = std::fs::symlink_metadata(dest) {
        // The script itself, reached through the hooks directory: removing it
        // would destroy the only copy.
        if !meta.file_type().is_symlink() && std::fs::canonicalize(dest)? == source {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "hook script is already in the git hooks directory",
            ));
        }
        std::fs::remove_file(dest)?;
    }
    place(&source, dest)
}

#[cfg(unix)]
fn place(source: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, dest)
}

#[cfg(windows)]
fn place(source: &Path, dest: &Path) -> io::Result<()> {
    std::fs::copy(source, dest).map(|_| ())
}

#[cfg(not(any(unix, windows)))]
fn place(_source: &Path, _dest: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "installing hooks is not supported on this platform",
    ))
}
