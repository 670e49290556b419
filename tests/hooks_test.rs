mod common;

use std::fs;
use std::path::Path;

use common::run_bin;
use tempfile::TempDir;

fn repo_with_pre_push() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("hooks")).unwrap();
    fs::create_dir_all(dir.path().join(".git/hooks")).unwrap();
    fs::write(
        dir.path().join("hooks/pre-push"),
        "#!/bin/sh\nexec prepush-hook pre-push \"$@\"\n",
    )
    .unwrap();
    fs::write(dir.path().join(".git/hooks/pre-commit.sample"), "#!/bin/sh\n").unwrap();
    dir
}

fn installed(repo: &Path, name: &str) -> bool {
    fs::symlink_metadata(repo.join(".git/hooks").join(name)).is_ok()
}

#[test]
fn install_places_hook_and_reports_it() {
    let repo = repo_with_pre_push();
    let result = run_bin(&["hooks", "--install"], Some(repo.path()));

    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert!(result.stderr.contains("INFO - Installed pre-push"));
    assert!(result.stdout.is_empty());
    assert!(installed(repo.path(), "pre-push"));
}

#[cfg(unix)]
#[test]
fn installed_hook_resolves_to_script() {
    let repo = repo_with_pre_push();
    run_bin(&["hooks", "--install"], Some(repo.path()));

    let content = fs::read_to_string(repo.path().join(".git/hooks/pre-push")).unwrap();
    assert!(content.contains("prepush-hook pre-push"));
}

#[test]
fn uninstall_removes_only_managed_hooks() {
    let repo = repo_with_pre_push();
    run_bin(&["hooks", "--install"], Some(repo.path()));

    let result = run_bin(&["hooks", "--uninstall"], Some(repo.path()));

    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert!(result.stderr.contains("INFO - Uninstalled pre-push"));
    assert!(!installed(repo.path(), "pre-push"));
    assert!(installed(repo.path(), "pre-commit.sample"));
}

#[test]
fn failing_hook_is_logged_and_the_rest_installed() {
    let repo = repo_with_pre_push();
    fs::write(repo.path().join("hooks/a-hook"), "#!/bin/sh\n").unwrap();
    fs::create_dir_all(repo.path().join(".git/hooks/a-hook/keep")).unwrap();

    let result = run_bin(&["hooks", "--install"], Some(repo.path()));

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("ERROR - failed to install a-hook"));
    assert!(result.stderr.contains("INFO - Installed pre-push"));
    assert!(result.stderr.contains("1 of 2 hooks could not be installed"));
    assert!(installed(repo.path(), "pre-push"));
}

#[test]
fn hooks_dir_inside_git_hooks_is_left_intact() {
    let repo = repo_with_pre_push();
    fs::write(repo.path().join(".git/hooks/run-tests"), "#!/bin/sh\nexit 0\n").unwrap();

    let result = run_bin(
        &["hooks", "--install", "--hooks-dir", ".git/hooks"],
        Some(repo.path()),
    );

    assert_eq!(result.exit_code, 1);
    assert!(!result.stderr.contains("INFO - Installed run-tests"));
    let content = fs::read_to_string(repo.path().join(".git/hooks/run-tests")).unwrap();
    assert_eq!(content, "#!/bin/sh\nexit 0\n");
}

#[test]
fn install_and_uninstall_together_is_rejected() {
    let repo = repo_with_pre_push();
    let result = run_bin(&["hooks", "--install", "--uninstall"], Some(repo.path()));

    assert_eq!(result.exit_code, 1);
    assert!(result
        .stderr
        .contains("Cannot install and uninstall at the same time."));
    assert!(!installed(repo.path(), "pre-push"));
}

#[test]
fn no_action_is_rejected() {
    let repo = repo_with_pre_push();
    let result = run_bin(&["hooks"], Some(repo.path()));

    assert_eq!(result.exit_code, 1);
    assert!(result
        .stderr
        .contains("No action specified. Use --install or --uninstall."));
}

#[test]
fn missing_hooks_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_bin(&["hooks", "--install"], Some(dir.path()));

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("failed to read hooks directory"));
}

#[test]
fn custom_directories() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("scripts/git")).unwrap();
    fs::write(dir.path().join("scripts/git/pre-push"), "#!/bin/sh\n").unwrap();

    let result = run_bin(
        &[
            "hooks",
            "--install",
            "--hooks-dir",
            "scripts/git",
            "--git-dir",
            "worktree-git",
        ],
        Some(dir.path()),
    );

    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert!(dir.path().join("worktree-git/hooks/pre-push").exists());
}
