// Shared test helpers for integration tests.
#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

pub fn binary_path() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_prepush-hook"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

/// Output of one binary run.
pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl RunResult {
    /// Log lines, i.e. stderr lines in the `[:] <pid> - LEVEL - message` format.
    pub fn log_lines(&self) -> Vec<&str> {
        self.stderr
            .lines()
            .filter(|line| line.starts_with("[:] "))
            .collect()
    }
}

/// Runs the binary with the given args in `cwd` (the test's cwd if `None`).
pub fn run_bin(args: &[&str], cwd: Option<&Path>) -> RunResult {
    let mut cmd = Command::new(binary_path());
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(cwd) = cwd {
        cmd.current_dir(cwd);
    }
    let output = cmd.output().expect("failed to execute binary");

    RunResult {
        stdout: String::from_utf8(output.stdout).expect("stdout not valid UTF-8"),
        stderr: String::from_utf8(output.stderr).expect("stderr not valid UTF-8"),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

pub fn write_config(content: &str) -> NamedTempFile {
    let mut tmpfile = NamedTempFile::new().expect("failed to create temp config");
    tmpfile
        .write_all(content.as_bytes())
        .expect("failed to write config");
    tmpfile
}

/// Runs `pre-push` with a config whose test command is `command`.
pub fn run_pre_push_with_command(command: &str, extra_args: &[&str]) -> RunResult {
    let config = write_config(&format!("pre-push {{\n    command \"{command}\"\n}}\n"));
    let config_path = config.path().to_str().unwrap().to_string();
    let mut args = vec!["pre-push"];
    args.extend_from_slice(extra_args);
    args.extend_from_slice(&["--config", config_path.as_str()]);
    run_bin(&args, None)
}
