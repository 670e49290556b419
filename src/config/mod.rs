mod kdl;

use std::path::{Path, PathBuf};

use tracing::Level;

use self::kdl::{parse_document, KdlSource, SettingNode};
use crate::command::TestCommand;
use crate::logging;

/// Name of the top-level KDL block holding the hook's settings.
const SECTION: &str = "pre-push";

/// Hook settings, loaded from a KDL file passed with `--config`.
///
/// ```kdl
/// pre-push {
///     command "go test -race ./..."
///     log-level "info"
/// }
/// ```
///
/// Every setting is optional; the defaults are `go test -v ./...` at `debug`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub command: TestCommand,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command: TestCommand::default(),
            log_level: logging::DEFAULT_LEVEL,
        }
    }
}

/// Errors that can occur when loading or parsing a config file.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    #[diagnostic(
        code(prepush_hook::config::not_found),
        help("pass an existing file to --config, or omit it to run `go test -v ./...`")
    )]
    NotFound(PathBuf),
    #[error("failed to read config: {0}")]
    #[diagnostic(code(prepush_hook::config::read))]
    ReadError(#[from] std::io::Error),
    #[error("invalid KDL syntax: {0}")]
    #[diagnostic(code(prepush_hook::config::syntax))]
    ParseError(String),
    #[error("invalid config at line {line}: {message}")]
    #[diagnostic(code(prepush_hook::config::invalid))]
    ValidationError { line: usize, message: String },
}

impl Config {
    /// Load a config from a KDL file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::ReadError(e)
            }
        })?;
        Self::parse(&content)
    }

    /// Parse a KDL string into a Config.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let doc = parse_document(content)?;
        Self::from_source(&KdlSource::new(&doc, content))
    }

    fn from_source(source: &KdlSource<'_>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let Some(section) = source.section(SECTION) else {
            return Ok(config);
        };

        for node in section.nodes() {
            match node.name() {
                "command" => {
                    let line = single_string(&node, "command")?;
                    config.command = TestCommand::parse(line)
                        .map_err(|e| node.invalid(format!("command: {e}")))?;
                }
                "log-level" => {
                    let name = single_string(&node, "log-level")?;
                    config.log_level = logging::parse_level(name).ok_or_else(|| {
                        node.invalid(format!(
                            "unknown log level `{name}` (expected error, warn, info, debug or trace)"
                        ))
                    })?;
                }
                other => return Err(node.invalid(format!("unknown setting `{other}`"))),
            }
        }

        Ok(config)
    }
}

fn single_string<'a>(node: &SettingNode<'a>, setting: &str) -> Result<&'a str, ConfigError> {
    match node.string_values().as_slice() {
        [value] if node.entry_count() == 1 => Ok(*value),
        _ => Err(node.invalid(format!("`{setting}` takes exactly one string value"))),
    }
}
