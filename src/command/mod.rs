use std::fmt;
use std::process::{Command, Stdio};

use brush_parser::ast;
use brush_parser::word::{WordPiece, WordPieceWithSource};
use brush_parser::ParserOptions;

/// Command line the hook runs when no config overrides it.
pub const DEFAULT_TEST_COMMAND: &str = "go test -v ./...";

/// A single program invocation: the test suite command the hook runs.
///
/// Always holds a non-empty program name. The program is executed directly,
/// never through a shell, so only plain words are accepted when parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCommand {
    program: String,
    args: Vec<String>,
}

/// Error returned when a test command cannot be built from its input.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("test command is empty")]
    Empty,
    #[error("invalid command syntax: {0}")]
    Syntax(String),
    #[error("test command must be a single program invocation, found {0}")]
    Unsupported(&'static str),
}

impl TestCommand {
    /// Build a command from a program name and its arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = program.into();
        if program.trim().is_empty() {
            return Err(CommandError::Empty);
        }
        Ok(Self {
            program,
            args: args.into_iter().map(Into::into).collect(),
        })
    }

    /// Parse a command line such as `go test -v ./...`.
    ///
    /// Uses brush-parser so quoting behaves the way it does in a shell:
    /// `go test -run 'TestA|TestB'` yields a single `TestA|TestB` argument and
    /// `Test\ A` yields `Test A`. Anything a shell would expand (`$VAR`,
    /// `$(...)`, backquotes, `$((...))`, `~`) is rejected, as are pipelines,
    /// `&&`/`||` chains, lists, redirections, subshells and leading
    /// `VAR=value` assignments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        if line.trim().is_empty() {
            return Err(CommandError::Empty);
        }

        let mut parser = brush_parser::Parser::builder()
            .reader(std::io::Cursor::new(line.to_string()))
            .build();

        let program = parser
            .parse_program()
            .map_err(|e| CommandError::Syntax(e.to_string()))?;

        let simple = single_simple_command(&program)?;
        if simple.prefix.is_some() {
            return Err(CommandError::Unsupported("an environment assignment"));
        }

        let options = ParserOptions::default();
        let name = match &simple.word_or_name {
            Some(word) => unquote(&word.flatten(), &options)?,
            None => return Err(CommandError::Empty),
        };

        let mut args = Vec::new();
        if let Some(suffix) = &simple.suffix {
            for item in &suffix.0 {
                match item {
                    ast::CommandPrefixOrSuffixItem::Word(word) => {
                        args.push(unquote(&word.flatten(), &options)?);
                    }
                    _ => return Err(CommandError::Unsupported("a redirection or substitution")),
                }
            }
        }

        Self::new(name, args)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Build the child process with stdin, stdout and stderr inherited,
    /// so the test runner's own output reaches the user verbatim.
    pub fn to_process(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }
}

impl Default for TestCommand {
    fn default() -> Self {
        let mut words = DEFAULT_TEST_COMMAND.split_whitespace().map(String::from);
        Self {
            program: words.next().unwrap_or_default(),
            args: words.collect(),
        }
    }
}

impl fmt::Display for TestCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

fn single_simple_command(program: &ast::Program) -> Result<&ast::SimpleCommand, CommandError> {
    // CompleteCommand = CompoundList, CompoundList.0 = Vec<CompoundListItem>
    let [complete_command] = program.complete_commands.as_slice() else {
        return Err(CommandError::Unsupported("a command list"));
    };
    let [item] = complete_command.0.as_slice() else {
        return Err(CommandError::Unsupported("a command list"));
    };

    let and_or = &item.0;
    if !and_or.additional.is_empty() {
        return Err(CommandError::Unsupported("an && or || chain"));
    }

    let [command] = and_or.first.seq.as_slice() else {
        return Err(CommandError::Unsupported("a pipeline"));
    };

    match command {
        ast::Command::Simple(simple) => Ok(simple),
        ast::Command::Compound(..) => Err(CommandError::Unsupported("a compound command")),
        ast::Command::Function(_) => Err(CommandError::Unsupported("a function definition")),
        ast::Command::ExtendedTest(_) => Err(CommandError::Unsupported("a [[ ]] test")),
    }
}

/// Resolve a raw word to the literal argument a shell would pass.
///
/// brush-parser keeps the raw text of a word, quotes included, so the word is
/// split into pieces and each piece is unquoted. Pieces that need expansion
/// have no literal value without a shell and are rejected.
fn unquote(raw: &str, options: &ParserOptions) -> Result<String, CommandError> {
    let pieces = brush_parser::word::parse(raw, options)
        .map_err(|e| CommandError::Syntax(e.to_string()))?;
    let mut out = String::new();
    push_pieces(&pieces, &mut out)?;
    Ok(out)
}

fn push_pieces(pieces: &[WordPieceWithSource], out: &mut String) -> Result<(), CommandError> {
    for piece in pieces {
        match &piece.piece {
            WordPiece::Text(text) | WordPiece::SingleQuotedText(text) => out.push_str(text),
            // `\x` stands for `x`.
            WordPiece::EscapeSequence(escaped) => out.push_str(escaped.get(1..).unwrap_or("")),
            WordPiece::DoubleQuotedSequence(inner) => push_pieces(inner, out)?,
            WordPiece::AnsiCQuotedText(_) => return Err(CommandError::Unsupported("$'...' quoting")),
            WordPiece::GettextDoubleQuotedSequence(_) => {
                return Err(CommandError::Unsupported("$\"...\" quoting"))
            }
            WordPiece::TildePrefix(_) => return Err(CommandError::Unsupported("a tilde expansion")),
            WordPiece::ParameterExpansion(_) => {
                return Err(CommandError::Unsupported("a parameter expansion"))
            }
            WordPiece::CommandSubstitution(_) | WordPiece::BackquotedCommandSubstitution(_) => {
                return Err(CommandError::Unsupported("a command substitution"))
            }
            WordPiece::ArithmeticExpression(_) => {
                return Err(CommandError::Unsupported("an arithmetic expansion"))
            }
        }
    }
    Ok(())
}
