//! Command-line arguments.
//!
//! Flags may appear before or after the file paths; anything starting with
//! `--` is a flag, everything else is a path.

use ink_decor::EngineConfig;

/// The subcommand to run.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Highlight,
    Blocks,
    Replay,
    Verify,
    Help,
    Version,
}

impl Command {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "highlight" => Some(Command::Highlight),
            "blocks" => Some(Command::Blocks),
            "replay" => Some(Command::Replay),
            "verify" => Some(Command::Verify),
            "help" | "--help" | "-h" => Some(Command::Help),
            "version" | "--version" | "-V" => Some(Command::Version),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Highlight => "highlight",
            Command::Blocks => "blocks",
            Command::Replay => "replay",
            Command::Verify => "verify",
            Command::Help => "help",
            Command::Version => "version",
        }
    }

    /// Accepted number of file paths as `(min, max)`.
    fn file_count(self) -> (usize, Option<usize>) {
        match self {
            Command::Highlight | Command::Blocks => (1, Some(1)),
            Command::Replay | Command::Verify => (1, None),
            Command::Help | Command::Version => (0, None),
        }
    }
}

/// Flags shared by the commands.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Options {
    /// `--json`: dump decorations as JSON (`highlight` only).
    pub json: bool,
    /// `--no-code`: decorate without code tokenizers.
    pub no_code: bool,
    /// `--full`: reparse the whole document on every update.
    pub full: bool,
    /// `--context=<n>`: context blocks around an edit.
    pub context_blocks: Option<usize>,
}

impl Options {
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default().with_incremental(!self.full);
        if let Some(context) = self.context_blocks {
            config = config.with_context_blocks(context);
        }
        config
    }
}

/// A parsed command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
    pub command: Command,
    pub options: Options,
    pub files: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ArgsError {
    #[error("missing command")]
    MissingCommand,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid context '{0}': expected a number of blocks")]
    InvalidContext(String),
    #[error("option '{option}' does not apply to '{command}'")]
    Inapplicable {
        option: &'static str,
        command: &'static str,
    },
    #[error("'{command}' expects {expected}")]
    FileCount {
        command: &'static str,
        expected: &'static str,
    },
}

/// Parse everything after the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Invocation, ArgsError> {
    let Some((name, rest)) = args.split_first() else {
        return Err(ArgsError::MissingCommand);
    };
    let name = name.as_ref();
    let command = Command::parse(name).ok_or_else(|| ArgsError::UnknownCommand(name.to_owned()))?;

    let mut options = Options::default();
    let mut files = Vec::new();
    for arg in rest {
        let arg = arg.as_ref();
        if let Some(context) = arg.strip_prefix("--context=") {
            let blocks = context
                .parse()
                .map_err(|_| ArgsError::InvalidContext(context.to_owned()))?;
            options.context_blocks = Some(blocks);
        } else if arg == "--json" {
            if command != Command::Highlight {
                return Err(ArgsError::Inapplicable {
                    option: "--json",
                    command: command.name(),
                });
            }
            options.json = true;
        } else if arg == "--no-code" {
            options.no_code = true;
        } else if arg == "--full" {
            options.full = true;
        } else if arg.starts_with("--") {
            return Err(ArgsError::UnknownOption(arg.to_owned()));
        } else {
            files.push(arg.to_owned());
        }
    }

    let (min, max) = command.file_count();
    if files.len() < min || max.is_some_and(|max| files.len() > max) {
        let expected = if max == Some(1) {
            "exactly one file"
        } else {
            "at least one file"
        };
        return Err(ArgsError::FileCount {
            command: command.name(),
            expected,
        });
    }

    Ok(Invocation {
        command,
        options,
        files,
    })
}

#[cfg(test)]
mod tests;
