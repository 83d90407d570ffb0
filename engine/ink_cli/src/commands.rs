//! Command handlers.
//!
//! Each handler reads its files, runs the engine and writes its report to
//! `out`. The text-level halves (`write_*`, `verify_text`) take document text
//! directly so they can be exercised without touching the filesystem.

use std::io::Write;

use ink_decor::{Engine, EngineConfig};
use ink_lexer::{Languages, NoTokenizers, TokenizerRegistry};
use ink_parse::MarkdownParser;

use crate::args::{Command, Invocation, Options};
use crate::error::CliError;

mod blocks;
mod highlight;
mod replay;
mod verify;

pub use blocks::write_blocks;
pub use highlight::write_highlight;
pub use replay::{write_replay, ReplayStep};
pub use verify::{verify_text, VerifyOutcome};

/// Tokenizer registry selected by `--no-code`.
pub struct Tokenizers {
    languages: Option<Languages>,
}

impl Tokenizers {
    pub fn new(options: &Options) -> Self {
        Tokenizers {
            languages: (!options.no_code).then(Languages::builtin),
        }
    }

    pub fn registry(&self) -> &(dyn TokenizerRegistry + Sync) {
        if let Some(languages) = &self.languages {
            return languages;
        }
        &NoTokenizers
    }
}

/// An engine over a borrowed registry, so one registry serves many engines.
pub type CliEngine<'r> = Engine<MarkdownParser, &'r (dyn TokenizerRegistry + Sync)>;

pub fn engine<'r>(registry: &'r (dyn TokenizerRegistry + Sync), config: EngineConfig) -> CliEngine<'r> {
    Engine::with_parts(MarkdownParser::new(), registry, config)
}

/// Run a file command. `help` and `version` are handled by the binary.
pub fn run(invocation: &Invocation, out: &mut dyn Write) -> Result<(), CliError> {
    let options = &invocation.options;
    let tokenizers = Tokenizers::new(options);
    let registry = tokenizers.registry();
    match invocation.command {
        Command::Highlight => {
            for path in &invocation.files {
                let text = read_file(path)?;
                write_highlight(path, &text, registry, options.json, out)?;
            }
        }
        Command::Blocks => {
            for path in &invocation.files {
                let text = read_file(path)?;
                write_blocks(&text, registry, out)?;
            }
        }
        Command::Replay => {
            let versions = invocation
                .files
                .iter()
                .map(|path| Ok((path.as_str(), read_file(path)?)))
                .collect::<Result<Vec<_>, CliError>>()?;
            let mismatches = write_replay(&versions, registry, options.engine_config(), out)?;
            if mismatches > 0 {
                return Err(CliError::Mismatch { count: mismatches });
            }
        }
        Command::Verify => {
            verify::verify_files(&invocation.files, registry, &options.engine_config(), out)?;
        }
        Command::Help | Command::Version => {}
    }
    Ok(())
}

/// Read a file, mapping I/O failures to a readable message.
pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| {
        let message = match e.kind() {
            std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
            std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
            std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
            _ => format!("error reading '{path}': {e}"),
        };
        CliError::Read(message)
    })
}
