//! The `blocks` command: print the block table of a file.

use std::io::Write;

use ink_decor::EngineConfig;
use ink_lexer::TokenizerRegistry;

use super::engine;
use crate::error::CliError;

pub fn write_blocks(
    text: &str,
    registry: &(dyn TokenizerRegistry + Sync),
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut engine = engine(registry, EngineConfig::full());
    engine.update(text)?;
    for block in engine.state().blocks().iter() {
        writeln!(out, "{block}")?;
    }
    Ok(())
}
