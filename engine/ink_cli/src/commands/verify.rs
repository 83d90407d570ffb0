//! The `verify` command: type each document one character at a time and
//! check every incremental state against a from-scratch decoration.

use std::io::Write;

use ink_decor::EngineConfig;
use ink_lexer::TokenizerRegistry;
use rayon::prelude::*;
use tracing::debug;

use super::{engine, read_file};
use crate::error::CliError;

/// Result of replaying one document keystroke by keystroke.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VerifyOutcome {
    pub steps: usize,
    pub mismatches: usize,
    /// Text of the first mismatching step.
    pub first_mismatch: Option<String>,
}

/// Type `text` from empty: a newline starts each line after the first, then
/// its characters follow one by one.
pub fn verify_text(
    text: &str,
    registry: &(dyn TokenizerRegistry + Sync),
    config: &EngineConfig,
) -> Result<VerifyOutcome, CliError> {
    let mut engine = engine(registry, config.clone());
    let mut outcome = VerifyOutcome::default();
    let mut typed = String::with_capacity(text.len());

    let mut step = |typed: &str| -> Result<(), CliError> {
        engine.update(typed)?;
        let scratch = engine.decorate_from_scratch(typed)?;
        outcome.steps += 1;
        if !engine.state().same_decorations(&scratch) {
            debug!(step = outcome.steps, "incremental state differs");
            outcome.mismatches += 1;
            outcome.first_mismatch.get_or_insert_with(|| typed.to_owned());
        }
        Ok(())
    };

    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            typed.push('\n');
            step(&typed)?;
        }
        for c in line.chars() {
            typed.push(c);
            step(&typed)?;
        }
    }
    if typed.is_empty() {
        step(&typed)?;
    }
    Ok(outcome)
}

/// Verify every file in parallel and print one line per file in order.
pub(super) fn verify_files(
    paths: &[String],
    registry: &(dyn TokenizerRegistry + Sync),
    config: &EngineConfig,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let outcomes: Vec<Result<VerifyOutcome, CliError>> = paths
        .par_iter()
        .map(|path| verify_text(&read_file(path)?, registry, config))
        .collect();

    let mut mismatches = 0;
    for (path, outcome) in paths.iter().zip(outcomes) {
        let outcome = outcome?;
        mismatches += outcome.mismatches;
        write!(out, "{path}: {} steps, {} mismatches", outcome.steps, outcome.mismatches)?;
        match &outcome.first_mismatch {
            Some(text) => writeln!(out, " (first after {} bytes)", text.len())?,
            None => writeln!(out)?,
        }
    }
    if mismatches > 0 {
        return Err(CliError::Mismatch { count: mismatches });
    }
    Ok(())
}
