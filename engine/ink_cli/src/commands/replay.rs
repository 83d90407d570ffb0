//! The `replay` command: feed successive versions of a document through one
//! engine and report what each update did.

use std::io::Write;

use ink_decor::{EngineConfig, UpdateReport};
use ink_lexer::TokenizerRegistry;

use super::engine;
use crate::error::CliError;

/// Outcome of one replayed version.
#[derive(Clone, Debug)]
pub struct ReplayStep {
    pub report: UpdateReport,
    /// The incremental state equals a from-scratch decoration.
    pub matches: bool,
}

impl ReplayStep {
    fn describe(&self) -> String {
        let report = &self.report;
        let Some(span) = &report.span else {
            return "unchanged".to_owned();
        };
        let mut line = format!(
            "span {}..{} shift {:+} recomputed {} reused {}",
            span.from_line, span.new_to_line, report.shift, report.recomputed_lines, report.reused_lines
        );
        if report.convergence_passes > 0 {
            line.push_str(&format!(" passes {}", report.convergence_passes));
        }
        if report.full_reparse {
            line.push_str(" full");
        }
        line
    }
}

/// Replay `versions` (name, text) in order. Returns the number of versions
/// whose incremental result differs from a full decoration.
pub fn write_replay(
    versions: &[(&str, String)],
    registry: &(dyn TokenizerRegistry + Sync),
    config: EngineConfig,
    out: &mut dyn Write,
) -> Result<usize, CliError> {
    let mut engine = engine(registry, config);
    let mut mismatches = 0;
    for (name, text) in versions {
        let report = engine.update(text)?;
        let scratch = engine.decorate_from_scratch(text)?;
        let step = ReplayStep {
            report,
            matches: engine.state().same_decorations(&scratch),
        };
        if !step.matches {
            mismatches += 1;
        }
        let verdict = if step.matches { "ok" } else { "MISMATCH" };
        writeln!(out, "{name}: {} {verdict}", step.describe())?;
    }
    Ok(mismatches)
}
