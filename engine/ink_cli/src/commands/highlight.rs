//! The `highlight` command: decorate a file and print its label runs.

use std::io::Write;

use ink_decor::EngineConfig;
use ink_lexer::TokenizerRegistry;
use serde::Serialize;

use super::engine;
use crate::error::CliError;

#[derive(Serialize)]
struct Dump<'a> {
    file: &'a str,
    lines: Vec<LineDump<'a>>,
}

#[derive(Serialize)]
struct LineDump<'a> {
    line: usize,
    text: &'a str,
    runs: Vec<RunDump>,
}

#[derive(Serialize)]
struct RunDump {
    from: usize,
    to: usize,
    label: String,
}

/// Print `line:from..to label` per run, or a JSON dump with `json`.
pub fn write_highlight(
    name: &str,
    text: &str,
    registry: &(dyn TokenizerRegistry + Sync),
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut engine = engine(registry, EngineConfig::full());
    engine.update(text)?;
    let state = engine.state();

    if json {
        let lines = state
            .lines()
            .zip(state.decorations())
            .enumerate()
            .map(|(index, (text, decoration))| LineDump {
                line: index + 1,
                text,
                runs: decoration
                    .runs()
                    .into_iter()
                    .map(|run| RunDump {
                        from: run.from,
                        to: run.to,
                        label: run.label.to_string(),
                    })
                    .collect(),
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &Dump { file: name, lines })?;
        writeln!(out)?;
        return Ok(());
    }

    for (index, decoration) in state.decorations().iter().enumerate() {
        for run in decoration.runs() {
            writeln!(out, "{}:{}..{} {}", index + 1, run.from, run.to, run.label)?;
        }
    }
    Ok(())
}
