//! Engine errors.

use ink_ir::BlockTableError;
use ink_parse::ParseError;

/// Failure of an engine update or of a state check.
///
/// Only [`EngineError::Parse`] can come out of an update; the other variants
/// are reported by [`EngineState::validate`](crate::EngineState::validate)
/// and always indicate an engine bug.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("block table is broken: {0}")]
    BlockTable(#[from] BlockTableError),

    #[error("{lines} lines but {decorations} decoration lines and {flags} flags")]
    LineCount {
        lines: usize,
        decorations: usize,
        flags: usize,
    },

    #[error("line {line} has {chars} characters but {labels} labels")]
    LineLength {
        line: usize,
        chars: usize,
        labels: usize,
    },
}
