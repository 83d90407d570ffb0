use ink_decor::EngineError;

use crate::args::ArgsError;

/// Failure of a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Args(#[from] ArgsError),

    #[error("{0}")]
    Read(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("cannot encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{count} step(s) differ from a full decoration")]
    Mismatch { count: usize },
}
