//! Inkmark command line.
//!
//! `ink highlight`, `ink blocks`, `ink replay` and `ink verify` drive the
//! decoration engine over markdown files. The binary in `main.rs` only parses
//! arguments and reports errors; the commands live in [`commands`].

pub mod args;
pub mod commands;
mod error;

use std::sync::Once;

pub use args::{parse_args, ArgsError, Command, Invocation, Options};
pub use error::CliError;

static TRACING_INIT: Once = Once::new();

/// Install a tree-shaped `tracing` subscriber on stderr.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=ink_decor=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true),
                )
                .init();
        }
    });
}
