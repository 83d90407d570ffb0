//! Incremental Markdown Decoration
//!
//! Turns the full text of a markdown document into per-character style
//! labels ("decorations") on every edit, reparsing only the blocks around the
//! change.
//!
//! # Architecture
//!
//! - [`tracker`] bounds the reparse span to whole blocks
//! - [`decorate`] walks parsed nodes onto per-line label buffers
//! - [`bridge`] flattens code tokenizer output onto code block lines
//! - [`EngineState`] diffs, reparses, decorates and merges
//! - [`Engine`] / [`SharedEngine`] own the collaborators and the state
//!
//! # Example
//!
//! ```
//! use ink_decor::Engine;
//!
//! let mut engine = Engine::new();
//! engine.update("# Title").unwrap();
//! let labels = engine.line_decorations(1).unwrap();
//! assert_eq!(labels.get(0), Some("heading heading-1"));
//! ```

pub mod bridge;
mod buffer;
mod config;
pub mod decorate;
mod engine;
mod error;
mod report;
mod state;
pub mod tracker;

pub use buffer::{LabelBuffer, LineText};
pub use config::EngineConfig;
pub use decorate::ChunkDecorator;
pub use engine::{Engine, SharedEngine};
pub use error::EngineError;
pub use report::{ChangeSummary, UpdateReport};
pub use state::{EngineState, SpanDecorations};
pub use tracker::ReparseSpan;
