//! Ink IR - Shared Data Model
//!
//! This crate contains the data structures shared by every stage of the
//! Inkmark annotation engine:
//! - Positions (`Point`, `Position`) in 1-based line / character-column form
//! - Parsed nodes (`Node`, `NodeKind`) handed over by the structural parser
//! - Blocks (`Block`, `BlockKind`, `BlockTable`) bounding incremental reparses
//! - Labels (`Label`, `LabelInterner`, `DecorationLine`) produced per character
//! - Line bookkeeping (`LineIndex`, `split_lines`)
//!
//! # Coordinates
//!
//! Lines are 1-based everywhere. Columns count Unicode scalar values and are
//! 1-based as well; an end column is exclusive, so a node covering the whole
//! line `"# Title"` ends at column 8.

mod block;
mod label;
mod line_index;
mod node;
mod position;
pub mod stack;

pub use block::{Block, BlockKind, BlockTable, BlockTableError};
pub use label::{DecorationLine, Label, LabelInterner, LabelSpan};
pub use line_index::{split_lines, LineIndex};
pub use node::{DefinitionKeys, Node, NodeKind, ReferenceKind};
pub use position::{Point, Position};
