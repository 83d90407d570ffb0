//! Blocks: the line-range units that bound incremental reparsing.
//!
//! A [`BlockTable`] covers every line of the document with ordered,
//! contiguous, non-overlapping blocks. Lines not claimed by a top-level node
//! form `Empty` blocks. After an edit, blocks inside the reparse span are
//! replaced and every block after it moves by the line delta through
//! [`BlockTable::shift_after`].
//!
//! Each block also records the definition keys found anywhere inside it, so
//! the engine can hand out-of-span definitions to a partial reparse and notice
//! when an edit adds or removes one.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::node::{DefinitionKeys, Node, NodeKind};

/// What occupies a block's lines.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum BlockKind {
    /// Blank lines between top-level nodes.
    Empty,
    /// A top-level node, by class name.
    Node(&'static str),
    /// A top-level link definition with its normalized identifier.
    Definition(Arc<str>),
}

impl BlockKind {
    /// Block kind for a top-level node.
    pub fn of(node: &Node) -> Self {
        match &node.kind {
            NodeKind::Definition { identifier, .. } => {
                BlockKind::Definition(Arc::from(identifier.as_str()))
            }
            kind => BlockKind::Node(kind.name()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Empty => "empty",
            BlockKind::Node(name) => *name,
            BlockKind::Definition(_) => "definition",
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, BlockKind::Empty)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Definition(key) => write!(f, "definition[{key}]"),
            kind => f.write_str(kind.name()),
        }
    }
}

/// Inclusive line range `[from_line, to_line]` tagged with its kind.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Block {
    pub kind: BlockKind,
    pub from_line: usize,
    pub to_line: usize,
    /// Link and footnote definition keys inside the block, nested ones
    /// included.
    pub definitions: DefinitionKeys,
}

impl Block {
    pub fn new(kind: BlockKind, from_line: usize, to_line: usize) -> Self {
        Block {
            kind,
            from_line,
            to_line,
            definitions: DefinitionKeys::new(),
        }
    }

    /// Block for a top-level node clipped to `[from_line, to_line]`.
    pub fn of(node: &Node, from_line: usize, to_line: usize) -> Self {
        Block {
            kind: BlockKind::of(node),
            from_line,
            to_line,
            definitions: node.definition_keys(),
        }
    }

    pub fn empty(from_line: usize, to_line: usize) -> Self {
        Block::new(BlockKind::Empty, from_line, to_line)
    }

    #[inline]
    pub fn contains(&self, line: usize) -> bool {
        self.from_line <= line && line <= self.to_line
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.to_line + 1 - self.from_line
    }

    #[must_use]
    pub fn shifted(&self, delta: isize) -> Self {
        Block {
            kind: self.kind.clone(),
            from_line: self.from_line.saturating_add_signed(delta),
            to_line: self.to_line.saturating_add_signed(delta),
            definitions: self.definitions.clone(),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}..{}", self.kind, self.from_line, self.to_line)
    }
}

/// Broken block-table invariant. Always indicates an engine bug.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BlockTableError {
    #[error("first block starts at line {line}, expected line 1")]
    FirstLine { line: usize },
    #[error("block {index} has inverted range {from}..{to}")]
    Inverted { index: usize, from: usize, to: usize },
    #[error("gap between line {after} and block {index} starting at line {next}")]
    Gap {
        index: usize,
        after: usize,
        next: usize,
    },
    #[error("block {index} starting at line {next} overlaps previous block ending at {after}")]
    Overlap {
        index: usize,
        after: usize,
        next: usize,
    },
    #[error("blocks cover {covered} lines, document has {expected}")]
    Coverage { covered: usize, expected: usize },
}

/// Ordered, contiguous block list addressed by index.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BlockTable {
    blocks: Vec<Block>,
}

impl BlockTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        BlockTable { blocks }
    }

    /// Blocks covering exactly `[from_line, to_line]` for the given top-level
    /// nodes. Uncovered lines become `Empty` blocks; nodes that share a line
    /// with the previous node are folded into its block.
    pub fn cover(nodes: &[Node], from_line: usize, to_line: usize) -> Vec<Block> {
        let mut blocks: Vec<Block> = Vec::new();
        if to_line < from_line {
            return blocks;
        }
        let mut next = from_line;
        for node in nodes {
            let start = node.position.start.line.max(from_line);
            let end = node.position.end.line.min(to_line);
            if end < start {
                continue;
            }
            if start < next {
                if let Some(last) = blocks.last_mut() {
                    last.to_line = last.to_line.max(end);
                    last.definitions.extend(node.definition_keys());
                    next = last.to_line + 1;
                }
                continue;
            }
            if start > next {
                blocks.push(Block::empty(next, start - 1));
            }
            blocks.push(Block::of(node, start, end));
            next = end + 1;
        }
        if next <= to_line {
            blocks.push(Block::empty(next, to_line));
        }
        blocks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    /// Last covered line, or 0 for an empty table.
    pub fn last_line(&self) -> usize {
        self.blocks.last().map_or(0, |block| block.to_line)
    }

    /// Index of the block containing `line`, clamped to the last block for
    /// lines past the end.
    pub fn find(&self, line: usize) -> Option<usize> {
        if self.blocks.is_empty() {
            return None;
        }
        let index = self.blocks.partition_point(|block| block.to_line < line);
        Some(index.min(self.blocks.len() - 1))
    }

    /// Move every block strictly after `index` by `delta` lines.
    pub fn shift_after(&mut self, index: usize, delta: isize) {
        self.shift_from(index + 1, delta);
    }

    /// Move every block at or after `start` by `delta` lines.
    pub fn shift_from(&mut self, start: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        for block in self.blocks.iter_mut().skip(start) {
            block.from_line = block.from_line.saturating_add_signed(delta);
            block.to_line = block.to_line.saturating_add_signed(delta);
        }
    }

    /// Replace the blocks at `range` with `replacement`.
    pub fn splice(&mut self, range: Range<usize>, replacement: Vec<Block>) {
        self.blocks.splice(range, replacement);
    }

    /// Check contiguity and coverage of exactly `line_count` lines.
    pub fn validate(&self, line_count: usize) -> Result<(), BlockTableError> {
        let mut expected = 1;
        for (index, block) in self.blocks.iter().enumerate() {
            if index == 0 && block.from_line != 1 {
                return Err(BlockTableError::FirstLine {
                    line: block.from_line,
                });
            }
            if block.to_line < block.from_line {
                return Err(BlockTableError::Inverted {
                    index,
                    from: block.from_line,
                    to: block.to_line,
                });
            }
            if block.from_line > expected {
                return Err(BlockTableError::Gap {
                    index,
                    after: expected - 1,
                    next: block.from_line,
                });
            }
            if block.from_line < expected {
                return Err(BlockTableError::Overlap {
                    index,
                    after: expected - 1,
                    next: block.from_line,
                });
            }
            expected = block.to_line + 1;
        }
        let covered = expected - 1;
        if covered == line_count {
            Ok(())
        } else {
            Err(BlockTableError::Coverage {
                covered,
                expected: line_count,
            })
        }
    }
}

impl<'a> IntoIterator for &'a BlockTable {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
