//! Block tracker: bounds the reparse span to whole blocks.
//!
//! An edit touches a few old lines. The blocks containing them are the hit
//! blocks; the span grows by a number of non-empty context blocks on each side
//! so that constructs able to merge across a block boundary (two list items
//! becoming one list, a paragraph gaining a setext underline) are reparsed
//! together. Empty gap blocks met on the way are absorbed.

use std::ops::Range;

use ink_ir::{Block, BlockTable};

/// The block range resubmitted to the parser, in both line coordinates.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ReparseSpan {
    /// Indices into the old block table.
    pub blocks: Range<usize>,
    /// First line of the span, identical in old and new text.
    pub from_line: usize,
    /// Last old line of the span (inclusive); `from_line - 1` when empty.
    pub old_to_line: usize,
    /// Last new line of the span (inclusive); `from_line - 1` when empty.
    pub new_to_line: usize,
}

impl ReparseSpan {
    /// Span over the old blocks `blocks`, with the new text `shift` lines
    /// longer (or shorter) than the old.
    pub fn new(table: &BlockTable, blocks: Range<usize>, shift: isize) -> Self {
        let from_line = table.get(blocks.start).map_or(1, |block| block.from_line);
        let old_to_line = blocks
            .end
            .checked_sub(1)
            .filter(|&last| last >= blocks.start)
            .and_then(|last| table.get(last))
            .map_or(from_line - 1, |block| block.to_line);
        let new_to_line = old_to_line
            .checked_add_signed(shift)
            .unwrap_or(0)
            .max(from_line - 1);
        ReparseSpan {
            blocks,
            from_line,
            old_to_line,
            new_to_line,
        }
    }

    /// Span over a whole document.
    pub fn whole(table: &BlockTable, old_line_count: usize, new_line_count: usize) -> Self {
        ReparseSpan {
            blocks: 0..table.len(),
            from_line: 1,
            old_to_line: old_line_count,
            new_to_line: new_line_count,
        }
    }

    pub fn old_line_count(&self) -> usize {
        self.old_to_line + 1 - self.from_line
    }

    pub fn new_line_count(&self) -> usize {
        self.new_to_line + 1 - self.from_line
    }

    /// True when the span runs to the end of the old block table.
    pub fn reaches_end(&self, table: &BlockTable) -> bool {
        self.blocks.end >= table.len()
    }

    /// True when blocks outside the span exist on either side.
    pub fn is_partial(&self, table: &BlockTable) -> bool {
        self.blocks.start > 0 || !self.reaches_end(table)
    }
}

/// Block range covering old lines `[first_line, last_line]` plus
/// `context` non-empty blocks on each side.
pub fn bound_span(
    table: &BlockTable,
    first_line: usize,
    last_line: usize,
    context: usize,
) -> Option<Range<usize>> {
    let first = table.find(first_line)?;
    let last = table.find(last_line)?.max(first);
    let blocks = table.as_slice();
    Some(widen_left(blocks, first, context)..widen_right(blocks, last + 1, context))
}

/// Start index after taking `count` more non-empty blocks to the left.
pub fn widen_left(blocks: &[Block], mut start: usize, count: usize) -> usize {
    let mut remaining = count;
    while remaining > 0 && start > 0 {
        start -= 1;
        if !blocks[start].kind.is_empty() {
            remaining -= 1;
        }
    }
    start
}

/// End index (exclusive) after taking `count` more non-empty blocks to the
/// right.
pub fn widen_right(blocks: &[Block], mut end: usize, count: usize) -> usize {
    let mut remaining = count;
    while remaining > 0 && end < blocks.len() {
        if !blocks[end].kind.is_empty() {
            remaining -= 1;
        }
        end += 1;
    }
    end
}
