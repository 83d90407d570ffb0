//! Engine state and the incremental update.
//!
//! [`EngineState`] is a value: [`EngineState::update`] takes the previous
//! state and the full new text and returns the next state, leaving the
//! previous one untouched. A failed update therefore never leaves partially
//! merged tables behind.
//!
//! # Update Pipeline
//!
//! 1. Diff the old and new lines.
//! 2. Bound the reparse span to whole blocks around the touched lines.
//! 3. Parse the span together with the out-of-span blocks holding link or
//!    footnote definitions, and rebuild its blocks. Grow the span leftwards
//!    until its head block parses as before and rightwards until its tail
//!    block matches the old tail, or fall back to a whole-document parse.
//! 4. Decorate every span line, reusing old label arrays where a kept line
//!    came out identical.
//! 5. Splice lines, labels, flags and blocks into the new state and shift the
//!    trailing blocks.

use std::ops::Range;
use std::sync::Arc;

use ink_diff::LineDiff;
use ink_ir::{split_lines, Block, BlockTable, DecorationLine, LabelInterner, Node};
use ink_lexer::TokenizerRegistry;
use ink_parse::StructuralParser;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::buffer::LabelBuffer;
use crate::config::EngineConfig;
use crate::decorate::ChunkDecorator;
use crate::error::EngineError;
use crate::report::{ChangeSummary, UpdateReport};
use crate::tracker::{self, ReparseSpan};

/// Lines, blocks and per-line labels of one document version.
#[derive(Clone, Debug, Default)]
pub struct EngineState {
    lines: Vec<Arc<str>>,
    blocks: BlockTable,
    decorations: Vec<DecorationLine>,
    decorated: Vec<bool>,
}

/// Top-level nodes of a span parse, in document lines.
struct SpanParse {
    nodes: Vec<Node>,
    /// A node from the text put in front of the span ran into the span.
    bled: bool,
}

/// Freshly computed blocks, labels and flags for a reparse span.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SpanDecorations {
    pub blocks: Vec<Block>,
    pub decorations: Vec<DecorationLine>,
    pub decorated: Vec<bool>,
}

impl EngineState {
    /// The state before the first text: no lines, no blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decorate `text` from scratch.
    pub fn from_text<P, R>(text: &str, parser: &P, registry: &R) -> Result<Self, EngineError>
    where
        P: StructuralParser + ?Sized,
        R: TokenizerRegistry,
    {
        Self::new()
            .update(text, parser, registry, &EngineConfig::full())
            .map(|(state, _)| state)
    }

    /// Compute the state for `text`, the full document after an edit.
    ///
    /// On a parser failure the error is returned and `self` stays the last
    /// valid state.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = text.len()))]
    pub fn update<P, R>(
        &self,
        text: &str,
        parser: &P,
        registry: &R,
        config: &EngineConfig,
    ) -> Result<(EngineState, UpdateReport), EngineError>
    where
        P: StructuralParser + ?Sized,
        R: TokenizerRegistry,
    {
        let new_lines = split_lines(text);
        let diff = (!self.lines.is_empty()).then(|| LineDiff::compute(&self.lines, &new_lines));
        Reparse {
            old: self,
            new_lines: &new_lines,
            diff: diff.as_ref(),
            parser,
            registry,
            config,
        }
        .run()
    }

    /// Splice freshly decorated span lines and blocks into a copy of this
    /// state. Everything before the span is kept as is; everything after it
    /// is kept with its blocks shifted by the line delta.
    pub fn merge(&self, new_lines: &[&str], span: &ReparseSpan, fresh: SpanDecorations) -> Self {
        let shift = line_delta(new_lines.len(), self.lines.len());
        let head = span.from_line - 1;
        let tail = span.old_to_line;

        let lines = new_lines
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let old = if index < head {
                    Some(index)
                } else if index >= span.new_to_line {
                    index.checked_add_signed(-shift)
                } else {
                    None
                };
                match old.and_then(|old| self.lines.get(old)) {
                    Some(line) if **line == **text => Arc::clone(line),
                    _ => Arc::from(*text),
                }
            })
            .collect();

        let mut decorations = Vec::with_capacity(new_lines.len());
        decorations.extend_from_slice(self.decorations.get(..head).unwrap_or_default());
        decorations.extend(fresh.decorations);
        decorations.extend_from_slice(self.decorations.get(tail..).unwrap_or_default());

        let mut decorated = Vec::with_capacity(new_lines.len());
        decorated.extend_from_slice(self.decorated.get(..head).unwrap_or_default());
        decorated.extend(fresh.decorated);
        decorated.extend_from_slice(self.decorated.get(tail..).unwrap_or_default());

        let mut blocks = self.blocks.clone();
        let inserted = fresh.blocks.len();
        blocks.splice(span.blocks.clone(), fresh.blocks);
        blocks.shift_from(span.blocks.start + inserted, shift);

        let state = EngineState {
            lines,
            blocks,
            decorations,
            decorated,
        };
        debug_assert_eq!(state.validate(), Ok(()));
        state
    }

    /// Check the coverage and block invariants.
    pub fn validate(&self) -> Result<(), EngineError> {
        let lines = self.lines.len();
        if self.decorations.len() != lines || self.decorated.len() != lines {
            return Err(EngineError::LineCount {
                lines,
                decorations: self.decorations.len(),
                flags: self.decorated.len(),
            });
        }
        for (index, (text, labels)) in self.lines.iter().zip(&self.decorations).enumerate() {
            let chars = text.chars().count();
            if chars != labels.len() {
                return Err(EngineError::LineLength {
                    line: index + 1,
                    chars,
                    labels: labels.len(),
                });
            }
        }
        self.blocks.validate(lines)?;
        Ok(())
    }

    /// True before the first update.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(|line| &**line)
    }

    /// Text of 1-based `line`.
    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line.checked_sub(1)?).map(|text| &**text)
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn blocks(&self) -> &BlockTable {
        &self.blocks
    }

    pub fn decorations(&self) -> &[DecorationLine] {
        &self.decorations
    }

    /// Labels of 1-based `line`, without acknowledging them.
    pub fn decoration(&self, line: usize) -> Option<&DecorationLine> {
        self.decorations.get(line.checked_sub(1)?)
    }

    pub fn decorated(&self) -> &[bool] {
        &self.decorated
    }

    /// Labels of 1-based `line`, marking the line as decorated.
    pub fn line_decorations(&mut self, line: usize) -> Option<DecorationLine> {
        let index = line.checked_sub(1)?;
        let labels = self.decorations.get(index)?.clone();
        if let Some(flag) = self.decorated.get_mut(index) {
            *flag = true;
        }
        Some(labels)
    }

    /// True when every line is label-free, unchanged since it was last
    /// read, or has been read through [`EngineState::line_decorations`].
    ///
    /// A reused line keeps its previous flag, so a labeled line that was
    /// never read stays pending even when an edit provably left it alone.
    pub fn is_fully_decorated(&self) -> bool {
        self.decorated.iter().all(|&flag| flag)
    }

    /// Same text, blocks and labels.
    pub fn same_decorations(&self, other: &EngineState) -> bool {
        self.lines == other.lines
            && self.blocks == other.blocks
            && self.decorations == other.decorations
    }
}

/// One update in flight.
struct Reparse<'a, P: ?Sized, R> {
    old: &'a EngineState,
    new_lines: &'a [&'a str],
    diff: Option<&'a LineDiff>,
    parser: &'a P,
    registry: &'a R,
    config: &'a EngineConfig,
}

impl<P, R> Reparse<'_, P, R>
where
    P: StructuralParser + ?Sized,
    R: TokenizerRegistry,
{
    fn run(&self) -> Result<(EngineState, UpdateReport), EngineError> {
        let Some(diff) = self.diff else {
            return self.whole(ChangeSummary::initial(self.new_lines.len()), 0);
        };
        let change = ChangeSummary::of(diff);
        if diff.is_unchanged() {
            let report = UpdateReport {
                change,
                ..UpdateReport::unchanged(self.new_lines.len())
            };
            return Ok((self.old.clone(), report));
        }

        let blocks = &self.old.blocks;
        let touched = if self.config.incremental {
            diff.touched_old_lines()
        } else {
            None
        };
        let bounded = touched.and_then(|(first, last)| {
            tracker::bound_span(blocks, first, last, self.config.context_blocks)
                .map(|range| (first, range))
        });
        let Some((first_touched, mut range)) = bounded else {
            return self.whole(change, 0);
        };

        let shift = diff.shift();
        let mut passes = 0;
        loop {
            let span = ReparseSpan::new(blocks, range.clone(), shift);
            let parsed = self.parse(&span)?;
            let fresh = BlockTable::cover(&parsed.nodes, span.from_line, span.new_to_line);

            let grow_left = range.start > 0
                && (parsed.bled || !self.head_matches(&span, &fresh, first_touched));
            let grow_right =
                !span.reaches_end(blocks) && !self.tail_matches(&span, &fresh, shift);
            if grow_left || grow_right {
                if passes >= self.config.max_convergence_passes {
                    debug!(passes, "span reparse did not converge, parsing whole document");
                    return self.whole(change, passes);
                }
                passes += 1;
                if grow_left {
                    range.start = tracker::widen_left(blocks.as_slice(), range.start, 1);
                }
                if grow_right {
                    range.end = tracker::widen_right(blocks.as_slice(), range.end, 1);
                }
                trace!(
                    pass = passes,
                    blocks = ?range,
                    grow_left,
                    grow_right,
                    "widening reparse span"
                );
                continue;
            }

            let old_span = blocks.as_slice().get(range.clone()).unwrap_or_default();
            if span.is_partial(blocks) && definitions_changed(old_span, &fresh) {
                debug!("definitions changed, parsing whole document");
                return self.whole(change, passes);
            }

            return Ok(self.finish(change, span, &parsed.nodes, fresh, passes, false));
        }
    }

    fn whole(
        &self,
        change: ChangeSummary,
        passes: usize,
    ) -> Result<(EngineState, UpdateReport), EngineError> {
        let span = ReparseSpan::whole(
            &self.old.blocks,
            self.old.lines.len(),
            self.new_lines.len(),
        );
        let parsed = self.parse(&span)?;
        let fresh = BlockTable::cover(&parsed.nodes, span.from_line, span.new_to_line);
        Ok(self.finish(change, span, &parsed.nodes, fresh, passes, true))
    }

    /// Parse the span's new lines into top-level nodes in document lines.
    ///
    /// For a partial span, every outside block holding a definition is parsed
    /// along with it so references resolve as in a full parse: blocks before
    /// the span go in front of it, blocks after it follow it. A blank line
    /// separates each of them from the rest, except for the block directly
    /// before the span, which keeps its real adjacency.
    fn parse(&self, span: &ReparseSpan) -> Result<SpanParse, EngineError> {
        let with_definitions =
            self.config.reference_preamble && span.is_partial(&self.old.blocks);
        let mut source = String::new();
        let mut preamble_lines = 0;
        if with_definitions {
            for (index, block) in self.definition_blocks(0..span.blocks.start) {
                for line in self.old_lines(block) {
                    source.push_str(line);
                    source.push('\n');
                    preamble_lines += 1;
                }
                if index + 1 != span.blocks.start {
                    source.push('\n');
                    preamble_lines += 1;
                }
            }
        }

        let lines = self
            .new_lines
            .get(span.from_line - 1..span.new_to_line)
            .unwrap_or_default();
        source.push_str(&lines.join("\n"));

        if with_definitions {
            for (_, block) in self.definition_blocks(span.blocks.end..self.old.blocks.len()) {
                source.push('\n');
                for line in self.old_lines(block) {
                    source.push('\n');
                    source.push_str(line);
                }
            }
        }

        let nodes = self.parser.parse(&source)?;
        let last_span_line = preamble_lines + lines.len();
        let bled = nodes.iter().any(|node| {
            node.position.start.line <= preamble_lines && node.position.end.line > preamble_lines
        });
        let offset = line_delta(span.from_line - 1, preamble_lines);
        let nodes = nodes
            .into_iter()
            .filter(|node| {
                (preamble_lines + 1..=last_span_line).contains(&node.position.start.line)
            })
            .map(|mut node| {
                node.shift_lines(offset);
                node
            })
            .collect();
        Ok(SpanParse { nodes, bled })
    }

    /// Old blocks in `range` that hold at least one definition.
    fn definition_blocks(
        &self,
        range: Range<usize>,
    ) -> impl Iterator<Item = (usize, &Block)> + '_ {
        let start = range.start;
        self.old
            .blocks
            .as_slice()
            .get(range)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter(|(_, block)| !block.definitions.is_empty())
            .map(move |(offset, block)| (start + offset, block))
    }

    fn old_lines(&self, block: &Block) -> &[Arc<str>] {
        self.old
            .lines
            .get(block.from_line - 1..block.to_line)
            .unwrap_or_default()
    }

    /// The span's first block came out as it was. A first block the edit
    /// touched says nothing about the context before it.
    fn head_matches(&self, span: &ReparseSpan, fresh: &[Block], first_touched: usize) -> bool {
        match self.old.blocks.get(span.blocks.start) {
            Some(old_head) if old_head.to_line < first_touched => fresh.first() == Some(old_head),
            _ => false,
        }
    }

    fn tail_matches(&self, span: &ReparseSpan, fresh: &[Block], shift: isize) -> bool {
        let old_tail = span
            .blocks
            .end
            .checked_sub(1)
            .and_then(|last| self.old.blocks.get(last))
            .map(|block| block.shifted(shift));
        fresh.last() == old_tail.as_ref()
    }

    fn finish(
        &self,
        change: ChangeSummary,
        span: ReparseSpan,
        nodes: &[Node],
        blocks: Vec<Block>,
        passes: usize,
        full_reparse: bool,
    ) -> (EngineState, UpdateReport) {
        let (fresh, recomputed) = self.decorate(&span, nodes, blocks);
        let state = self.old.merge(self.new_lines, &span, fresh);
        let shift = line_delta(self.new_lines.len(), self.old.lines.len());

        debug!(
            change_start = ?change.change_start_line,
            added = change.lines_added,
            removed = change.lines_removed,
            from = span.from_line,
            to = span.new_to_line,
            shift,
            recomputed,
            full_reparse,
            "decorations updated"
        );

        let report = UpdateReport {
            change,
            shift,
            reparsed_lines: span.new_line_count(),
            recomputed_lines: recomputed,
            reused_lines: self.new_lines.len() - recomputed,
            convergence_passes: passes,
            full_reparse,
            span: Some(span),
        };
        (state, report)
    }

    /// Labels and flags for every new line of the span. Returns the number
    /// of lines that could not reuse their old label array.
    fn decorate(
        &self,
        span: &ReparseSpan,
        nodes: &[Node],
        blocks: Vec<Block>,
    ) -> (SpanDecorations, usize) {
        let mut decorator = ChunkDecorator::new(self.registry);
        let mut interner = LabelInterner::new();
        let mut fresh = SpanDecorations {
            blocks,
            decorations: Vec::with_capacity(span.new_line_count()),
            decorated: Vec::with_capacity(span.new_line_count()),
        };
        let mut recomputed = 0;

        // Top-level nodes are ordered and their end lines never decrease.
        let mut first = 0;
        for line_number in span.from_line..=span.new_to_line {
            let text = self.new_lines.get(line_number - 1).copied().unwrap_or_default();
            while nodes
                .get(first)
                .is_some_and(|node| node.position.end.line < line_number)
            {
                first += 1;
            }
            let touching: SmallVec<[&Node; 2]> = nodes
                .get(first..)
                .unwrap_or_default()
                .iter()
                .take_while(|node| node.position.start.line <= line_number)
                .collect();
            let labels = decorator.decorate_line(touching, text, line_number);

            match self.previous(line_number) {
                Some((old, flag)) if same_labels(&labels, old) => {
                    fresh.decorations.push(old.clone());
                    fresh.decorated.push(flag);
                }
                _ => {
                    recomputed += 1;
                    let line = labels.finish(&mut interner);
                    let flag = line.is_unlabeled()
                        && !self.new_blank_beside_decorated(line_number, text);
                    fresh.decorations.push(line);
                    fresh.decorated.push(flag);
                }
            }
        }
        (fresh, recomputed)
    }

    /// Old labels and flag of the old line that new `line_number` was kept from.
    fn previous(&self, line_number: usize) -> Option<(&DecorationLine, bool)> {
        let old = self.diff?.old_line_for(line_number)? - 1;
        let labels = self.old.decorations.get(old)?;
        let flag = self.old.decorated.get(old).copied().unwrap_or(false);
        Some((labels, flag))
    }

    /// A newly inserted empty line next to a line that was decorated must
    /// still get one decoration pass.
    fn new_blank_beside_decorated(&self, line_number: usize, text: &str) -> bool {
        let Some(diff) = self.diff else {
            return false;
        };
        if !text.is_empty() || diff.old_line_for(line_number).is_some() {
            return false;
        }
        let was_decorated = |line: usize| {
            diff.old_line_for(line)
                .and_then(|old| self.old.decorated.get(old - 1))
                .copied()
                .unwrap_or(false)
        };
        (line_number > 1 && was_decorated(line_number - 1)) || was_decorated(line_number + 1)
    }
}

fn same_labels(labels: &LabelBuffer, line: &DecorationLine) -> bool {
    labels.len() == line.len()
        && line
            .labels()
            .iter()
            .enumerate()
            .all(|(index, old)| labels.get(index) == old.as_deref())
}

/// Whether the link and footnote definitions inside a span changed.
fn definitions_changed(old: &[Block], fresh: &[Block]) -> bool {
    let keys = |blocks: &[Block]| {
        let mut keys: Vec<Arc<str>> = blocks
            .iter()
            .flat_map(|block| block.definitions.iter().cloned())
            .collect();
        keys.sort_unstable();
        keys
    };
    keys(old) != keys(fresh)
}

#[allow(
    clippy::cast_possible_wrap,
    reason = "line counts stay far below isize::MAX"
)]
fn line_delta(to: usize, from: usize) -> isize {
    to as isize - from as isize
}
