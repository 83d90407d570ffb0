//! Line-level diff of two document versions.
//!
//! The engine never receives edit events, only the full text after every
//! accepted edit. This crate recovers what changed between two versions as
//! an ordered list of kept / added / removed line runs (Myers algorithm via
//! `similar`) and summarizes it into the numbers the reparse orchestrator
//! needs: where the change starts, how many lines came and went, and which
//! new lines were kept verbatim from which old lines.
//!
//! # Guarantees
//!
//! - Segments cover both inputs completely and in order: the kept and removed
//!   counts sum to the old line count, the kept and added counts to the new one.
//! - The result is deterministic for identical inputs.

use similar::{capture_diff_slices, Algorithm, DiffOp};

/// What happened to a run of lines.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SegmentKind {
    Kept,
    Added,
    Removed,
}

/// A run of `line_count` lines sharing one [`SegmentKind`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub line_count: usize,
}

impl DiffSegment {
    pub const fn new(kind: SegmentKind, line_count: usize) -> Self {
        DiffSegment { kind, line_count }
    }
}

/// Diff two texts line by line.
///
/// An empty text has no lines, so diffing against `""` yields a single
/// `Added` or `Removed` segment.
pub fn diff(old_text: &str, new_text: &str) -> Vec<DiffSegment> {
    let old = text_lines(old_text);
    let new = text_lines(new_text);
    LineDiff::compute(&old, &new).segments
}

fn text_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Bounds of the changed region, as 0-based line positions.
///
/// `old_start..old_end` are the old lines between the first and the last
/// non-kept segment; `new_start..new_end` the matching new lines. Either range
/// is empty for a pure insertion or a pure deletion.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ChangeHull {
    pub old_start: usize,
    pub old_end: usize,
    pub new_start: usize,
    pub new_end: usize,
}

/// A line diff with the summaries the orchestrator derives from it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineDiff {
    segments: Vec<DiffSegment>,
    old_line_count: usize,
    new_line_count: usize,
    /// For each new line, the old line it was kept from.
    kept_from: Vec<Option<usize>>,
    hull: Option<ChangeHull>,
}

impl LineDiff {
    /// Diff two line lists.
    pub fn compute<A: AsRef<str>, B: AsRef<str>>(old: &[A], new: &[B]) -> Self {
        let old: Vec<&str> = old.iter().map(AsRef::as_ref).collect();
        let new: Vec<&str> = new.iter().map(AsRef::as_ref).collect();

        let mut builder = Builder {
            segments: Vec::new(),
            kept_from: vec![None; new.len()],
            hull: None,
        };

        for op in capture_diff_slices(Algorithm::Myers, &old, &new) {
            match op {
                DiffOp::Equal {
                    old_index,
                    new_index,
                    len,
                } => {
                    builder.push(SegmentKind::Kept, len);
                    for offset in 0..len {
                        builder.kept_from[new_index + offset] = Some(old_index + offset);
                    }
                }
                DiffOp::Delete {
                    old_index,
                    old_len,
                    new_index,
                } => {
                    builder.push(SegmentKind::Removed, old_len);
                    builder.touch(old_index, old_index + old_len, new_index, new_index);
                }
                DiffOp::Insert {
                    old_index,
                    new_index,
                    new_len,
                } => {
                    builder.push(SegmentKind::Added, new_len);
                    builder.touch(old_index, old_index, new_index, new_index + new_len);
                }
                DiffOp::Replace {
                    old_index,
                    old_len,
                    new_index,
                    new_len,
                } => {
                    builder.push(SegmentKind::Removed, old_len);
                    builder.push(SegmentKind::Added, new_len);
                    builder.touch(
                        old_index,
                        old_index + old_len,
                        new_index,
                        new_index + new_len,
                    );
                }
            }
        }

        LineDiff {
            segments: builder.segments,
            old_line_count: old.len(),
            new_line_count: new.len(),
            kept_from: builder.kept_from,
            hull: builder.hull,
        }
    }

    pub fn segments(&self) -> &[DiffSegment] {
        &self.segments
    }

    pub fn old_line_count(&self) -> usize {
        self.old_line_count
    }

    pub fn new_line_count(&self) -> usize {
        self.new_line_count
    }

    /// True when both versions have identical lines.
    pub fn is_unchanged(&self) -> bool {
        self.hull.is_none()
    }

    pub fn lines_added(&self) -> usize {
        self.count(SegmentKind::Added)
    }

    pub fn lines_removed(&self) -> usize {
        self.count(SegmentKind::Removed)
    }

    fn count(&self, kind: SegmentKind) -> usize {
        self.segments
            .iter()
            .filter(|segment| segment.kind == kind)
            .map(|segment| segment.line_count)
            .sum()
    }

    /// 1 + the number of kept lines before the first change.
    pub fn change_start_line(&self) -> Option<usize> {
        self.hull.map(|hull| hull.old_start + 1)
    }

    /// Net line-count delta.
    #[allow(
        clippy::cast_possible_wrap,
        reason = "line counts stay far below isize::MAX"
    )]
    pub fn shift(&self) -> isize {
        self.new_line_count as isize - self.old_line_count as isize
    }

    pub fn hull(&self) -> Option<ChangeHull> {
        self.hull
    }

    /// 1-based inclusive range of old lines an edit touches.
    ///
    /// For replacements and deletions these are the changed lines themselves.
    /// A pure insertion touches the old lines on either side of the insertion
    /// point. `None` when nothing changed or the old text had no lines.
    pub fn touched_old_lines(&self) -> Option<(usize, usize)> {
        let hull = self.hull?;
        if self.old_line_count == 0 {
            return None;
        }
        if hull.old_end > hull.old_start {
            return Some((hull.old_start + 1, hull.old_end));
        }
        let before = hull.old_start.max(1);
        let after = (hull.old_start + 1).min(self.old_line_count);
        Some((before.min(after), after))
    }

    /// Old line (1-based) that new line `new_line` (1-based) was kept from.
    pub fn old_line_for(&self, new_line: usize) -> Option<usize> {
        let index = new_line.checked_sub(1)?;
        self.kept_from.get(index).copied().flatten().map(|old| old + 1)
    }
}

struct Builder {
    segments: Vec<DiffSegment>,
    kept_from: Vec<Option<usize>>,
    hull: Option<ChangeHull>,
}

impl Builder {
    fn push(&mut self, kind: SegmentKind, line_count: usize) {
        if line_count == 0 {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.kind == kind => last.line_count += line_count,
            _ => self.segments.push(DiffSegment::new(kind, line_count)),
        }
    }

    fn touch(&mut self, old_start: usize, old_end: usize, new_start: usize, new_end: usize) {
        self.hull = Some(match self.hull {
            None => ChangeHull {
                old_start,
                old_end,
                new_start,
                new_end,
            },
            Some(hull) => ChangeHull {
                old_start: hull.old_start,
                old_end: hull.old_end.max(old_end),
                new_start: hull.new_start,
                new_end: hull.new_end.max(new_end),
            },
        });
    }
}

#[cfg(test)]
mod tests;
