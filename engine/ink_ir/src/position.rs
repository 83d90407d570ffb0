//! Line/column positions.

use std::fmt;

/// A location in a document: 1-based line, 1-based character column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

impl Point {
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Point { line, column }
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source range of a node. `end.column` is exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Position {
    pub start: Point,
    pub end: Point,
}

impl Position {
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Position { start, end }
    }

    /// Check whether the range touches `line`.
    #[inline]
    pub fn intersects_line(&self, line: usize) -> bool {
        self.start.line <= line && line <= self.end.line
    }

    /// Number of lines covered, counting partial first/last lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.end.line.saturating_sub(self.start.line) + 1
    }

    /// Move the range by `delta` lines. Columns are untouched.
    #[must_use]
    pub fn shifted(self, delta: isize) -> Self {
        Position {
            start: Point::new(self.start.line.saturating_add_signed(delta), self.start.column),
            end: Point::new(self.end.line.saturating_add_signed(delta), self.end.column),
        }
    }

    /// 0-based half-open character range this position covers on `line`.
    ///
    /// A range that starts before `line` is clamped to the line start; one that
    /// ends after it is clamped to `line_len`. Returns `None` when the range
    /// does not touch the line.
    pub fn columns_on(&self, line: usize, line_len: usize) -> Option<(usize, usize)> {
        if !self.intersects_line(line) {
            return None;
        }
        let from = if self.start.line < line {
            0
        } else {
            self.start.column.saturating_sub(1)
        };
        let to = if self.end.line > line {
            line_len
        } else {
            self.end.column.saturating_sub(1)
        };
        let to = to.min(line_len);
        Some((from.min(to), to))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}-{:?}", self.start, self.end)
    }
}
