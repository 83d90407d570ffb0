//! Line boundaries and byte-offset to line/column conversion.

use crate::position::Point;

/// Split text into lines on `'\n'`.
///
/// A trailing newline yields a final empty line, so `""` is one empty line
/// and `"a\n"` is `["a", ""]`. `'\r'` is kept as an ordinary character.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Byte offsets of line starts for one text.
///
/// Parsers report byte offsets; the decorator works in characters. The index
/// converts the former into 1-based `Point`s with character columns.
#[derive(Clone, Debug)]
pub struct LineIndex<'a> {
    text: &'a str,
    /// Byte offset of the first byte of each line. `line_starts[0] == 0`.
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = Vec::with_capacity(text.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(memchr::memchr_iter(b'\n', text.as_bytes()).map(|nl| nl + 1));
        LineIndex { text, line_starts }
    }

    /// Number of lines (at least one).
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a 1-based line and character column.
    ///
    /// Offsets past the end clamp to the end of the text; offsets inside a
    /// multi-byte character resolve to that character.
    pub fn point_at(&self, offset: usize) -> Point {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let column = self.text[line_start..offset].chars().count() + 1;
        Point::new(line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_keeps_trailing_empty_line() {
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
        assert_eq!(split_lines("a\r\nb"), vec!["a\r", "b"]);
    }

    #[test]
    fn points_for_ascii() {
        let index = LineIndex::new("# Title\nbody");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.point_at(0), Point::new(1, 1));
        assert_eq!(index.point_at(7), Point::new(1, 8));
        assert_eq!(index.point_at(8), Point::new(2, 1));
        assert_eq!(index.point_at(12), Point::new(2, 5));
    }

    #[test]
    fn columns_count_chars_not_bytes() {
        let index = LineIndex::new("héllo wörld");
        // 'w' starts at byte 7 but is preceded by only six characters.
        assert_eq!(index.point_at(7), Point::new(1, 7));
        assert_eq!(index.point_at("héllo wörld".len()), Point::new(1, 12));
    }

    #[test]
    fn offsets_clamp_and_snap() {
        let index = LineIndex::new("é");
        assert_eq!(index.point_at(1), Point::new(1, 1));
        assert_eq!(index.point_at(99), Point::new(1, 2));
    }
}
