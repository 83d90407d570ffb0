//! Per-line working storage for the decorator.
//!
//! [`LabelBuffer`] holds the class list of every character of one line while
//! the decorator walks the node tree; [`LineText`] gives character-indexed
//! access to the line for substring lookups.

use ink_ir::{DecorationLine, LabelInterner};

/// Mutable per-character class lists for one line.
///
/// Applying a label to a character that already has one appends it,
/// space-separated, so outer node labels stay visible next to inner ones.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LabelBuffer {
    slots: Vec<Option<String>>,
}

impl LabelBuffer {
    /// A buffer of `len` unlabeled characters.
    pub fn new(len: usize) -> Self {
        LabelBuffer {
            slots: vec![None; len],
        }
    }

    pub fn from_labels(slots: Vec<Option<String>>) -> Self {
        LabelBuffer { slots }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|slot| slot.as_deref())
    }

    /// Append `label` to characters `[from, to)`, clipped to the line.
    pub fn apply(&mut self, from: usize, to: usize, label: &str) {
        let to = to.min(self.slots.len());
        if from >= to {
            return;
        }
        for slot in &mut self.slots[from..to] {
            match slot {
                Some(existing) => {
                    existing.push(' ');
                    existing.push_str(label);
                }
                None => *slot = Some(label.to_owned()),
            }
        }
    }

    /// Replace whatever characters `[from, to)` carry with `label`.
    pub fn overwrite(&mut self, from: usize, to: usize, label: &str) {
        let to = to.min(self.slots.len());
        if from >= to {
            return;
        }
        for slot in &mut self.slots[from..to] {
            *slot = Some(label.to_owned());
        }
    }

    pub fn into_labels(self) -> Vec<Option<String>> {
        self.slots
    }

    /// Freeze into a shareable line, interning identical labels.
    pub fn finish(self, interner: &mut LabelInterner) -> DecorationLine {
        DecorationLine::new(
            self.slots
                .into_iter()
                .map(|slot| slot.map(|label| interner.intern(&label)))
                .collect(),
        )
    }
}

/// A document line addressed by character index.
#[derive(Clone, Debug)]
pub struct LineText {
    chars: Vec<char>,
}

impl LineText {
    pub fn new(text: &str) -> Self {
        LineText {
            chars: text.chars().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Character index of the first occurrence of `needle` starting at or
    /// after `from`. An empty needle never matches.
    pub fn find(&self, needle: &str, from: usize) -> Option<usize> {
        let needle: Vec<char> = needle.chars().collect();
        if needle.is_empty() || needle.len() > self.chars.len() {
            return None;
        }
        let last_start = self.chars.len() - needle.len();
        (from..=last_start).find(|&start| self.chars[start..start + needle.len()] == needle[..])
    }

    /// Whether the line ends with `suffix`; returns the suffix's start.
    pub fn suffix_start(&self, suffix: &str) -> Option<usize> {
        let suffix: Vec<char> = suffix.chars().collect();
        let start = self.chars.len().checked_sub(suffix.len())?;
        (self.chars[start..] == suffix[..]).then_some(start)
    }

    pub fn is_whitespace(&self, index: usize) -> bool {
        self.char_at(index).is_some_and(char::is_whitespace)
    }

    /// Equality with a plain string.
    pub fn equals(&self, text: &str) -> bool {
        self.chars.iter().copied().eq(text.chars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn apply_appends_in_order() {
        let mut buffer = LabelBuffer::new(4);
        buffer.apply(0, 4, "list-item");
        buffer.apply(0, 2, "list-item-pre");
        buffer.apply(3, 9, "paragraph");
        assert_eq!(
            buffer.into_labels(),
            vec![
                Some("list-item list-item-pre".to_owned()),
                Some("list-item list-item-pre".to_owned()),
                Some("list-item".to_owned()),
                Some("list-item paragraph".to_owned()),
            ]
        );
    }

    #[test]
    fn overwrite_replaces_and_inverted_ranges_are_ignored() {
        let mut buffer = LabelBuffer::new(3);
        buffer.apply(0, 3, "blockquote");
        buffer.overwrite(1, 3, "table table-header");
        buffer.apply(2, 1, "ignored");
        assert_eq!(buffer.get(0), Some("blockquote"));
        assert_eq!(buffer.get(2), Some("table table-header"));
    }

    #[test]
    fn finish_interns_labels() {
        let mut interner = LabelInterner::new();
        let mut buffer = LabelBuffer::new(3);
        buffer.apply(0, 2, "code");
        let line = buffer.finish(&mut interner);
        assert_eq!(line.get(0), Some("code"));
        assert_eq!(line.get(2), None);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn find_counts_characters() {
        let line = LineText::new("[té](https://té)");
        assert_eq!(line.find("https://té", 0), Some(5));
        assert_eq!(line.find("té", 2), Some(13));
        assert_eq!(line.find("té", 14), None);
        assert_eq!(line.find("", 0), None);
    }

    #[test]
    fn suffix_and_equality() {
        let line = LineText::new("  let x;");
        assert_eq!(line.suffix_start("let x;"), Some(2));
        assert_eq!(line.suffix_start("nope"), None);
        assert!(line.equals("  let x;"));
        assert!(line.is_whitespace(0));
        assert!(!line.is_whitespace(2));
    }
}
