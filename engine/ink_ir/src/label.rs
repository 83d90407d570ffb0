//! Decoration labels.
//!
//! A label is a space-joined list of style classes (`"heading heading-1"`).
//! Every character of a line carries either a label or nothing; the per-line
//! array is shared behind an `Arc` so unchanged lines can be handed back to
//! the renderer as the very same allocation.

use rustc_hash::FxHashSet;
use std::sync::Arc;

/// An interned, space-separated class list.
pub type Label = Arc<str>;

/// Deduplicates label strings so identical labels share one allocation.
#[derive(Default, Debug)]
pub struct LabelInterner {
    labels: FxHashSet<Label>,
}

impl LabelInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, label: &str) -> Label {
        if let Some(existing) = self.labels.get(label) {
            return Arc::clone(existing);
        }
        let label: Label = Arc::from(label);
        self.labels.insert(Arc::clone(&label));
        label
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Half-open character range `[from, to)` with the label applied to it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LabelSpan {
    pub from: usize,
    pub to: usize,
    pub label: Label,
}

impl LabelSpan {
    pub fn new(from: usize, to: usize, label: Label) -> Self {
        LabelSpan { from, to, label }
    }
}

/// Per-character labels of one line.
///
/// Length always equals the line's character count.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DecorationLine(Arc<[Option<Label>]>);

impl DecorationLine {
    pub fn new(labels: Vec<Option<Label>>) -> Self {
        DecorationLine(labels.into())
    }

    /// A line of `len` characters without any label.
    pub fn blank(len: usize) -> Self {
        DecorationLine(vec![None; len].into())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn labels(&self) -> &[Option<Label>] {
        &self.0
    }

    /// Label of the character at 0-based `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(|label| label.as_deref())
    }

    /// True when no character carries a label.
    pub fn is_unlabeled(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// True when both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &DecorationLine) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Collapse consecutive equal labels into spans, skipping unlabeled runs.
    pub fn runs(&self) -> Vec<LabelSpan> {
        let mut runs: Vec<LabelSpan> = Vec::new();
        for (index, label) in self.0.iter().enumerate() {
            let Some(label) = label else {
                continue;
            };
            match runs.last_mut() {
                Some(run) if run.to == index && run.label == *label => run.to = index + 1,
                _ => runs.push(LabelSpan::new(index, index + 1, Arc::clone(label))),
            }
        }
        runs
    }
}
