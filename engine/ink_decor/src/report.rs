//! What an update did.

use ink_diff::LineDiff;

use crate::tracker::ReparseSpan;

/// Line-level summary of an edit.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ChangeSummary {
    /// 1 + the number of kept lines before the first change.
    pub change_start_line: Option<usize>,
    pub lines_added: usize,
    pub lines_removed: usize,
}

impl ChangeSummary {
    pub fn of(diff: &LineDiff) -> Self {
        ChangeSummary {
            change_start_line: diff.change_start_line(),
            lines_added: diff.lines_added(),
            lines_removed: diff.lines_removed(),
        }
    }

    /// The first text: everything is added.
    pub fn initial(line_count: usize) -> Self {
        ChangeSummary {
            change_start_line: Some(1),
            lines_added: line_count,
            lines_removed: 0,
        }
    }
}

/// Statistics of one successful update.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UpdateReport {
    pub change: ChangeSummary,
    /// The reparsed span, `None` when the text did not change.
    pub span: Option<ReparseSpan>,
    /// Net line delta applied to blocks after the span.
    pub shift: isize,
    /// New lines resubmitted to the parser (without the definition blocks
    /// parsed alongside them).
    pub reparsed_lines: usize,
    /// Lines whose labels were newly produced.
    pub recomputed_lines: usize,
    /// Lines handed back as the previous label arrays.
    pub reused_lines: usize,
    /// Times the span grew (left, right or both) before the reparse converged.
    pub convergence_passes: usize,
    /// The whole document was parsed.
    pub full_reparse: bool,
}

impl UpdateReport {
    pub(crate) fn unchanged(line_count: usize) -> Self {
        UpdateReport {
            reused_lines: line_count,
            ..Self::default()
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.span.is_none()
    }
}
