//! Chunk decorator: node tree to per-character labels.
//!
//! Decoration is line-oriented. For one document line, every top-level node
//! touching it is walked in pre-order: a node's own labels go on first, then
//! each child intersecting the line is decorated over the same buffer. Node
//! columns are clipped to the line when a node starts before or ends after it.
//!
//! Sub-strings a node does not position itself (link URLs and titles,
//! reference labels, definition parts, task-list checkboxes) are found by
//! searching the line from a cursor that only moves forward. A lookup miss
//! skips that one label.

use ink_ir::stack::ensure_sufficient_stack;
use ink_ir::{Node, NodeKind, Position, ReferenceKind};
use ink_lexer::TokenizerRegistry;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::bridge::CodeLines;
use crate::buffer::{LabelBuffer, LineText};

/// Walks node trees onto label buffers.
///
/// Holds the tokenizer capability and caches each code block's tokens, so a
/// decorator should live for one update: the cache is keyed by position.
pub struct ChunkDecorator<'r> {
    registry: &'r dyn TokenizerRegistry,
    code: FxHashMap<Position, Option<CodeLines>>,
}

impl<'r> ChunkDecorator<'r> {
    pub fn new(registry: &'r dyn TokenizerRegistry) -> Self {
        ChunkDecorator {
            registry,
            code: FxHashMap::default(),
        }
    }

    /// Decorate `node` onto `decorations` for document line `line_number`.
    pub fn decorate(
        &mut self,
        node: &Node,
        line_text: &str,
        line_number: usize,
        mut decorations: LabelBuffer,
    ) -> LabelBuffer {
        let line = LineText::new(line_text);
        self.chunk(node, &line, line_number, &mut decorations);
        decorations
    }

    /// Labels of one line from all top-level nodes touching it, in order.
    pub fn decorate_line<'n>(
        &mut self,
        nodes: impl IntoIterator<Item = &'n Node>,
        line_text: &str,
        line_number: usize,
    ) -> LabelBuffer {
        let line = LineText::new(line_text);
        let mut decorations = LabelBuffer::new(line.len());
        for node in nodes {
            if node.position.intersects_line(line_number) {
                self.chunk(node, &line, line_number, &mut decorations);
            }
        }
        decorations
    }

    fn chunk(&mut self, node: &Node, line: &LineText, line_number: usize, out: &mut LabelBuffer) {
        ensure_sufficient_stack(|| {
            let Some((from, to)) = node.position.columns_on(line_number, line.len()) else {
                return;
            };
            let span = Span { from, to };
            match &node.kind {
                NodeKind::Text { .. } | NodeKind::Html => {}
                NodeKind::Heading { depth } => {
                    out.apply(from, to, &format!("heading heading-{depth}"));
                    self.children(node, line, line_number, out);
                }
                NodeKind::ThematicBreak => {
                    out.apply(from, to, "thematic-break");
                    self.children(node, line, line_number, out);
                }
                NodeKind::ListItem { checked } => {
                    self.list_item(node, *checked, span, line, line_number, out);
                }
                NodeKind::Table => table(node, span, line, line_number, out),
                NodeKind::Code { lang, .. } => {
                    self.code(node, lang.as_deref(), span, line, line_number, out);
                }
                NodeKind::InlineCode => {
                    out.apply(from, to, "inline-code");
                    self.children(node, line, line_number, out);
                }
                NodeKind::Link { url, title } => {
                    self.link(node, url, title.as_deref(), span, line, line_number, out);
                }
                NodeKind::LinkReference { label, reference } => {
                    out.apply(from, to, "link-reference");
                    self.children(node, line, line_number, out);
                    let cursor = match reference {
                        ReferenceKind::Full => children_end(node, line, line_number).unwrap_or(from),
                        ReferenceKind::Shortcut | ReferenceKind::Collapsed => from,
                    };
                    reference_label(label, "link-reference-ref", cursor, span, line, out);
                }
                NodeKind::Image { alt, url, title } => {
                    out.apply(from, to, "image");
                    let cursor = alt_end(alt, from, span, line);
                    destination(url, title.as_deref(), "image", cursor, span, line, out);
                }
                NodeKind::ImageReference {
                    alt,
                    label,
                    reference,
                } => {
                    out.apply(from, to, "image-reference");
                    let cursor = match reference {
                        ReferenceKind::Full => alt_end(alt, from, span, line),
                        ReferenceKind::Shortcut | ReferenceKind::Collapsed => from,
                    };
                    reference_label(label, "image-reference-ref", cursor, span, line, out);
                }
                NodeKind::Definition {
                    label, url, title, ..
                } => definition(label, url, title.as_deref(), span, line, out),
                NodeKind::Root
                | NodeKind::Paragraph
                | NodeKind::Blockquote
                | NodeKind::List { .. }
                | NodeKind::TableRow
                | NodeKind::TableCell
                | NodeKind::Emphasis
                | NodeKind::Strong
                | NodeKind::Delete
                | NodeKind::Break
                | NodeKind::FootnoteDefinition { .. }
                | NodeKind::FootnoteReference => {
                    out.apply(from, to, node.kind.name());
                    self.children(node, line, line_number, out);
                }
            }
        });
    }

    fn children(&mut self, node: &Node, line: &LineText, line_number: usize, out: &mut LabelBuffer) {
        for child in &node.children {
            if child.position.intersects_line(line_number) {
                self.chunk(child, line, line_number, out);
            }
        }
    }

    fn list_item(
        &mut self,
        node: &Node,
        checked: Option<bool>,
        span: Span,
        line: &LineText,
        line_number: usize,
        out: &mut LabelBuffer,
    ) {
        out.apply(span.from, span.to, "list-item");

        if node.position.start.line == line_number {
            let first_child = node
                .children
                .first()
                .filter(|child| child.position.start.line == line_number)
                .map(|child| child.position.start.column.saturating_sub(1));

            let checkbox = checked.and_then(|checked| {
                let open = line.find("[", span.from)?;
                let closed = line.char_at(open + 2) == Some(']');
                (closed && open + 3 <= span.to).then_some((open, checked))
            });

            match checkbox {
                Some((open, checked)) => {
                    out.apply(span.from, open, "list-item-pre");
                    let state = if checked { " checked" } else { "" };
                    let bracket = format!("tasklist{state}");
                    out.apply(open, open + 1, &bracket);
                    out.apply(open + 1, open + 2, &format!("tasklist-inner{state}"));
                    out.apply(open + 2, open + 3, &bracket);
                }
                None => {
                    if checked.is_some() {
                        trace!(line = line_number, "task list checkbox not found");
                    }
                    out.apply(span.from, first_child.unwrap_or(span.to), "list-item-pre");
                }
            }
        }

        self.children(node, line, line_number, out);
    }

    fn code(
        &mut self,
        node: &Node,
        lang: Option<&str>,
        span: Span,
        line: &LineText,
        line_number: usize,
        out: &mut LabelBuffer,
    ) {
        out.apply(span.from, span.to, "code");
        let position = node.position;
        if position.start.line == line_number {
            out.apply(span.from, span.from + 1, "code-start");
        }
        if position.end.line == line_number && span.to > span.from {
            out.apply(span.to - 1, span.to, "code-end");
        }

        let Some(lang) = lang else {
            return;
        };
        let registry = self.registry;
        let lines = self.code.entry(position).or_insert_with(|| {
            let NodeKind::Code { value, .. } = &node.kind else {
                return None;
            };
            let tokenizer = registry.try_tokenize(lang)?;
            Some(CodeLines::from_tokens(&tokenizer.tokenize(value)))
        });
        let Some(lines) = lines.as_ref() else {
            return;
        };

        // The first node line is the opening fence.
        let by_index = line_number
            .checked_sub(position.start.line + 1)
            .and_then(|index| lines.get(index))
            .and_then(|code| Some((code, line.suffix_start(&code.text)?)));
        let matched = by_index.or_else(|| {
            if line_number <= position.start.line {
                return None;
            }
            lines
                .iter()
                .find(|code| line.equals(&code.text))
                .map(|code| (code, 0))
        });
        let Some((code, mut offset)) = matched else {
            trace!(line = line_number, "code line not found in token stream");
            return;
        };
        for run in &code.runs {
            if let Some(label) = &run.label {
                out.apply(offset, offset + run.len, label);
            }
            offset += run.len;
        }
    }

    #[allow(clippy::too_many_arguments, reason = "decorator context threaded through")]
    fn link(
        &mut self,
        node: &Node,
        url: &str,
        title: Option<&str>,
        span: Span,
        line: &LineText,
        line_number: usize,
        out: &mut LabelBuffer,
    ) {
        // Autolinks: the visible text is the URL itself.
        if let [only] = node.children.as_slice() {
            if only.text_value() == Some(url) {
                if let Some((from, to)) = only.position.columns_on(line_number, line.len()) {
                    out.apply(from, to, "link-url");
                }
                return;
            }
        }

        out.apply(span.from, span.to, "link");
        self.children(node, line, line_number, out);
        let cursor = children_end(node, line, line_number).unwrap_or(span.from);
        destination(url, title, "link", cursor, span, line, out);
    }
}

#[derive(Copy, Clone, Debug)]
struct Span {
    from: usize,
    to: usize,
}

impl Span {
    /// Position of `needle` at or after `cursor`, if it ends inside the span.
    fn find(self, line: &LineText, needle: &str, cursor: usize) -> Option<(usize, usize)> {
        let start = line.find(needle, cursor.max(self.from))?;
        let end = start + needle.chars().count();
        (end <= self.to).then_some((start, end))
    }
}

/// End column (exclusive, 0-based) of the last child on this line.
fn children_end(node: &Node, line: &LineText, line_number: usize) -> Option<usize> {
    node.children
        .iter()
        .filter_map(|child| child.position.columns_on(line_number, line.len()))
        .map(|(_, to)| to)
        .max()
}

fn alt_end(alt: &str, cursor: usize, span: Span, line: &LineText) -> usize {
    span.find(line, alt, cursor).map_or(cursor, |(_, end)| end)
}

/// `link-url` / `link-title` (or the `image` variants) after `cursor`.
fn destination(
    url: &str,
    title: Option<&str>,
    prefix: &str,
    mut cursor: usize,
    span: Span,
    line: &LineText,
    out: &mut LabelBuffer,
) {
    if let Some((from, to)) = span.find(line, url, cursor) {
        out.apply(from, to, &format!("{prefix}-url"));
        cursor = to;
    }
    if let Some(title) = title {
        // The title sits inside quotes or parentheses, which get the label too.
        if let Some((from, to)) = span.find(line, title, cursor + 1) {
            out.apply(from - 1, to + 1, &format!("{prefix}-title"));
        }
    }
}

fn reference_label(
    label: &str,
    class: &str,
    cursor: usize,
    span: Span,
    line: &LineText,
    out: &mut LabelBuffer,
) {
    match span.find(line, &format!("[{label}]"), cursor) {
        Some((from, to)) => out.apply(from, to, class),
        None => trace!(label, "reference label not found"),
    }
}

fn definition(
    label: &str,
    url: &str,
    title: Option<&str>,
    span: Span,
    line: &LineText,
    out: &mut LabelBuffer,
) {
    let mut cursor = span.from;

    // A label split over lines is searched piece by piece; the first piece
    // found on this line wins.
    let pieces: Vec<&str> = label.split('\n').collect();
    let last = pieces.len() - 1;
    for (index, piece) in pieces.iter().enumerate() {
        let mut needle = String::new();
        if index == 0 {
            needle.push('[');
        }
        needle.push_str(piece);
        if index == last {
            needle.push_str("]:");
        }
        if let Some((from, to)) = span.find(line, &needle, cursor) {
            out.apply(from, to, "definition definition-label");
            cursor = to;
            break;
        }
    }

    if let Some((from, to)) = span.find(line, url, cursor) {
        out.apply(from, to, "definition definition-url");
        cursor = to;
    }
    if let Some(title) = title {
        if let Some((from, to)) = span.find(line, title, cursor + 1) {
            out.apply(from - 1, to + 1, "definition definition-title");
        }
    }
}

/// Row role for every character of the span, then `table-separator` over
/// each unescaped pipe with the whitespace around it.
fn table(node: &Node, span: Span, line: &LineText, line_number: usize, out: &mut LabelBuffer) {
    let role = match node
        .children
        .iter()
        .position(|row| row.position.start.line == line_number)
    {
        Some(0) => "table table-header",
        Some(_) => "table table-content",
        None => "table table-delimiter",
    };
    out.overwrite(span.from, span.to, role);

    let mut consumed = span.from;
    let mut index = span.from;
    while index < span.to {
        let escaped = index > 0 && line.char_at(index - 1) == Some('\\');
        if line.char_at(index) != Some('|') || escaped {
            index += 1;
            continue;
        }
        let mut start = index;
        while start > consumed && line.is_whitespace(start - 1) {
            start -= 1;
        }
        let mut end = index + 1;
        while end < span.to && line.is_whitespace(end) {
            end += 1;
        }
        out.apply(start, end, "table-separator");
        consumed = end;
        index = end;
    }
}
