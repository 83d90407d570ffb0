//! Structural Parser Boundary
//!
//! The annotation engine treats markdown parsing as an external, pure
//! function: text in, positioned node tree out. This crate defines that
//! contract ([`StructuralParser`]) and the default implementation
//! ([`MarkdownParser`]), which runs the `markdown` crate's CommonMark + GFM
//! parser and converts its mdast into [`ink_ir::Node`]s.
//!
//! # Positions
//!
//! Positions are reported relative to the text passed in: line 1 is the first
//! line of that text, whatever document line it came from. Columns are
//! recomputed from byte offsets so they count characters, matching the
//! per-character decoration arrays.

use ink_ir::stack::ensure_sufficient_stack;
use ink_ir::{LineIndex, Node, NodeKind, Position, ReferenceKind};
use markdown::mdast;
use tracing::trace;

/// The structural parser rejected its input.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("markdown parse failed: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
        }
    }
}

/// Parses a text span into its top-level nodes.
///
/// Implementations must be deterministic: the same input always yields the
/// same tree.
pub trait StructuralParser {
    fn parse(&self, text: &str) -> Result<Vec<Node>, ParseError>;
}

/// CommonMark parser, with GitHub Flavored Markdown extensions by default.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MarkdownParser {
    gfm: bool,
}

impl MarkdownParser {
    /// CommonMark + GFM (tables, task lists, strikethrough, autolink literals,
    /// footnotes).
    pub const fn new() -> Self {
        MarkdownParser { gfm: true }
    }

    /// Plain CommonMark.
    pub const fn commonmark() -> Self {
        MarkdownParser { gfm: false }
    }

    fn options(self) -> markdown::ParseOptions {
        if self.gfm {
            markdown::ParseOptions::gfm()
        } else {
            markdown::ParseOptions::default()
        }
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralParser for MarkdownParser {
    fn parse(&self, text: &str) -> Result<Vec<Node>, ParseError> {
        let tree = markdown::to_mdast(text, &self.options())
            .map_err(|message| ParseError::new(message.to_string()))?;
        let index = LineIndex::new(text);
        let nodes: Vec<Node> = tree
            .children()
            .map(|children| children.iter().filter_map(|c| convert(c, &index)).collect())
            .unwrap_or_default();
        trace!(
            lines = index.line_count(),
            nodes = nodes.len(),
            "parsed span"
        );
        Ok(nodes)
    }
}

impl<P: StructuralParser + ?Sized> StructuralParser for &P {
    fn parse(&self, text: &str) -> Result<Vec<Node>, ParseError> {
        (**self).parse(text)
    }
}

fn convert(node: &mdast::Node, index: &LineIndex<'_>) -> Option<Node> {
    ensure_sufficient_stack(|| {
        let position = node.position()?;
        let position = Position::new(
            index.point_at(position.start.offset),
            index.point_at(position.end.offset),
        );
        let children = node
            .children()
            .map(|children| children.iter().filter_map(|c| convert(c, index)).collect())
            .unwrap_or_default();
        Some(Node::new(kind_of(node), position).with_children(children))
    })
}

fn kind_of(node: &mdast::Node) -> NodeKind {
    match node {
        mdast::Node::Root(_) => NodeKind::Root,
        mdast::Node::Paragraph(_) => NodeKind::Paragraph,
        mdast::Node::Heading(heading) => NodeKind::Heading {
            depth: heading.depth,
        },
        mdast::Node::ThematicBreak(_) => NodeKind::ThematicBreak,
        mdast::Node::Blockquote(_) => NodeKind::Blockquote,
        mdast::Node::List(list) => NodeKind::List {
            ordered: list.ordered,
        },
        mdast::Node::ListItem(item) => NodeKind::ListItem {
            checked: item.checked,
        },
        mdast::Node::Table(_) => NodeKind::Table,
        mdast::Node::TableRow(_) => NodeKind::TableRow,
        mdast::Node::TableCell(_) => NodeKind::TableCell,
        mdast::Node::Code(code) => NodeKind::Code {
            lang: code.lang.clone(),
            value: code.value.clone(),
        },
        mdast::Node::InlineCode(_) => NodeKind::InlineCode,
        mdast::Node::Emphasis(_) => NodeKind::Emphasis,
        mdast::Node::Strong(_) => NodeKind::Strong,
        mdast::Node::Delete(_) => NodeKind::Delete,
        mdast::Node::Break(_) => NodeKind::Break,
        mdast::Node::Link(link) => NodeKind::Link {
            url: link.url.clone(),
            title: link.title.clone(),
        },
        mdast::Node::LinkReference(reference) => NodeKind::LinkReference {
            label: reference
                .label
                .clone()
                .unwrap_or_else(|| reference.identifier.clone()),
            reference: reference_kind(&reference.reference_kind),
        },
        mdast::Node::Image(image) => NodeKind::Image {
            alt: image.alt.clone(),
            url: image.url.clone(),
            title: image.title.clone(),
        },
        mdast::Node::ImageReference(reference) => NodeKind::ImageReference {
            alt: reference.alt.clone(),
            label: reference
                .label
                .clone()
                .unwrap_or_else(|| reference.identifier.clone()),
            reference: reference_kind(&reference.reference_kind),
        },
        mdast::Node::Definition(definition) => NodeKind::Definition {
            label: definition
                .label
                .clone()
                .unwrap_or_else(|| definition.identifier.clone()),
            identifier: definition.identifier.to_lowercase(),
            url: definition.url.clone(),
            title: definition.title.clone(),
        },
        mdast::Node::FootnoteDefinition(footnote) => NodeKind::FootnoteDefinition {
            identifier: footnote.identifier.to_lowercase(),
        },
        mdast::Node::FootnoteReference(_) => NodeKind::FootnoteReference,
        mdast::Node::Text(text) => NodeKind::Text {
            value: text.value.clone(),
        },
        // Everything else (raw HTML, and MDX / frontmatter / math, which the
        // parse options never enable) is opaque markup.
        _ => NodeKind::Html,
    }
}

fn reference_kind(kind: &mdast::ReferenceKind) -> ReferenceKind {
    match kind {
        mdast::ReferenceKind::Shortcut => ReferenceKind::Shortcut,
        mdast::ReferenceKind::Collapsed => ReferenceKind::Collapsed,
        mdast::ReferenceKind::Full => ReferenceKind::Full,
    }
}
