//! Parsed document nodes.
//!
//! Nodes are produced by a structural parser and consumed read-only by the
//! decorator. Each carries its own position and ordered children; leaf and
//! text nodes have no children.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::position::Position;
use crate::stack::ensure_sufficient_stack;

/// Keys of the link and footnote definitions in a subtree. Footnote keys
/// carry a leading `^` so they never collide with link identifiers.
pub type DefinitionKeys = SmallVec<[Arc<str>; 1]>;

/// How a reference (`[text][label]`, `[label][]`, `[label]`) was written.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ReferenceKind {
    /// `[label]`
    Shortcut,
    /// `[label][]`
    Collapsed,
    /// `[text][label]`
    Full,
}

/// Kind of a parsed node, with the attributes the decorator needs.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading {
        depth: u8,
    },
    ThematicBreak,
    Blockquote,
    List {
        ordered: bool,
    },
    /// `checked` is `Some` for task-list items.
    ListItem {
        checked: Option<bool>,
    },
    Table,
    TableRow,
    TableCell,
    /// Fenced or indented code. `value` excludes the fences.
    Code {
        lang: Option<String>,
        value: String,
    },
    InlineCode,
    Emphasis,
    Strong,
    Delete,
    Break,
    Link {
        url: String,
        title: Option<String>,
    },
    LinkReference {
        label: String,
        reference: ReferenceKind,
    },
    Image {
        alt: String,
        url: String,
        title: Option<String>,
    },
    ImageReference {
        alt: String,
        label: String,
        reference: ReferenceKind,
    },
    /// `identifier` is the normalized (case-folded) form of `label`.
    Definition {
        label: String,
        identifier: String,
        url: String,
        title: Option<String>,
    },
    /// `identifier` is normalized like a link definition's.
    FootnoteDefinition {
        identifier: String,
    },
    FootnoteReference,
    /// Raw inline or block markup.
    Html,
    Text {
        value: String,
    },
}

impl NodeKind {
    /// Style-class name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading { .. } => "heading",
            NodeKind::ThematicBreak => "thematic-break",
            NodeKind::Blockquote => "blockquote",
            NodeKind::List { .. } => "list",
            NodeKind::ListItem { .. } => "list-item",
            NodeKind::Table => "table",
            NodeKind::TableRow => "table-row",
            NodeKind::TableCell => "table-cell",
            NodeKind::Code { .. } => "code",
            NodeKind::InlineCode => "inline-code",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Delete => "delete",
            NodeKind::Break => "break",
            NodeKind::Link { .. } => "link",
            NodeKind::LinkReference { .. } => "link-reference",
            NodeKind::Image { .. } => "image",
            NodeKind::ImageReference { .. } => "image-reference",
            NodeKind::Definition { .. } => "definition",
            NodeKind::FootnoteDefinition { .. } => "footnote-definition",
            NodeKind::FootnoteReference => "footnote-reference",
            NodeKind::Html => "html",
            NodeKind::Text { .. } => "text",
        }
    }
}

/// A parsed unit with its position and children.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Position,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Node {
            kind,
            position,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Move this node and its whole subtree by `delta` lines.
    pub fn shift_lines(&mut self, delta: isize) {
        if delta == 0 {
            return;
        }
        ensure_sufficient_stack(|| {
            self.position = self.position.shifted(delta);
            for child in &mut self.children {
                child.shift_lines(delta);
            }
        });
    }

    /// Key references resolve against, for link and footnote definitions.
    pub fn definition_key(&self) -> Option<Arc<str>> {
        match &self.kind {
            NodeKind::Definition { identifier, .. } => Some(Arc::from(identifier.as_str())),
            NodeKind::FootnoteDefinition { identifier } => {
                Some(Arc::from(format!("^{identifier}")))
            }
            _ => None,
        }
    }

    /// Definition keys anywhere in this subtree, in document order.
    pub fn definition_keys(&self) -> DefinitionKeys {
        let mut keys = DefinitionKeys::new();
        self.collect_definition_keys(&mut keys);
        keys
    }

    fn collect_definition_keys(&self, keys: &mut DefinitionKeys) {
        ensure_sufficient_stack(|| {
            keys.extend(self.definition_key());
            for child in &self.children {
                child.collect_definition_keys(keys);
            }
        });
    }

    /// Text value of a `Text` node.
    pub fn text_value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { value } => Some(value.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Point;

    fn at(line: usize, from: usize, to: usize) -> Position {
        Position::new(Point::new(line, from), Point::new(line, to))
    }

    #[test]
    fn shift_moves_subtree() {
        let mut node = Node::new(NodeKind::Paragraph, at(1, 1, 6)).with_children(vec![
            Node::new(
                NodeKind::Text {
                    value: "hello".into(),
                },
                at(1, 1, 6),
            ),
        ]);
        node.shift_lines(4);
        assert_eq!(node.position, at(5, 1, 6));
        assert_eq!(node.children[0].position, at(5, 1, 6));
    }

    #[test]
    fn kind_names_are_kebab_case() {
        assert_eq!(NodeKind::ThematicBreak.name(), "thematic-break");
        assert_eq!(NodeKind::ListItem { checked: None }.name(), "list-item");
        assert_eq!(NodeKind::InlineCode.name(), "inline-code");
    }

    #[test]
    fn definition_keys_reach_nested_definitions() {
        let definition = Node::new(
            NodeKind::Definition {
                label: "A".into(),
                identifier: "a".into(),
                url: "/u".into(),
                title: None,
            },
            at(1, 3, 10),
        );
        let footnote = Node::new(
            NodeKind::FootnoteDefinition {
                identifier: "1".into(),
            },
            at(2, 1, 11),
        );
        let quote = Node::new(NodeKind::Blockquote, at(1, 1, 10)).with_children(vec![definition]);
        let root = Node::new(NodeKind::Root, at(1, 1, 11)).with_children(vec![quote, footnote]);

        let keys = root.definition_keys();
        let keys: Vec<&str> = keys.iter().map(|key| &**key).collect();
        assert_eq!(keys, vec!["a", "^1"]);
        assert!(Node::new(NodeKind::Paragraph, at(1, 1, 2)).definition_keys().is_empty());
    }

    #[test]
    fn text_value_only_for_text() {
        let text = Node::new(NodeKind::Text { value: "x".into() }, at(1, 1, 2));
        assert_eq!(text.text_value(), Some("x"));
        assert_eq!(Node::new(NodeKind::Break, at(1, 1, 2)).text_value(), None);
    }
}
