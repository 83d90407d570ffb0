//! Code tokenizer bridge.
//!
//! A tokenizer sees the whole code value of a fenced block; the decorator sees
//! one document line at a time. [`CodeLines`] flattens the token tree once per
//! block into labeled runs split at newlines, so each document line can pick
//! up the runs of its code line.

use ink_lexer::Token;

/// A run of characters sharing one token label.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenRun {
    /// Length in characters.
    pub len: usize,
    /// `token <type>` for top-level tokens, extended by the nested types
    /// (`token string escape`); `None` for plain text.
    pub label: Option<String>,
}

/// One line of tokenized code.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CodeLine {
    pub text: String,
    pub runs: Vec<TokenRun>,
}

/// The tokenized code value of one fenced block, by line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CodeLines {
    lines: Vec<CodeLine>,
}

impl CodeLines {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut flattener = Flattener {
            lines: vec![CodeLine::default()],
            path: Vec::new(),
        };
        for token in tokens {
            flattener.token(token);
        }
        CodeLines {
            lines: flattener.lines,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CodeLine> {
        self.lines.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CodeLine> {
        self.lines.iter()
    }
}

struct Flattener<'t> {
    lines: Vec<CodeLine>,
    /// Kinds of the composite tokens enclosing the current one.
    path: Vec<&'t str>,
}

impl<'t> Flattener<'t> {
    fn token(&mut self, token: &'t Token) {
        match token {
            Token::Text(text) => self.text(text),
            Token::Node { kind, content } => {
                self.path.push(kind);
                for child in content {
                    self.token(child);
                }
                self.path.pop();
            }
        }
    }

    fn text(&mut self, text: &str) {
        let label = if self.path.is_empty() {
            None
        } else {
            Some(format!("token {}", self.path.join(" ")))
        };
        let mut pieces = text.split('\n');
        if let Some(first) = pieces.next() {
            self.push(first, label.as_ref());
        }
        for piece in pieces {
            self.lines.push(CodeLine::default());
            self.push(piece, label.as_ref());
        }
    }

    fn push(&mut self, piece: &str, label: Option<&String>) {
        if piece.is_empty() {
            return;
        }
        let Some(line) = self.lines.last_mut() else {
            return;
        };
        line.text.push_str(piece);
        let len = piece.chars().count();
        match line.runs.last_mut() {
            Some(run) if run.label.as_ref() == label => run.len += len,
            _ => line.runs.push(TokenRun {
                len,
                label: label.cloned(),
            }),
        }
    }
}
