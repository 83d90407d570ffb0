//! Code Tokenizers
//!
//! Fenced code blocks get a second highlighting pass: if a tokenizer is
//! registered for the block's language, its token tree is flattened onto the
//! block's lines. This crate defines the tokenizer contract and ships a
//! registry of C-family and scripting languages backed by one `logos` lexer.
//!
//! # Token Trees
//!
//! A tokenizer returns a sequence of [`Token`]s whose concatenated text equals
//! its input exactly. Composite tokens nest (a string token containing escape
//! tokens), plain text sits between them.
//!
//! # Registries
//!
//! The decorator never looks tokenizers up from global state. It is handed a
//! [`TokenizerRegistry`] capability and asks it per language.

mod clike;
mod languages;
mod raw;

use std::borrow::Cow;

pub use clike::CLikeTokenizer;
pub use languages::{LanguageSpec, Languages, BUILTIN_LANGUAGES};

/// One node of a token tree.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Token {
    /// Unclassified text.
    Text(String),
    /// A classified token, possibly containing nested tokens.
    Node {
        kind: Cow<'static, str>,
        content: Vec<Token>,
    },
}

impl Token {
    pub fn text(text: impl Into<String>) -> Self {
        Token::Text(text.into())
    }

    pub fn node(kind: impl Into<Cow<'static, str>>, content: Vec<Token>) -> Self {
        Token::Node {
            kind: kind.into(),
            content,
        }
    }

    /// A classified token holding plain text.
    pub fn leaf(kind: impl Into<Cow<'static, str>>, text: impl Into<String>) -> Self {
        Token::node(kind, vec![Token::text(text)])
    }

    /// Append this token's text to `out`.
    pub fn write_text(&self, out: &mut String) {
        match self {
            Token::Text(text) => out.push_str(text),
            Token::Node { content, .. } => {
                for token in content {
                    token.write_text(out);
                }
            }
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }
}

/// Concatenated text of a token sequence.
pub fn concat(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.write_text(&mut out);
    }
    out
}

/// Turns source code of one language into a token tree.
pub trait CodeTokenizer {
    fn tokenize(&self, code: &str) -> Vec<Token>;
}

/// Looks up a tokenizer by the language named on a code fence.
pub trait TokenizerRegistry {
    fn try_tokenize(&self, language: &str) -> Option<&dyn CodeTokenizer>;
}

/// A registry without any tokenizer: code blocks keep their base label.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoTokenizers;

impl TokenizerRegistry for NoTokenizers {
    fn try_tokenize(&self, _language: &str) -> Option<&dyn CodeTokenizer> {
        None
    }
}

impl<R: TokenizerRegistry + ?Sized> TokenizerRegistry for &R {
    fn try_tokenize(&self, language: &str) -> Option<&dyn CodeTokenizer> {
        (**self).try_tokenize(language)
    }
}
