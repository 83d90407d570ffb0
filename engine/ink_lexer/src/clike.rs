//! Tokenizer for C-like syntaxes, parameterized by a [`LanguageSpec`].

use logos::Logos;
use rustc_hash::FxHashSet;

use crate::languages::LanguageSpec;
use crate::raw::RawToken;
use crate::{CodeTokenizer, Token};

/// Keyword-driven tokenizer for one language.
///
/// Produces `comment`, `string` (with nested `escape`), `number`, `keyword`,
/// `constant`, `function`, `class-name`, `operator` and `punctuation` tokens.
#[derive(Clone, Debug)]
pub struct CLikeTokenizer {
    keywords: FxHashSet<&'static str>,
    constants: FxHashSet<&'static str>,
    slash_comments: bool,
    hash_comments: bool,
}

impl CLikeTokenizer {
    pub fn new(spec: &LanguageSpec) -> Self {
        CLikeTokenizer {
            keywords: spec.keywords.iter().copied().collect(),
            constants: spec.constants.iter().copied().collect(),
            slash_comments: spec.slash_comments,
            hash_comments: spec.hash_comments,
        }
    }

    fn classify(&self, raw: RawToken, slice: &str, rest: &str, out: &mut TokenSink) {
        match raw {
            RawToken::Whitespace | RawToken::NonAscii => out.text(slice),
            RawToken::LineComment | RawToken::BlockComment => out.leaf("comment", slice),
            RawToken::Hash => out.leaf("punctuation", slice),
            RawToken::DoubleQuoted | RawToken::SingleQuoted | RawToken::Backtick => {
                out.push(string_token(slice));
            }
            RawToken::Number => out.leaf("number", slice),
            RawToken::Ident => {
                if self.keywords.contains(slice) {
                    out.leaf("keyword", slice);
                } else if self.constants.contains(slice) {
                    out.leaf("constant", slice);
                } else if rest.trim_start().starts_with('(') {
                    out.leaf("function", slice);
                } else if slice.starts_with(|c: char| c.is_ascii_uppercase()) {
                    out.leaf("class-name", slice);
                } else {
                    out.text(slice);
                }
            }
            RawToken::Operator => out.operator(slice),
            RawToken::Punctuation => out.leaf("punctuation", slice),
        }
    }
}

impl CodeTokenizer for CLikeTokenizer {
    fn tokenize(&self, code: &str) -> Vec<Token> {
        let mut out = TokenSink::default();
        let mut offset = 0;

        // `//` is an operator outside slash-comment languages; the lexer is
        // restarted right after it so the rest of the line is lexed normally.
        'restart: while offset < code.len() {
            let mut lexer = RawToken::lexer(&code[offset..]);
            while let Some(token_result) = lexer.next() {
                let slice = lexer.slice();
                match token_result {
                    Ok(RawToken::LineComment) if !self.slash_comments => {
                        out.operator("//");
                        offset += lexer.span().start + 2;
                        continue 'restart;
                    }
                    Ok(RawToken::Hash) if self.hash_comments => {
                        let rest = lexer.remainder();
                        let len = memchr::memchr(b'\n', rest.as_bytes()).unwrap_or(rest.len());
                        lexer.bump(len);
                        out.leaf("comment", lexer.slice());
                    }
                    Ok(raw) => self.classify(raw, slice, lexer.remainder(), &mut out),
                    Err(()) => out.text(slice),
                }
            }
            break;
        }

        out.tokens
    }
}

/// String literal, with each backslash escape as a nested `escape` token.
fn string_token(slice: &str) -> Token {
    let mut content = Vec::new();
    let mut plain_start = 0;
    let mut chars = slice.char_indices();
    while let Some((index, c)) = chars.next() {
        if c != '\\' {
            continue;
        }
        let end = chars
            .next()
            .map_or(slice.len(), |(next, escaped)| next + escaped.len_utf8());
        if plain_start < index {
            content.push(Token::text(&slice[plain_start..index]));
        }
        content.push(Token::leaf("escape", &slice[index..end]));
        plain_start = end;
    }
    if plain_start < slice.len() {
        content.push(Token::text(&slice[plain_start..]));
    }
    Token::node("string", content)
}

/// Token accumulator that merges adjacent plain text and adjacent operators.
#[derive(Default)]
struct TokenSink {
    tokens: Vec<Token>,
}

impl TokenSink {
    fn text(&mut self, text: &str) {
        if let Some(Token::Text(last)) = self.tokens.last_mut() {
            last.push_str(text);
        } else {
            self.tokens.push(Token::text(text));
        }
    }

    fn leaf(&mut self, kind: &'static str, text: &str) {
        self.tokens.push(Token::leaf(kind, text));
    }

    fn operator(&mut self, text: &str) {
        if let Some(Token::Node { kind, content }) = self.tokens.last_mut() {
            if *kind == "operator" {
                if let [Token::Text(last)] = content.as_mut_slice() {
                    last.push_str(text);
                    return;
                }
            }
        }
        self.leaf("operator", text);
    }

    fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }
}
