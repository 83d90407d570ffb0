//! Raw token classes shared by every built-in language.

use logos::Logos;

/// Raw token from logos (before keyword classification).
///
/// Every byte of the input lands in some token: whitespace and non-ASCII runs
/// are tokens of their own, and anything else unmatched surfaces as a lexer
/// error on a single ASCII character.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    // === Comments ===
    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,
    // Only a comment in hash-comment languages; the tokenizer extends it.
    #[token("#")]
    Hash,

    // === Literals ===
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    DoubleQuoted,
    #[regex(r"'([^'\\\n]|\\.)*'")]
    SingleQuoted,
    #[regex(r"`[^`]*`")]
    Backtick,
    #[regex(r"0[xX][0-9a-fA-F_]+|[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    // === Symbols ===
    #[regex(r"[+\-*/%=<>!&|^~?:@]")]
    Operator,
    #[regex(r"[(){}\[\];,.]")]
    Punctuation,

    #[regex(r"[^\x00-\x7F]+")]
    NonAscii,
}
