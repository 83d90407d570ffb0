//! Built-in language table and the alias registry.

use rustc_hash::FxHashMap;

use crate::clike::CLikeTokenizer;
use crate::{CodeTokenizer, TokenizerRegistry};

/// Lexical description of a C-like language.
#[derive(Copy, Clone, Debug)]
pub struct LanguageSpec {
    /// Fence names, first one canonical.
    pub names: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub constants: &'static [&'static str],
    pub slash_comments: bool,
    pub hash_comments: bool,
}

const RUST: LanguageSpec = LanguageSpec {
    names: &["rust", "rs"],
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
        "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "type",
        "unsafe", "use", "where", "while",
    ],
    constants: &["true", "false", "None", "Some", "Ok", "Err"],
    slash_comments: true,
    hash_comments: false,
};

const JAVASCRIPT: LanguageSpec = LanguageSpec {
    names: &[
        "javascript",
        "js",
        "jsx",
        "mjs",
        "typescript",
        "ts",
        "tsx",
    ],
    keywords: &[
        "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
        "delete", "do", "else", "export", "extends", "finally", "for", "from", "function", "if",
        "import", "in", "instanceof", "interface", "let", "new", "of", "return", "static",
        "switch", "this", "throw", "try", "type", "typeof", "var", "void", "while", "yield",
    ],
    constants: &["true", "false", "null", "undefined", "NaN", "Infinity"],
    slash_comments: true,
    hash_comments: false,
};

const C: LanguageSpec = LanguageSpec {
    names: &["c", "h", "cpp", "c++", "cc", "hpp"],
    keywords: &[
        "auto", "bool", "break", "case", "char", "class", "const", "continue", "default",
        "delete", "do", "double", "else", "enum", "extern", "float", "for", "goto", "if",
        "inline", "int", "long", "namespace", "new", "private", "protected", "public",
        "register", "return", "short", "signed", "sizeof", "static", "struct", "switch",
        "template", "typedef", "union", "unsigned", "using", "virtual", "void", "volatile",
        "while",
    ],
    constants: &["true", "false", "NULL", "nullptr"],
    slash_comments: true,
    hash_comments: false,
};

const JAVA: LanguageSpec = LanguageSpec {
    names: &["java", "kotlin", "kt"],
    keywords: &[
        "abstract", "boolean", "break", "byte", "case", "catch", "char", "class", "continue",
        "default", "do", "double", "else", "enum", "extends", "final", "finally", "float", "for",
        "fun", "if", "implements", "import", "instanceof", "int", "interface", "long", "new",
        "package", "private", "protected", "public", "return", "short", "static", "super",
        "switch", "this", "throw", "throws", "try", "val", "var", "void", "while",
    ],
    constants: &["true", "false", "null"],
    slash_comments: true,
    hash_comments: false,
};

const GO: LanguageSpec = LanguageSpec {
    names: &["go", "golang"],
    keywords: &[
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
        "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
        "return", "select", "struct", "switch", "type", "var",
    ],
    constants: &["true", "false", "nil", "iota"],
    slash_comments: true,
    hash_comments: false,
};

const PYTHON: LanguageSpec = LanguageSpec {
    names: &["python", "py"],
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
        "yield",
    ],
    constants: &["True", "False", "None"],
    slash_comments: false,
    hash_comments: true,
};

const SHELL: LanguageSpec = LanguageSpec {
    names: &["bash", "sh", "shell", "zsh"],
    keywords: &[
        "case", "do", "done", "elif", "else", "esac", "export", "fi", "for", "function", "if",
        "in", "local", "return", "then", "until", "while",
    ],
    constants: &["true", "false"],
    slash_comments: false,
    hash_comments: true,
};

const JSON: LanguageSpec = LanguageSpec {
    names: &["json", "jsonc"],
    keywords: &[],
    constants: &["true", "false", "null"],
    slash_comments: true,
    hash_comments: false,
};

/// Languages available through [`Languages::builtin`].
pub const BUILTIN_LANGUAGES: &[LanguageSpec] =
    &[RUST, JAVASCRIPT, C, JAVA, GO, PYTHON, SHELL, JSON];

/// Tokenizers keyed by fence language name (case-insensitive).
#[derive(Default)]
pub struct Languages {
    by_name: FxHashMap<String, usize>,
    tokenizers: Vec<Box<dyn CodeTokenizer + Send + Sync>>,
}

impl Languages {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in language.
    pub fn builtin() -> Self {
        let mut languages = Self::new();
        for spec in BUILTIN_LANGUAGES {
            languages.register(spec.names, CLikeTokenizer::new(spec));
        }
        languages
    }

    /// Register `tokenizer` under each of `names`, replacing earlier entries.
    pub fn register<T>(&mut self, names: &[&str], tokenizer: T)
    where
        T: CodeTokenizer + Send + Sync + 'static,
    {
        let index = self.tokenizers.len();
        self.tokenizers.push(Box::new(tokenizer));
        for name in names {
            self.by_name.insert(name.to_ascii_lowercase(), index);
        }
    }

    pub fn contains(&self, language: &str) -> bool {
        self.by_name.contains_key(&language.to_ascii_lowercase())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl TokenizerRegistry for Languages {
    fn try_tokenize(&self, language: &str) -> Option<&dyn CodeTokenizer> {
        let index = *self.by_name.get(&language.to_ascii_lowercase())?;
        let tokenizer: &dyn CodeTokenizer = &**self.tokenizers.get(index)?;
        Some(tokenizer)
    }
}

impl std::fmt::Debug for Languages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Languages")
            .field("names", &self.names())
            .finish()
    }
}
