//! Token definitions for request text.

use logos::Logos;

/// A token with its kind and byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: std::ops::Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, span: std::ops::Range<usize>) -> Self {
        Self { kind, span }
    }

    /// The slice of `source` this token covers.
    ///
    /// `source` must be the text the token was produced from.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.clone()).unwrap_or("")
    }

    /// Whether this token is a sentence terminator (`.`, `!`, `?`, `;`, `¿`, `¡`).
    pub fn ends_sentence(&self, source: &str) -> bool {
        self.kind == TokenKind::Symbol
            && matches!(self.text(source), "." | "!" | "?" | ";" | "¿" | "¡" | "\u{2026}")
    }
}

/// Token kinds for request text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"\s+")]
pub enum TokenKind {
    /// A run of letters, optionally joined by `'`, `’`, `-` or `_` (`don't`, `go'yu`, `well-known`).
    #[regex(r"\p{L}[\p{L}\p{M}\p{N}_'’\-]*")]
    Word,

    /// Integer or decimal literal (`10`, `1.5`, `3,5`).
    #[regex(r"[0-9]+([.,][0-9]+)?")]
    Number,

    /// Any other single non-space character.
    #[regex(r"[^\s\p{L}0-9]")]
    Symbol,
}

impl TokenKind {
    /// Check if this token carries lexical content (word or number).
    pub fn is_content(&self) -> bool {
        matches!(self, TokenKind::Word | TokenKind::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        TokenKind::lexer(source).filter_map(|r| r.ok()).collect()
    }

    #[test]
    fn test_words() {
        assert_eq!(kinds("hello world"), vec![TokenKind::Word, TokenKind::Word]);
        assert_eq!(kinds("don't"), vec![TokenKind::Word]);
        assert_eq!(kinds("öğret açıkla"), vec![TokenKind::Word, TokenKind::Word]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("42"), vec![TokenKind::Number]);
        assert_eq!(kinds("1.5"), vec![TokenKind::Number]);
        assert_eq!(kinds("15m"), vec![TokenKind::Number, TokenKind::Word]);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            kinds("a@b.com"),
            vec![
                TokenKind::Word,
                TokenKind::Symbol,
                TokenKind::Word,
                TokenKind::Symbol,
                TokenKind::Word
            ]
        );
        assert_eq!(kinds("¿qué?"), vec![TokenKind::Symbol, TokenKind::Word, TokenKind::Symbol]);
    }
}
