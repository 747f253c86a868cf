//! High-level lexer interface.

use crate::token::{Token, TokenKind};
use logos::Logos;

/// A lexer for request text.
///
/// Wraps the logos-generated lexer. Characters the token rules do not cover are
/// reported as [`TokenKind::Symbol`] instead of an error, so iteration never fails.
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, TokenKind>,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given text.
    pub fn new(source: &'source str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
        }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = match self.inner.next()? {
            Ok(kind) => kind,
            Err(()) => TokenKind::Symbol,
        };
        Some(Token::new(kind, self.inner.span()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokenization() {
        let source = "python vs go";
        let tokens: Vec<_> = Lexer::new(source).collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text(source), "python");
        assert_eq!(tokens[1].text(source), "vs");
        assert_eq!(tokens[2].span, 10..12);
    }

    #[test]
    fn test_sentence_boundaries() {
        let source = "Fix it. Then test!";
        let ends: Vec<_> = Lexer::new(source)
            .filter(|t| t.ends_sentence(source))
            .map(|t| t.span)
            .collect();
        assert_eq!(ends, vec![6..7, 17..18]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Lexer::new("").count(), 0);
        assert_eq!(Lexer::new(" \n\t ").count(), 0);
    }
}
