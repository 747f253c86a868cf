//! # promptc lexer
//!
//! Splits a natural-language request into word, number and symbol tokens.
//!
//! The lexer uses the `logos` crate for fast, zero-copy tokenization. It never
//! fails: every character of the input belongs to some token (or to skipped
//! whitespace), so downstream detectors can always work on a best-effort token
//! stream.
//!
//! ## Example
//!
//! ```
//! use promptc_lexer::{tokenize, TokenKind};
//!
//! let source = "python vs go, 2024";
//! let tokens = tokenize(source);
//!
//! assert_eq!(tokens[0].text(source), "python");
//! assert_eq!(tokens[3].kind, TokenKind::Symbol);
//! assert_eq!(tokens[4].kind, TokenKind::Number);
//! ```

mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};

use smol_str::SmolStr;

/// Tokenize request text into a vector of tokens.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lowercased word tokens, in order of appearance.
pub fn lower_words(source: &str) -> Vec<SmolStr> {
    Lexer::new(source)
        .filter(|t| t.kind == TokenKind::Word)
        .map(|t| SmolStr::new(t.text(source).to_lowercase()))
        .collect()
}

/// Number of word and number tokens (the "length" of a request).
pub fn word_count(source: &str) -> usize {
    Lexer::new(source)
        .filter(|t| t.kind.is_content())
        .count()
}
