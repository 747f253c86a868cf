//! Code-request detection.

use crate::text::Text;

const CODE_KEYWORDS: &[&str] = &[
    "code", "coding", "function", "script", "program", "implement", "implementation",
    "algorithm", "binary search", "class", "method", "api", "sql", "query", "regex", "debug",
    "refactor", "compile", "snippet", "python", "javascript", "typescript", "rust", "java",
    "golang", "c++", "c#", "bash", "kod", "fonksiyon", "algoritma", "betik", "código",
    "función", "algoritmo", "programa",
];

/// Whether the request asks for (or is about) code.
pub fn detect(text: &Text<'_>) -> bool {
    text.raw.contains("```") || text.any(CODE_KEYWORDS)
}
