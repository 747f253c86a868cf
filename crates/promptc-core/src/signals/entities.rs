//! Named entities: known technology names, acronyms and capitalized words.

use promptc_ir::{Entity, EntityKind};
use promptc_lexer::TokenKind;

use crate::text::Text;

pub const MAX_ENTITIES: usize = 20;

const TECHNOLOGIES: &[&str] = &[
    "python", "rust", "javascript", "typescript", "java", "kotlin", "swift", "golang", "ruby",
    "php", "scala", "haskell", "react", "vue", "angular", "svelte", "django", "flask",
    "fastapi", "spring", "kubernetes", "docker", "terraform", "ansible", "postgresql",
    "postgres", "mysql", "sqlite", "mongodb", "redis", "kafka", "graphql", "tensorflow",
    "pytorch", "pandas", "numpy", "linux", "git", "aws", "gcp", "azure", "nginx",
];

/// Entities in order of appearance, deduplicated case-insensitively.
pub fn detect(text: &Text<'_>) -> Vec<Entity> {
    let mut out: Vec<Entity> = Vec::new();
    let mut sentence_start = true;

    for token in &text.tokens {
        match token.kind {
            TokenKind::Symbol => {
                if token.ends_sentence(text.raw) {
                    sentence_start = true;
                }
                continue;
            }
            TokenKind::Number => {
                sentence_start = false;
                continue;
            }
            TokenKind::Word => {}
        }

        let word = token.text(text.raw);
        let lower = word.to_lowercase();
        let kind = if TECHNOLOGIES.contains(&lower.as_str()) {
            Some(EntityKind::Technology)
        } else if is_acronym(word) {
            Some(EntityKind::Acronym)
        } else if !sentence_start && is_capitalized(word) {
            Some(EntityKind::Proper)
        } else {
            None
        };
        sentence_start = false;

        if let Some(kind) = kind {
            if !out.iter().any(|e| e.text.to_lowercase() == lower) {
                out.push(Entity {
                    text: word.to_string(),
                    kind,
                });
                if out.len() == MAX_ENTITIES {
                    break;
                }
            }
        }
    }
    out
}

fn is_acronym(word: &str) -> bool {
    let letters = word.chars().filter(|c| c.is_alphabetic()).count();
    (2..=6).contains(&letters)
        && word.chars().count() <= 8
        && word
            .chars()
            .all(|c| c.is_uppercase() || c.is_ascii_digit())
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(char::is_uppercase) && chars.any(char::is_lowercase)
}
