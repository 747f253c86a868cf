//! Comparison requests: item extraction and the forced table format.

use promptc_ir::{Intent, OutputFormat};
use promptc_lexer::TokenKind;

use super::{IntentContext, IntentDelta};
use crate::constraints::{Emitter, Origin};
use crate::phrases::phrases;
use crate::text::Text;

pub const PRIORITY_COMPARISON: i32 = 55;

const TRIGGERS: &[&str] = &[
    "vs", "versus", "compare", "comparison", "comparing", "difference between",
    "differences between", "contrast", "pros and cons", "karşılaştır*", "arasındaki fark*",
    "compara*", "comparación", "diferencia*", "frente a",
];

/// Tokens that sit between two compared items.
const CONNECTORS: &[&str] = &["vs", "versus", "contra"];

/// Words that start a comparison clause (`compare X and Y`).
const ANCHORS: &[&str] = &[
    "compare", "comparing", "comparison", "difference", "differences", "contrast",
    "karşılaştır*", "compara*", "diferencia*",
];

/// Separators inside a comparison clause.
const SEPARATORS: &[&str] = &["and", "with", "to", "or", "ve", "ile", "veya", "y", "con", "o"];

const FILLERS: &[&str] = &[
    "the", "a", "an", "between", "of", "el", "la", "los", "las", "entre", "de", "arasındaki",
];

const MAX_ITEM_WORDS: usize = 3;

pub fn enrich(ctx: &IntentContext<'_>) -> Option<IntentDelta> {
    if !ctx.text.any(TRIGGERS) {
        return None;
    }
    let mut delta = IntentDelta::new(Intent::Comparison);
    let mut e = Emitter::new(Origin::Comparison);
    e.emit(PRIORITY_COMPARISON, phrases(ctx.language).comparison);
    delta.constraints = e.finish();
    delta.output_format = Some(OutputFormat::Table);
    delta.comparison_items = extract_items(ctx.text);
    Some(delta)
}

/// A word as seen by item extraction: lowercased, or `None` for a clause boundary.
fn clause_words(text: &Text<'_>) -> Vec<Option<String>> {
    text.tokens
        .iter()
        .filter_map(|t| match t.kind {
            TokenKind::Word | TokenKind::Number => Some(Some(t.text(text.raw).to_lowercase())),
            TokenKind::Symbol if t.ends_sentence(text.raw) => Some(None),
            TokenKind::Symbol if t.text(text.raw) == "," => Some(Some(",".to_string())),
            TokenKind::Symbol => None,
        })
        .collect()
}

fn matches_any(word: &str, list: &[&str]) -> bool {
    list.iter().any(|k| match k.strip_suffix('*') {
        Some(prefix) => word.starts_with(prefix),
        None => *k == word,
    })
}

/// `go'yu` -> `go`
fn strip_suffix(word: &str) -> &str {
    word.split(['\'', '’']).next().unwrap_or(word)
}

fn push(items: &mut Vec<String>, item: &str) {
    let item = strip_suffix(item);
    if !item.is_empty() && item != "," && !items.iter().any(|i| i == item) {
        items.push(item.to_string());
    }
}

/// The compared items, in order, or empty when fewer than two were found.
///
/// `X vs Y (vs Z)` takes the words next to each connector; otherwise the
/// clause after (or before) a comparison verb is split on separators.
pub fn extract_items(text: &Text<'_>) -> Vec<String> {
    let words = clause_words(text);
    let mut items: Vec<String> = Vec::new();

    for (i, word) in words.iter().enumerate() {
        let Some(word) = word else { continue };
        if !CONNECTORS.contains(&word.as_str()) {
            continue;
        }
        let left = i.checked_sub(1).and_then(|j| words[j].as_deref());
        // `vs.` lexes as a connector followed by a sentence end
        let right = match words.get(i + 1) {
            Some(None) if word == "vs" => words.get(i + 2).and_then(|w| w.as_deref()),
            next => next.and_then(|w| w.as_deref()),
        };
        if let (Some(left), Some(right)) = (left, right) {
            if !CONNECTORS.contains(&left) && left != "," {
                push(&mut items, left);
            }
            push(&mut items, right);
        }
    }
    if items.len() >= 2 {
        return items;
    }

    let Some(anchor) = words
        .iter()
        .position(|w| w.as_deref().is_some_and(|w| matches_any(w, ANCHORS)))
    else {
        return Vec::new();
    };

    // Clause after the anchor, else the clause before it
    let after: Vec<&str> = words[anchor + 1..]
        .iter()
        .map_while(|w| w.as_deref())
        .collect();
    let before: Vec<&str> = words[..anchor]
        .iter()
        .rev()
        .map_while(|w| w.as_deref())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    for clause in [after, before] {
        let segments = split_clause(&clause);
        if segments.len() >= 2 {
            let mut found = Vec::new();
            for segment in &segments {
                push(&mut found, segment);
            }
            if found.len() >= 2 {
                return found;
            }
        }
    }
    Vec::new()
}

fn split_clause(clause: &[&str]) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for word in clause {
        if *word == "," || SEPARATORS.contains(word) {
            if !current.is_empty() {
                segments.push(current.join(" "));
                current.clear();
            }
            continue;
        }
        if current.is_empty() && FILLERS.contains(word) {
            continue;
        }
        if current.len() < MAX_ITEM_WORDS {
            current.push(word);
        }
    }
    if !current.is_empty() {
        segments.push(current.join(" "));
    }
    segments
}
