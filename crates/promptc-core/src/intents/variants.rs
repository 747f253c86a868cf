//! Variant generation with count normalization.

use lazy_static::lazy_static;
use promptc_ir::Intent;
use regex::Regex;
use smol_str::SmolStr;

use super::{IntentContext, IntentDelta};
use crate::constraints::{Emitter, Origin};
use crate::phrases::{fill, phrases};
use crate::signals::quantities;

pub const PRIORITY_VARIANTS: i32 = 50;
pub const DEFAULT_VARIANTS: u32 = 3;
pub const MAX_VARIANTS: u32 = 10;

const TRIGGERS: &[&str] = &[
    "variants", "variant", "variations", "alternatives", "alternative", "options", "versions",
    "version", "different ways", "varyasyon*", "alternatif*", "seçenek*", "variantes", "alternativas",
    "opciones", "versiones",
];

const NUMBER_WORDS: &[(&str, u32)] = &[
    ("zero", 0), ("one", 1), ("two", 2), ("three", 3), ("four", 4), ("five", 5), ("six", 6),
    ("seven", 7), ("eight", 8), ("nine", 9), ("ten", 10), ("fifteen", 15), ("twenty", 20),
    ("bir", 1), ("iki", 2), ("üç", 3), ("dört", 4), ("beş", 5), ("altı", 6), ("yedi", 7),
    ("sekiz", 8), ("dokuz", 9),
    ("uno", 1), ("una", 1), ("dos", 2), ("tres", 3), ("cuatro", 4), ("cinco", 5), ("seis", 6),
    ("siete", 7), ("ocho", 8), ("nueve", 9), ("diez", 10),
];

lazy_static! {
    /// A word naming the things to generate.
    static ref VARIANT_NOUN: Regex = Regex::new(
        r"^(?:variants?|variations?|alternatives?|options?|versions?|ways|varyasyon\p{L}*|alternatif\p{L}*|seçenek\p{L}*|variantes|alternativas|opciones|versiones)$"
    )
    .unwrap();
}

/// Requested count -> effective count. `None` from a `Some` request means
/// variant mode is off.
///
/// Nothing requested gives the default, 0 or 1 disables, anything else is
/// capped at [`MAX_VARIANTS`].
pub fn normalize_variant_count(requested: Option<u32>) -> Option<u32> {
    match requested {
        None => Some(DEFAULT_VARIANTS),
        Some(0 | 1) => None,
        Some(n) => Some(n.min(MAX_VARIANTS)),
    }
}

pub fn enrich(ctx: &IntentContext<'_>) -> Option<IntentDelta> {
    if !ctx.text.any(TRIGGERS) {
        return None;
    }
    let requested = quantities::count_of(&ctx.signals.quantities, "variant")
        .or_else(|| spelled_count(&ctx.text.words));
    let count = normalize_variant_count(requested)?;

    let mut delta = IntentDelta::new(Intent::Variants);
    let mut e = Emitter::new(Origin::Variants);
    e.emit(
        PRIORITY_VARIANTS,
        fill(phrases(ctx.language).variants, "n", &count.to_string()),
    );
    delta.constraints = e.finish();
    delta.variant_count = Some(count);
    Some(delta)
}

/// A spelled-out count right before a variant noun, or one word before it
/// (`three different options`).
fn spelled_count(words: &[SmolStr]) -> Option<u32> {
    words
        .iter()
        .enumerate()
        .filter(|(_, word)| VARIANT_NOUN.is_match(word))
        .find_map(|(i, _)| {
            words[i.saturating_sub(2)..i]
                .iter()
                .rev()
                .find_map(|word| number_word(word))
        })
}

fn number_word(word: &str) -> Option<u32> {
    NUMBER_WORDS
        .iter()
        .find(|(spelling, _)| *spelling == word)
        .map(|(_, n)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals;
    use crate::tables::Tables;
    use crate::text::Text;
    use promptc_ir::Language;

    fn run(source: &str) -> Option<IntentDelta> {
        let text = Text::new(source);
        let signals = signals::extract(&text, Language::En, &Tables::builtin());
        enrich(&IntentContext {
            text: &text,
            language: Language::En,
            signals: &signals,
        })
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_variant_count(None), Some(3));
        assert_eq!(normalize_variant_count(Some(0)), None);
        assert_eq!(normalize_variant_count(Some(1)), None);
        assert_eq!(normalize_variant_count(Some(2)), Some(2));
        assert_eq!(normalize_variant_count(Some(15)), Some(10));
    }

    #[test]
    fn test_counts_from_text() {
        assert_eq!(run("give me 4 variants of this slogan").unwrap().variant_count, Some(4));
        assert_eq!(run("write 15 alternatives").unwrap().variant_count, Some(10));
        assert_eq!(run("suggest alternatives for the title").unwrap().variant_count, Some(3));
        assert_eq!(
            run("show me three different options").unwrap().variant_count,
            Some(3)
        );
    }

    #[test]
    fn test_spelled_counts_in_running_text() {
        assert_eq!(
            run("give me two options for the landing page headline").unwrap().variant_count,
            Some(2)
        );
        assert_eq!(
            run("please give me five alternatives for this email subject").unwrap().variant_count,
            Some(5)
        );
        assert_eq!(
            run("can you write twenty versions of the tagline").unwrap().variant_count,
            Some(10)
        );
        assert!(run("give me one alternative to this opening line").is_none());
    }

    #[test]
    fn test_number_word_must_sit_next_to_noun() {
        assert_eq!(
            run("two of my friends asked for options").unwrap().variant_count,
            Some(3)
        );
    }

    #[test]
    fn test_disabled() {
        assert!(run("just 1 version please").is_none());
        assert!(run("write a haiku").is_none());
    }

    #[test]
    fn test_constraint_text() {
        let delta = run("5 versions of the intro").unwrap();
        assert_eq!(delta.constraints[0].text, "Generate 5 distinct variants.");
        assert_eq!(delta.constraints[0].priority, PRIORITY_VARIANTS);
    }
}
