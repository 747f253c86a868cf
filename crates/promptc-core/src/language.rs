//! Language detection from marker words and diacritics.

use promptc_ir::Language;
use std::collections::BTreeMap;
use tracing::debug;

use crate::text::Text;

/// Language used when scores tie or nothing matched.
pub const DEFAULT_LANGUAGE: Language = Language::En;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDetection {
    pub language: Language,
    /// Score per language label.
    pub scores: BTreeMap<String, u32>,
}

struct Markers {
    language: Language,
    /// Function words and request verbs; a trailing `*` matches a prefix.
    words: &'static [&'static str],
    /// Characters that, inside a word, point at the language.
    chars: &'static [char],
}

const MARKERS: &[Markers] = &[
    Markers {
        language: Language::En,
        words: &[
            "the", "a", "an", "and", "is", "are", "of", "to", "in", "for", "with", "what",
            "how", "me", "my", "please", "teach", "explain", "summarize", "compare", "this",
            "that", "write", "can", "you", "minutes", "level", "give", "show",
        ],
        chars: &[],
    },
    Markers {
        language: Language::Tr,
        words: &[
            "ve", "bir", "bu", "için", "ile", "nasıl", "nedir", "ne", "mi", "mı", "mu", "mü",
            "bana", "lütfen", "değil", "gibi", "daha", "çok", "olarak", "öğret*", "anlat*",
            "açıkla*", "özetle*", "karşılaştır*", "yaz*", "dakika*", "saat*", "seviye*",
        ],
        chars: &['ğ', 'ı', 'ş', 'İ', 'ç', 'ö'],
    },
    Markers {
        language: Language::Es,
        words: &[
            "el", "la", "los", "las", "de", "del", "que", "y", "en", "un", "una", "por",
            "para", "con", "cómo", "qué", "es", "enseña*", "explica*", "resumen",
            "compara*", "lección", "minutos", "nivel", "principiante", "dame", "escribe",
        ],
        chars: &['ñ', 'á', 'é', 'í', 'ó', 'ú', '¿', '¡'],
    },
];

/// Score each language by marker-word occurrences plus words carrying its diacritics.
///
/// Never fails; a tie for the top score falls back to [`DEFAULT_LANGUAGE`].
pub fn detect(text: &Text<'_>) -> LanguageDetection {
    let mut scores = BTreeMap::new();
    let mut ranked = Vec::with_capacity(MARKERS.len());

    for markers in MARKERS {
        let mut score = 0u32;
        for word in &text.words {
            if markers.words.iter().any(|m| marker_matches(m, word)) {
                score += 1;
            }
            if word.chars().any(|c| markers.chars.contains(&c)) {
                score += 1;
            }
        }
        // Inverted punctuation is a symbol token, not part of a word
        score += text
            .raw
            .chars()
            .filter(|c| matches!(c, '¿' | '¡') && markers.chars.contains(c))
            .count() as u32;

        scores.insert(markers.language.label().to_string(), score);
        ranked.push((markers.language, score));
    }

    let top = ranked.iter().map(|(_, s)| *s).max().unwrap_or(0);
    let leaders: Vec<Language> = ranked
        .iter()
        .filter(|(_, s)| *s == top)
        .map(|(l, _)| *l)
        .collect();

    let language = match leaders.as_slice() {
        [only] if top > 0 => *only,
        _ => DEFAULT_LANGUAGE,
    };

    debug!(%language, ?scores, "language detected");
    LanguageDetection { language, scores }
}

fn marker_matches(marker: &str, word: &str) -> bool {
    match marker.strip_suffix('*') {
        Some(prefix) => word.starts_with(prefix),
        None => marker == word,
    }
}

impl LanguageDetection {
    /// `en=4 es=0 tr=0`
    pub fn describe_scores(&self) -> String {
        self.scores
            .iter()
            .map(|(lang, score)| format!("{lang}={score}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(source: &str) -> Language {
        detect(&Text::new(source)).language
    }

    #[test]
    fn test_english() {
        assert_eq!(lang("teach me binary search in 10 minutes beginner level"), Language::En);
        assert_eq!(lang("summarize the text in 5 bullet points"), Language::En);
    }

    #[test]
    fn test_turkish() {
        assert_eq!(lang("Bana ikili aramayı 10 dakikada öğret"), Language::Tr);
        assert_eq!(lang("bu metni özetle lütfen"), Language::Tr);
    }

    #[test]
    fn test_spanish() {
        assert_eq!(lang("¿Cómo funciona la búsqueda binaria?"), Language::Es);
        assert_eq!(lang("enséñame python en 10 minutos"), Language::Es);
    }

    #[test]
    fn test_no_evidence_defaults() {
        let detection = detect(&Text::new("kubernetes 42"));
        assert_eq!(detection.language, DEFAULT_LANGUAGE);
        assert_eq!(detection.describe_scores(), "en=0 es=0 tr=0");
    }

    #[test]
    fn test_tie_defaults() {
        // one English marker, one Spanish marker
        assert_eq!(lang("the el"), DEFAULT_LANGUAGE);
        assert_eq!(lang("el ve"), DEFAULT_LANGUAGE);
    }
}
