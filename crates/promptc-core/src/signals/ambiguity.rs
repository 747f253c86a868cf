//! Vague requirement terms and their clarification questions.

use promptc_ir::{ClarifyQuestion, Language};

use crate::phrases::phrases;
use crate::tables::Tables;
use crate::text::Text;

/// At most this many clarification questions are surfaced.
pub const MAX_QUESTIONS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbiguityFindings {
    /// Every ambiguous term found, in order of appearance.
    pub terms: Vec<String>,
    pub questions: Vec<ClarifyQuestion>,
}

pub fn detect(text: &Text<'_>, language: Language, tables: &Tables) -> AmbiguityFindings {
    let mut hits: Vec<(usize, usize, &str, promptc_ir::AmbiguityCategory)> = tables
        .ambiguous_terms
        .iter()
        .enumerate()
        .filter_map(|(index, (term, category))| {
            text.find_phrase(term)
                .map(|pos| (pos, index, term.as_str(), *category))
        })
        .collect();
    hits.sort_by_key(|&(pos, index, _, _)| (pos, index));

    let phrases = phrases(language);
    let questions = hits
        .iter()
        .take(MAX_QUESTIONS)
        .map(|&(_, _, term, category)| ClarifyQuestion {
            term: term.to_string(),
            category,
            question: phrases.question(category, term),
        })
        .collect();

    AmbiguityFindings {
        terms: hits.iter().map(|&(_, _, term, _)| term.to_string()).collect(),
        questions,
    }
}
