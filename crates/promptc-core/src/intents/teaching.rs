//! Teaching mode: level, duration, topic, pedagogical constraints and the
//! fixed introduce / demonstrate / exercise / summarize sequence.

use promptc_ir::{Intent, Step, StepKind};
use promptc_lexer::TokenKind;

use super::{IntentContext, IntentDelta};
use crate::constraints::{Emitter, Origin};
use crate::phrases::{fill, phrases};
use crate::signals::quantities;
use crate::text::Text;

pub const PRIORITY_FLOW: i32 = 60;
pub const PRIORITY_TIME: i32 = 58;
pub const PRIORITY_LEVEL: i32 = 57;
pub const PRIORITY_ANALOGY: i32 = 55;
pub const PRIORITY_SOURCES: i32 = 45;

const TRIGGERS: &[&str] = &[
    "teach", "explain", "tutorial", "lesson", "walk me through", "help me understand",
    "how does", "learn", "öğret*", "anlat*", "açıkla*", "ders", "enseña*", "enséña*",
    "explica*", "explíca*", "lección", "aprender",
];

/// Single words after (or, for verb-final languages, before) which the topic sits.
const ANCHORS: &[&str] = &[
    "teach", "explain", "learn", "tutorial", "lesson", "understand", "through", "öğret*",
    "anlat*", "açıkla*", "enseña*", "enséña*", "explica*", "explíca*", "aprender",
];

const FILLERS: &[&str] = &[
    "me", "us", "about", "how", "to", "the", "a", "an", "what", "on", "sobre", "el", "la",
    "los", "las", "un", "una", "bana", "bize", "hakkında", "bir",
];

const STOPS: &[&str] = &[
    "in", "within", "for", "at", "with", "using", "under", "level", "and", "then", "en",
    "para", "con", "nivel", "y", "ile", "için", "seviye*", "ve",
];

const LEVELS: &[(&str, &[&str])] = &[
    (
        "beginner",
        &[
            "beginner", "beginners", "novice", "newbie", "introductory", "basics",
            "başlangıç", "yeni başlayan", "acemi", "principiante", "principiantes", "básico",
            "novato",
        ],
    ),
    ("intermediate", &["intermediate", "orta seviye", "intermedio"]),
    (
        "advanced",
        &["advanced", "expert", "ileri seviye", "ileri", "uzman", "avanzado", "experto"],
    ),
];

const MAX_TOPIC_WORDS: usize = 6;

pub fn enrich(ctx: &IntentContext<'_>) -> Option<IntentDelta> {
    if !ctx.text.any(TRIGGERS) {
        return None;
    }
    let p = phrases(ctx.language);
    let mut delta = IntentDelta::new(Intent::Teaching);

    let level = detect_level(ctx.text);
    let duration = quantities::duration_token(&ctx.signals.quantities);
    let topic = extract_topic(ctx.text);

    let mut e = Emitter::new(Origin::Teaching);
    e.emit(PRIORITY_FLOW, p.teach_flow);
    e.emit(PRIORITY_ANALOGY, p.teach_analogy);
    e.emit(PRIORITY_SOURCES, p.teach_sources);
    if let Some((_, value, hours)) = &duration {
        e.emit(PRIORITY_TIME, fill(p.teach_time, "duration", &p.duration(*value, *hours)));
    }
    if let Some(index) = level {
        e.emit(PRIORITY_LEVEL, fill(p.teach_level, "level", p.levels[index]));
    }
    delta.constraints = e.finish();

    let subject = topic.as_deref().unwrap_or(p.topic_fallback);
    let kinds = [
        StepKind::Introduce,
        StepKind::Demonstrate,
        StepKind::Exercise,
        StepKind::Summarize,
    ];
    delta.steps = Some(
        kinds
            .into_iter()
            .zip(p.teach_steps)
            .map(|(kind, template)| Step::new(kind, fill(template, "topic", subject)))
            .collect(),
    );
    delta.examples.push(fill(p.teach_quiz, "topic", subject));

    delta.inputs.level = level.map(|i| LEVELS[i].0.to_string());
    delta.inputs.duration = duration.map(|(token, _, _)| token);
    delta.inputs.interest = topic;
    delta.style.push("step-by-step");
    delta.tone.push("encouraging");
    Some(delta)
}

/// Index into [`LEVELS`] of the first level with evidence.
fn detect_level(text: &Text<'_>) -> Option<usize> {
    LEVELS
        .iter()
        .position(|(_, keywords)| text.any(keywords))
}

fn matches_any(word: &str, list: &[&str]) -> bool {
    list.iter().any(|k| match k.strip_suffix('*') {
        Some(prefix) => word.starts_with(prefix),
        None => *k == word,
    })
}

fn is_level_word(word: &str) -> bool {
    LEVELS.iter().any(|(_, keywords)| keywords.contains(&word))
}

/// The subject of a teaching request: the words following the teaching verb,
/// or preceding it when nothing follows (`bana ikili aramayı öğret`).
pub fn extract_topic(text: &Text<'_>) -> Option<String> {
    let words: Vec<(usize, &str)> = text
        .tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.kind == TokenKind::Word)
        .map(|(i, t)| (i, t.text(text.raw)))
        .collect();
    let lowered: Vec<String> = words.iter().map(|(_, w)| w.to_lowercase()).collect();

    let anchor = lowered.iter().position(|w| matches_any(w, ANCHORS))?;
    let anchor_token = words[anchor].0;

    let is_boundary = |token_index: usize| {
        let token = &text.tokens[token_index];
        token.kind == TokenKind::Number
            || (token.kind == TokenKind::Symbol
                && (token.ends_sentence(text.raw) || token.text(text.raw) == ","))
    };

    // Forward
    let mut topic: Vec<&str> = Vec::new();
    let mut last_token = anchor_token;
    for (slot, (token_index, _)) in words.iter().enumerate().skip(anchor + 1) {
        if (last_token + 1..*token_index).any(is_boundary) {
            break;
        }
        last_token = *token_index;
        let word = lowered[slot].as_str();
        if topic.is_empty() && matches_any(word, FILLERS) {
            continue;
        }
        if matches_any(word, STOPS) || is_level_word(word) || is_unit(word) {
            break;
        }
        topic.push(word);
        if topic.len() == MAX_TOPIC_WORDS {
            break;
        }
    }

    // Backward, for verb-final phrasing
    if topic.is_empty() {
        let mut next_token = anchor_token;
        for slot in (0..anchor).rev() {
            let token_index = words[slot].0;
            let crossed_boundary = (token_index + 1..next_token).any(is_boundary);
            next_token = token_index;
            let word = lowered[slot].as_str();
            if topic.is_empty() {
                // Skip trailing duration and stop words ("10 dakikada")
                if is_unit(word) || matches_any(word, STOPS) {
                    continue;
                }
            } else if crossed_boundary {
                break;
            }
            if matches_any(word, FILLERS) || matches_any(word, STOPS) {
                break;
            }
            topic.insert(0, word);
            if topic.len() == MAX_TOPIC_WORDS {
                break;
            }
        }
    }

    (!topic.is_empty()).then(|| topic.join(" "))
}

fn is_unit(word: &str) -> bool {
    matches!(
        word,
        "minutes" | "minute" | "min" | "hours" | "hour" | "dakika" | "dakikada" | "saat"
            | "saatte" | "minutos" | "horas"
    )
}
