//! Summary requests and bullet-count limits.

use promptc_ir::{Intent, LengthHint};

use super::{IntentContext, IntentDelta};
use crate::constraints::{Emitter, Origin};
use crate::phrases::{fill, phrases};
use crate::signals::quantities;

pub const PRIORITY_SUMMARY: i32 = 50;
pub const PRIORITY_BULLETS: i32 = 52;

const TRIGGERS: &[&str] = &[
    "summarize", "summarise", "summary", "tl;dr", "tldr", "in short", "recap", "key points",
    "özetle*", "özet", "resume el", "resume la", "resume los", "resume las", "resume este",
    "resume esta", "resumir", "resumen", "resúme*",
];

pub fn enrich(ctx: &IntentContext<'_>) -> Option<IntentDelta> {
    if !ctx.text.any(TRIGGERS) {
        return None;
    }
    let p = phrases(ctx.language);
    let mut delta = IntentDelta::new(Intent::Summary);
    let limit = quantities::count_of(&ctx.signals.quantities, "bullet").filter(|n| *n > 0);

    let mut e = Emitter::new(Origin::Summary);
    e.emit(PRIORITY_SUMMARY, p.summary);
    if let Some(n) = limit {
        e.emit(PRIORITY_BULLETS, fill(p.summary_bullets, "n", &n.to_string()));
    }
    delta.constraints = e.finish();
    delta.summary_limit = limit;
    delta.length_hint = Some(LengthHint::Short);
    Some(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals;
    use crate::tables::Tables;
    use crate::text::Text;
    use promptc_ir::Language;

    fn run(source: &str, language: Language) -> Option<IntentDelta> {
        let text = Text::new(source);
        let signals = signals::extract(&text, language, &Tables::builtin());
        enrich(&IntentContext {
            text: &text,
            language,
            signals: &signals,
        })
    }

    #[test]
    fn test_bullet_limit() {
        let delta = run("summarize the text in 5 bullet points", Language::En).unwrap();
        assert_eq!(delta.summary_limit, Some(5));
        let texts: Vec<_> = delta.constraints.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Provide a concise summary.", "Maximum 5 bullet points."]);
    }

    #[test]
    fn test_plain_summary() {
        let delta = run("tl;dr of this thread", Language::En).unwrap();
        assert_eq!(delta.summary_limit, None);
        assert_eq!(delta.constraints.len(), 1);
        assert_eq!(delta.length_hint, Some(LengthHint::Short));
    }

    #[test]
    fn test_turkish() {
        let delta = run("bu makaleyi 3 maddede özetle", Language::Tr).unwrap();
        assert_eq!(delta.summary_limit, Some(3));
        assert_eq!(delta.constraints[1].text, "En fazla 3 madde kullan.");
    }

    #[test]
    fn test_no_trigger() {
        assert!(run("compare rust and go", Language::En).is_none());
        assert!(run("update my resume for a backend role", Language::En).is_none());
    }

    #[test]
    fn test_spanish_imperative() {
        assert!(run("resume este artículo en 3 puntos", Language::Es).is_some());
    }
}
