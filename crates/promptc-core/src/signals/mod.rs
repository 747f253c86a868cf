//! Independent, side-effect-free sub-detectors.
//!
//! Every detector works on best-effort substrings and returns an empty finding
//! rather than an error.

pub mod ambiguity;
pub mod code;
pub mod complexity;
pub mod entities;
pub mod pii;
pub mod quantities;
pub mod risk;
pub mod temporal;

use promptc_ir::{Complexity, Entity, Language, PiiKind, Quantity};
use tracing::debug;

use crate::constraints::{Emission, Emitter, Origin};
use crate::phrases::{fill, phrases};
use crate::tables::Tables;
use crate::text::Text;

pub use ambiguity::AmbiguityFindings;
pub use temporal::TemporalFindings;

pub const PRIORITY_PII: i32 = 90;
pub const PRIORITY_RISK: i32 = 85;
pub const PRIORITY_RECENCY: i32 = 45;
pub const PRIORITY_CODE: i32 = 40;
pub const PRIORITY_AMBIGUITY: i32 = 20;

/// Everything the sub-detectors found.
#[derive(Debug, Clone, Default)]
pub struct Signals {
    pub pii: Vec<PiiKind>,
    pub temporal: TemporalFindings,
    pub quantities: Vec<Quantity>,
    pub ambiguity: AmbiguityFindings,
    pub risk: Vec<String>,
    pub entities: Vec<Entity>,
    pub complexity: Complexity,
    pub complexity_points: u32,
    pub code_request: bool,
}

pub fn extract(text: &Text<'_>, language: Language, tables: &Tables) -> Signals {
    let (complexity, complexity_points) = complexity::score(text);
    let signals = Signals {
        pii: pii::detect(text.raw),
        temporal: temporal::detect(text, language),
        quantities: quantities::detect(text.raw),
        ambiguity: ambiguity::detect(text, language, tables),
        risk: risk::detect(text, language, tables),
        entities: entities::detect(text),
        complexity,
        complexity_points,
        code_request: code::detect(text),
    };
    debug!(
        pii = ?signals.pii,
        temporal = signals.temporal.flags.len(),
        quantities = signals.quantities.len(),
        ambiguous = signals.ambiguity.terms.len(),
        risk = ?signals.risk,
        %complexity,
        code_request = signals.code_request,
        "signals extracted"
    );
    signals
}

impl Signals {
    /// Constraints implied by the signals, localized to `language`.
    pub fn emissions(&self, language: Language) -> Vec<Emission> {
        let p = phrases(language);
        let mut out = Vec::new();

        if !self.pii.is_empty() {
            let mut e = Emitter::new(Origin::Pii);
            e.emit(PRIORITY_PII, p.privacy);
            out.extend(e.finish());
        }
        if !self.risk.is_empty() {
            let categories = self.risk.join("/");
            let mut e = Emitter::new(Origin::Risk);
            e.emit(PRIORITY_RISK, fill(p.disclaimer, "categories", &categories));
            out.extend(e.finish());
        }
        if self.temporal.recency {
            let mut e = Emitter::new(Origin::Recency);
            e.emit(PRIORITY_RECENCY, p.recency);
            out.extend(e.finish());
        }
        if self.code_request {
            let mut e = Emitter::new(Origin::Code);
            e.emit(PRIORITY_CODE, p.code_comments);
            out.extend(e.finish());
        }
        if !self.ambiguity.terms.is_empty() {
            let terms = self.ambiguity.terms.join(", ");
            let mut e = Emitter::new(Origin::Ambiguity);
            e.emit(PRIORITY_AMBIGUITY, fill(p.ambiguity, "terms", &terms));
            out.extend(e.finish());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_and_emit() {
        let text = Text::new("my email is a@b.com, should I invest in bitcoin? need a fast answer");
        let signals = extract(&text, Language::En, &Tables::builtin());
        assert_eq!(signals.pii, vec![PiiKind::Email]);
        assert_eq!(signals.risk, vec!["financial"]);
        assert_eq!(signals.ambiguity.terms, vec!["fast"]);

        let emissions = signals.emissions(Language::En);
        let origins: Vec<_> = emissions.iter().map(|e| e.origin.label()).collect();
        assert_eq!(origins, vec!["pii", "risk_flags", "ambiguity"]);
        assert!(emissions[1].text.contains("financial"));
        assert_eq!(emissions[0].priority, PRIORITY_PII);
    }

    #[test]
    fn test_quiet_text_emits_nothing() {
        let text = Text::new("write a haiku about rain");
        let signals = extract(&text, Language::En, &Tables::builtin());
        assert!(signals.emissions(Language::En).is_empty());
    }
}
