//! Persona selection.

use promptc_ir::{Intent, Language, Persona};
use tracing::debug;

use crate::text::Text;

/// Candidate personas in tie-break order.
const CANDIDATES: [Persona; 5] = [
    Persona::Developer,
    Persona::Teacher,
    Persona::Researcher,
    Persona::Coach,
    Persona::Mentor,
];

const DEVELOPER: &[&str] = &[
    "code", "coding", "program", "programming", "developer", "function", "bug", "debug",
    "api", "script", "implement", "refactor", "compile", "deploy", "kod", "yazılım",
    "fonksiyon", "código", "programar", "función",
];
const TEACHER: &[&str] = &[
    "teach", "explain", "lesson", "learn", "tutorial", "beginner", "student", "öğret*",
    "anlat*", "ders", "öğren*", "enseña*", "explica*", "lección", "aprender", "principiante",
];
const RESEARCHER: &[&str] = &[
    "research", "analyze", "analyse", "analysis", "study", "paper", "evidence", "investigate",
    "sources", "araştır*", "analiz", "investiga*", "análisis",
];
const COACH: &[&str] = &[
    "coach", "motivate", "motivation", "habit", "habits", "goal", "goals", "fitness",
    "workout", "productivity", "motivasyon", "alışkanlık*", "hedef*", "motivación", "hábito*",
    "meta", "metas",
];
const MENTOR: &[&str] = &[
    "mentor", "career", "advice", "guidance", "interview", "promotion", "kariyer", "tavsiye",
    "rehberlik", "carrera", "consejo", "orientación",
];

fn keywords(persona: Persona) -> &'static [&'static str] {
    match persona {
        Persona::Developer => DEVELOPER,
        Persona::Teacher => TEACHER,
        Persona::Researcher => RESEARCHER,
        Persona::Coach => COACH,
        Persona::Mentor => MENTOR,
        Persona::Assistant => &[],
    }
}

fn domain_bonus(domain: &str) -> Option<(Persona, u32)> {
    match domain {
        "software" | "cloud" | "security" => Some((Persona::Developer, 2)),
        "data_science" => Some((Persona::Researcher, 2)),
        "education" => Some((Persona::Teacher, 2)),
        "health" => Some((Persona::Coach, 2)),
        _ => None,
    }
}

fn intent_bonus(intent: Intent) -> (Persona, u32) {
    match intent {
        Intent::Debug => (Persona::Developer, 3),
        Intent::Teaching => (Persona::Teacher, 3),
        Intent::Comparison => (Persona::Researcher, 1),
        Intent::Summary => (Persona::Researcher, 1),
        Intent::Variants => (Persona::Assistant, 0),
    }
}

/// Everything persona selection looks at.
pub struct PersonaInput<'a> {
    pub text: &'a Text<'a>,
    pub language: Language,
    pub domain: &'a str,
    pub intents: &'a [Intent],
    pub code_request: bool,
    pub override_persona: Option<Persona>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaSelection {
    pub persona: Persona,
    pub evidence: Vec<String>,
    /// Which rule decided (`override`, `debug`, `developer-over-teacher`, `score`, `default`).
    pub rule: &'static str,
}

/// Pick a persona.
///
/// Rules, first match wins: the override; a debug intent forces developer;
/// developer beats teacher whenever both have evidence; highest score with
/// ties broken by [`CANDIDATES`] order; assistant.
pub fn select(input: &PersonaInput<'_>) -> PersonaSelection {
    if let Some(persona) = input.override_persona {
        return PersonaSelection {
            persona,
            evidence: vec![format!("override:{persona}")],
            rule: "override",
        };
    }

    let mut scores = [0u32; CANDIDATES.len()];
    let mut evidence = Vec::new();
    let slot = |p: Persona| CANDIDATES.iter().position(|c| *c == p);

    for (i, persona) in CANDIDATES.iter().enumerate() {
        for keyword in input.text.matches(keywords(*persona).iter().copied()) {
            scores[i] += 1;
            evidence.push(format!("{persona}:{keyword}"));
        }
    }
    if let Some((persona, bonus)) = domain_bonus(input.domain) {
        if let Some(i) = slot(persona) {
            scores[i] += bonus;
            evidence.push(format!("{persona}:domain={}", input.domain));
        }
    }
    for intent in input.intents {
        let (persona, bonus) = intent_bonus(*intent);
        if let (Some(i), true) = (slot(persona), bonus > 0) {
            scores[i] += bonus;
            evidence.push(format!("{persona}:intent={intent}"));
        }
    }
    if input.code_request {
        scores[0] += 2;
        evidence.push("developer:code_request".to_string());
    }

    let (persona, rule) = if input.intents.contains(&Intent::Debug) {
        (Persona::Developer, "debug")
    } else if scores[0] > 0 && scores[1] > 0 {
        (Persona::Developer, "developer-over-teacher")
    } else {
        let best = scores.iter().copied().max().unwrap_or(0);
        match scores.iter().position(|s| *s == best) {
            Some(i) if best > 0 => (CANDIDATES[i], "score"),
            _ => (Persona::Assistant, "default"),
        }
    };

    debug!(%persona, rule, ?scores, language = %input.language, "persona selected");
    PersonaSelection {
        persona,
        evidence,
        rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(source: &str, domain: &str, intents: &[Intent], code_request: bool) -> PersonaSelection {
        let text = Text::new(source);
        select(&PersonaInput {
            text: &text,
            language: Language::En,
            domain,
            intents,
            code_request,
            override_persona: None,
        })
    }

    #[test]
    fn test_override_wins() {
        let text = Text::new("debug this stack trace");
        let selection = select(&PersonaInput {
            text: &text,
            language: Language::En,
            domain: "software",
            intents: &[Intent::Debug],
            code_request: true,
            override_persona: Some(Persona::Coach),
        });
        assert_eq!(selection.persona, Persona::Coach);
        assert_eq!(selection.rule, "override");
    }

    #[test]
    fn test_developer_over_teacher() {
        let selection = pick(
            "teach me binary search in 10 minutes beginner level",
            "software",
            &[Intent::Teaching],
            true,
        );
        assert_eq!(selection.persona, Persona::Developer);
        assert_eq!(selection.rule, "developer-over-teacher");
    }

    #[test]
    fn test_teacher_without_coding_context() {
        let selection = pick("teach me the french revolution", "general", &[Intent::Teaching], false);
        assert_eq!(selection.persona, Persona::Teacher);
        assert!(selection.evidence.contains(&"teacher:teach".to_string()));
    }

    #[test]
    fn test_debug_forces_developer() {
        let selection = pick("my habit tracker crashes", "general", &[Intent::Debug], false);
        assert_eq!(selection.persona, Persona::Developer);
    }

    #[test]
    fn test_default_assistant() {
        let selection = pick("write a haiku about rain", "general", &[], false);
        assert_eq!(selection.persona, Persona::Assistant);
        assert_eq!(selection.rule, "default");
    }

    #[test]
    fn test_domain_bonus() {
        let selection = pick("pandas dataframe tips", "data_science", &[], false);
        assert_eq!(selection.persona, Persona::Researcher);
    }
}
