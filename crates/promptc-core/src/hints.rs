//! Output-shape hints: format, length, style, tone, banned items, tools,
//! goals and tasks, plus the format and domain constraints.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use promptc_ir::{Complexity, Language, LengthHint, OutputFormat, QuantityKind, Step, StepKind, GENERAL_DOMAIN};
use regex::Regex;

use crate::constraints::{Emission, Emitter, Origin};
use crate::intents::IntentOutcome;
use crate::phrases::{fill, phrases};
use crate::signals::Signals;
use crate::text::Text;

pub const PRIORITY_FORMAT: i32 = 35;
pub const PRIORITY_DOMAIN: i32 = 25;

pub const MAX_GOAL_CHARS: usize = 240;
pub const MAX_TASKS: usize = 10;

/// Checked in order; the first format mentioned wins.
const FORMATS: &[(OutputFormat, &[&str])] = &[
    (OutputFormat::Json, &["json"]),
    (OutputFormat::Yaml, &["yaml", "yml"]),
    (OutputFormat::Table, &["table", "tabular", "tablo*", "tabla"]),
    (OutputFormat::Text, &["plain text", "düz metin", "texto plano"]),
    (OutputFormat::Markdown, &["markdown"]),
];

const SHORT: &[&str] = &[
    "short", "brief", "briefly", "concise", "quick", "kısa", "kısaca", "breve", "corto",
];

const LONG: &[&str] = &[
    "detailed", "in-depth", "in depth", "comprehensive", "thorough", "ayrıntılı", "detaylı",
    "kapsamlı", "detallado", "exhaustivo", "extenso",
];

const STYLES: &[(&str, &[&str])] = &[
    ("step-by-step", &["step by step", "step-by-step", "adım adım", "paso a paso"]),
    ("concise", &["concise", "brief", "to the point", "kısa ve öz", "conciso"]),
    ("detailed", &["detailed", "in-depth", "ayrıntılı", "detaylı", "detallado"]),
    ("technical", &["technical", "teknik", "técnico"]),
    ("simple", &["simple", "simply", "eli5", "plain english", "basit", "sencillo"]),
    ("academic", &["academic", "scholarly", "akademik", "académico"]),
];

const TONES: &[(&str, &[&str])] = &[
    ("formal", &["formal", "professional", "resmi", "profesional"]),
    ("friendly", &["friendly", "casual", "warm", "samimi", "amigable"]),
    ("encouraging", &["encouraging", "motivating", "motivational", "motive", "motivador"]),
    ("neutral", &["neutral", "objective", "unbiased", "objektif", "objetivo"]),
    ("humorous", &["funny", "humorous", "witty", "esprili", "divertido"]),
];

const WEB: &[&str] = &[
    "search", "news", "latest", "web", "internet", "online", "browse", "haber*", "güncel",
    "noticias", "buscar", "últimas",
];

lazy_static! {
    static ref BANNED: Regex = Regex::new(
        r"(?i)\b(?:avoid(?:ing)?|without(?:\s+using)?|don't\s+use|dont\s+use|do\s+not\s+use|never\s+use|no\s+uses|sin|evita(?:r)?)\s+(?:(?:the|a|an|any|el|la|los|las|un|una)\s+)?(?P<item>[\p{L}\p{N}_+#.\-]+)"
    )
    .unwrap();
    static ref BANNED_TR: Regex =
        Regex::new(r"(?i)(?P<item>[\p{L}\p{N}_+#\-]+)\s+(?:olmadan|kullanmadan|kullanma)\b").unwrap();
    static ref TASK_SPLIT: Regex = Regex::new(
        r"(?i)[.!?;]+(?:\s+|$)|\s+(?:and\s+)?then\s+|\s+(?:ve\s+)?ardından\s+|\s+(?:y\s+)?luego\s+|\s+después\s+"
    )
    .unwrap();
}

/// Derived output-shape fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Hints {
    /// Format the request named, if any.
    pub explicit_format: Option<OutputFormat>,
    pub output_format: OutputFormat,
    pub length_hint: LengthHint,
    pub style: BTreeSet<String>,
    pub tone: BTreeSet<String>,
    pub banned: Vec<String>,
    pub tools: Vec<String>,
    pub goals: Vec<String>,
    pub tasks: Vec<String>,
    pub budget: Option<String>,
}

pub fn derive(text: &Text<'_>, signals: &Signals, intents: &IntentOutcome) -> Hints {
    let explicit_format = FORMATS
        .iter()
        .find(|(_, keywords)| text.any(keywords))
        .map(|(format, _)| *format);
    let output_format = intents
        .output_format
        .or(explicit_format)
        .unwrap_or(OutputFormat::Markdown);

    let explicit_length = if text.any(SHORT) {
        Some(LengthHint::Short)
    } else if text.any(LONG) {
        Some(LengthHint::Long)
    } else {
        None
    };
    let length_hint = explicit_length
        .or(intents.length_hint)
        .unwrap_or(match signals.complexity {
            Complexity::Low => LengthHint::Short,
            Complexity::Medium => LengthHint::Medium,
            Complexity::High => LengthHint::Long,
        });

    let mut style: BTreeSet<String> = labels(text, STYLES);
    style.extend(intents.style.iter().map(|s| s.to_string()));
    let mut tone: BTreeSet<String> = labels(text, TONES);
    tone.extend(intents.tone.iter().map(|s| s.to_string()));

    let tools = if signals.temporal.recency || text.any(WEB) {
        vec!["web".to_string()]
    } else {
        Vec::new()
    };

    let collapsed = text.raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let goal: String = collapsed.chars().take(MAX_GOAL_CHARS).collect();

    let budget = signals
        .quantities
        .iter()
        .find(|q| q.kind == QuantityKind::Currency)
        .map(|q| q.raw.clone());

    Hints {
        explicit_format,
        output_format,
        length_hint,
        style,
        tone,
        banned: banned(text.raw),
        tools,
        goals: vec![goal.trim_end().to_string()],
        tasks: split_tasks(&collapsed),
        budget,
    }
}

fn labels(text: &Text<'_>, table: &[(&str, &[&str])]) -> BTreeSet<String> {
    table
        .iter()
        .filter(|(_, keywords)| text.any(keywords))
        .map(|(label, _)| label.to_string())
        .collect()
}

/// Items the request explicitly excludes, lowercased, in order of appearance.
pub fn banned(raw: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();
    for caps in BANNED.captures_iter(raw).chain(BANNED_TR.captures_iter(raw)) {
        let Some(item) = caps.name("item") else {
            continue;
        };
        let word = item.as_str().trim_end_matches(['.', ',']).to_lowercase();
        if !word.is_empty() && !found.iter().any(|(_, w)| *w == word) {
            found.push((item.start(), word));
        }
    }
    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, w)| w).collect()
}

/// Sentence-level and "then"-chained tasks.
pub fn split_tasks(collapsed: &str) -> Vec<String> {
    TASK_SPLIT
        .split(collapsed)
        .map(str::trim)
        .filter(|t| t.chars().any(char::is_alphanumeric))
        .take(MAX_TASKS)
        .map(str::to_string)
        .collect()
}

impl Hints {
    /// Generic steps for requests no intent gave steps to.
    pub fn default_steps(&self) -> Vec<Step> {
        if self.tasks.len() > 1 {
            self.tasks
                .iter()
                .map(|t| Step::new(StepKind::Task, t.clone()))
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Format and domain constraints.
    pub fn emissions(&self, language: Language, domain: &str) -> Vec<Emission> {
        let p = phrases(language);
        let mut out = Vec::new();
        if self.explicit_format.is_some() {
            let mut e = Emitter::new(Origin::Format);
            e.emit(PRIORITY_FORMAT, p.format(self.output_format));
            out.extend(e.finish());
        }
        if domain != GENERAL_DOMAIN {
            let mut e = Emitter::new(Origin::Domain);
            e.emit(PRIORITY_DOMAIN, fill(p.domain, "domain", &domain.replace('_', " ")));
            out.extend(e.finish());
        }
        out
    }
}
