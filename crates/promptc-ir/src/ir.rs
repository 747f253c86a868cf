//! IR records: the flat v1 shape and the typed v2 shape.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::{
    AmbiguityCategory, Complexity, EntityKind, Intent, Language, LengthHint, OutputFormat,
    Persona, PiiKind, QuantityKind, StepKind,
};

/// A constraint in the typed schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Position-derived identifier (`c1`, `c2`, ...)
    pub id: String,
    /// Constraint text, localized to the IR language
    pub text: String,
    /// Producing stage (`teaching`, `risk_flags`, `plugin:<name>`, ...)
    pub origin: String,
    /// Ordering weight; higher renders first
    pub priority: i32,
}

/// A typed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub text: String,
}

impl Step {
    pub fn new(kind: StepKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// User-supplied parameters recovered from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Inputs {
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Present keys with their values, in schema order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("interest", &self.interest),
            ("budget", &self.budget),
            ("format", &self.format),
            ("level", &self.level),
            ("duration", &self.duration),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.as_deref().map(|v| (k, v)))
        .collect()
    }
}

/// A structured clarification request for an ambiguous term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarifyQuestion {
    pub term: String,
    pub category: AmbiguityCategory,
    pub question: String,
}

/// A numeric literal with a unit or a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Matched text as written
    pub raw: String,
    pub kind: QuantityKind,
    pub value: f64,
    /// Upper bound for ranges (`10-20 minutes`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    /// Canonical unit (`minute`, `hour`, `usd`, `bullet`, ...)
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub kind: EntityKind,
}

/// Evidence and diagnostic byproducts of a compile.
///
/// Shared by both shapes. `intents` and `constraint_origins` are only
/// populated in the v1 shape, where the top level cannot carry them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub ir_version: String,
    pub heuristic_version: String,

    pub language_scores: BTreeMap<String, u32>,

    pub domain_candidates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_confidence: Option<f64>,
    pub domain_scores: BTreeMap<String, u32>,
    pub domain_evidence: Vec<String>,

    pub persona_evidence: Vec<String>,

    pub pii_flags: Vec<PiiKind>,
    pub temporal_flags: Vec<String>,
    pub quantities: Vec<Quantity>,
    pub ambiguous_terms: Vec<String>,
    pub clarify_questions_struct: Vec<ClarifyQuestion>,
    pub risk_flags: Vec<String>,
    pub entities: Vec<Entity>,
    pub complexity: Complexity,
    pub code_request: bool,

    pub teaching_mode: bool,
    pub comparison_items: Vec<String>,
    pub summary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_count: Option<u32>,
    pub debug: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intents: Option<Vec<Intent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint_origins: Option<BTreeMap<String, String>>,

    /// Names of constraint plugins that contributed
    pub plugins: Vec<String>,
    /// Whether the hybrid enrichment hook patched this IR
    pub hybrid: bool,
}

/// The flat legacy shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrV1 {
    pub version: String,
    pub language: Language,
    pub persona: Persona,
    pub role: String,
    pub domain: String,
    pub goals: Vec<String>,
    pub tasks: Vec<String>,
    pub inputs: Inputs,
    pub constraints: Vec<String>,
    pub style: BTreeSet<String>,
    pub tone: BTreeSet<String>,
    pub output_format: OutputFormat,
    pub length_hint: LengthHint,
    pub steps: Vec<String>,
    pub examples: Vec<String>,
    pub banned: Vec<String>,
    pub tools: Vec<String>,
    pub metadata: Metadata,
}

/// The typed shape: constraints carry provenance, steps carry a kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrV2 {
    pub version: String,
    pub language: Language,
    pub persona: Persona,
    pub role: String,
    pub domain: String,
    pub intents: Vec<Intent>,
    pub goals: Vec<String>,
    pub tasks: Vec<String>,
    pub inputs: Inputs,
    pub constraints: Vec<Constraint>,
    pub style: BTreeSet<String>,
    pub tone: BTreeSet<String>,
    pub output_format: OutputFormat,
    pub length_hint: LengthHint,
    pub steps: Vec<Step>,
    pub examples: Vec<String>,
    pub banned: Vec<String>,
    pub tools: Vec<String>,
    pub metadata: Metadata,
}

/// Read access common to both shapes, for consumers that render either one.
pub trait IrView {
    fn language(&self) -> Language;
    fn persona(&self) -> Persona;
    fn role(&self) -> &str;
    fn domain(&self) -> &str;
    fn intents(&self) -> Vec<Intent>;
    fn goals(&self) -> &[String];
    fn tasks(&self) -> &[String];
    fn inputs(&self) -> &Inputs;
    fn constraint_texts(&self) -> Vec<&str>;
    fn step_texts(&self) -> Vec<&str>;
    fn style(&self) -> &BTreeSet<String>;
    fn tone(&self) -> &BTreeSet<String>;
    fn output_format(&self) -> OutputFormat;
    fn length_hint(&self) -> LengthHint;
    fn examples(&self) -> &[String];
    fn banned(&self) -> &[String];
    fn tools(&self) -> &[String];
    fn metadata(&self) -> &Metadata;
}

macro_rules! common_view {
    () => {
        fn language(&self) -> Language {
            self.language
        }
        fn persona(&self) -> Persona {
            self.persona
        }
        fn role(&self) -> &str {
            &self.role
        }
        fn domain(&self) -> &str {
            &self.domain
        }
        fn goals(&self) -> &[String] {
            &self.goals
        }
        fn tasks(&self) -> &[String] {
            &self.tasks
        }
        fn inputs(&self) -> &Inputs {
            &self.inputs
        }
        fn style(&self) -> &BTreeSet<String> {
            &self.style
        }
        fn tone(&self) -> &BTreeSet<String> {
            &self.tone
        }
        fn output_format(&self) -> OutputFormat {
            self.output_format
        }
        fn length_hint(&self) -> LengthHint {
            self.length_hint
        }
        fn examples(&self) -> &[String] {
            &self.examples
        }
        fn banned(&self) -> &[String] {
            &self.banned
        }
        fn tools(&self) -> &[String] {
            &self.tools
        }
        fn metadata(&self) -> &Metadata {
            &self.metadata
        }
    };
}

impl IrView for IrV1 {
    common_view!();

    fn intents(&self) -> Vec<Intent> {
        self.metadata.intents.clone().unwrap_or_default()
    }

    fn constraint_texts(&self) -> Vec<&str> {
        self.constraints.iter().map(String::as_str).collect()
    }

    fn step_texts(&self) -> Vec<&str> {
        self.steps.iter().map(String::as_str).collect()
    }
}

impl IrView for IrV2 {
    common_view!();

    fn intents(&self) -> Vec<Intent> {
        self.intents.clone()
    }

    fn constraint_texts(&self) -> Vec<&str> {
        self.constraints.iter().map(|c| c.text.as_str()).collect()
    }

    fn step_texts(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.text.as_str()).collect()
    }
}
