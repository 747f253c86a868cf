//! Extension points.
//!
//! - [`ConstraintPlugin`]: adds constraints after core synthesis. Runs once
//!   per compile with a read-only view of the draft.
//! - [`HybridEnricher`]: optional final patch (persona, role, constraints,
//!   steps) before assembly, typically backed by a model outside the core.
//!
//! Neither hook can touch shared state; both see the draft only through the
//! context types here.

use promptc_ir::{Intent, Language, Persona, Step};

/// Extension API version a plugin must target.
pub const PLUGIN_API_VERSION: u32 = 1;

/// What a constraint plugin can see.
#[derive(Debug, Clone)]
pub struct PluginContext<'a> {
    pub text: &'a str,
    pub language: Language,
    pub domain: &'a str,
    pub persona: Persona,
    pub intents: &'a [Intent],
    /// Constraint texts synthesized so far, in order.
    pub constraints: &'a [String],
}

/// A constraint contributed by a plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConstraint {
    pub text: String,
    pub priority: i32,
}

impl PluginConstraint {
    pub fn new(text: impl Into<String>, priority: i32) -> Self {
        Self {
            text: text.into(),
            priority,
        }
    }
}

/// Constraint extension trait
pub trait ConstraintPlugin: Send + Sync {
    /// Stable name; constraints get origin `plugin:<name>`
    fn name(&self) -> &str;

    /// Extension API version this plugin targets
    fn api_version(&self) -> u32 {
        PLUGIN_API_VERSION
    }

    fn extend(&self, ctx: &PluginContext<'_>) -> Vec<PluginConstraint>;
}

/// Read-only draft handed to the hybrid enricher.
#[derive(Debug, Clone)]
pub struct HybridDraft<'a> {
    pub text: &'a str,
    pub language: Language,
    pub domain: &'a str,
    pub persona: Persona,
    pub role: &'a str,
    pub intents: &'a [Intent],
    pub constraints: &'a [String],
    pub steps: &'a [Step],
}

/// Changes proposed by the hybrid enricher. Absent fields leave the draft as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HybridPatch {
    pub persona: Option<Persona>,
    pub role: Option<String>,
    /// Extra constraints, origin `hybrid`
    pub constraints: Vec<PluginConstraint>,
    /// Replacement steps
    pub steps: Option<Vec<Step>>,
}

impl HybridPatch {
    pub fn is_empty(&self) -> bool {
        self.persona.is_none()
            && self.role.is_none()
            && self.constraints.is_empty()
            && self.steps.is_none()
    }
}

/// Hybrid enrichment trait
pub trait HybridEnricher: Send + Sync {
    /// `None` leaves the draft untouched
    fn enrich(&self, draft: &HybridDraft<'_>) -> Option<HybridPatch>;
}
