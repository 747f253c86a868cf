//! Intent routing and intent-specific enrichment.
//!
//! Each intent has a fixed handler in [`ROUTES`]. A handler looks at the
//! request and, when its intent fires, returns an [`IntentDelta`]. Deltas are
//! merged in intent precedence order (debug, teaching, comparison, summary,
//! variants): scalar fields take the first value set, lists are concatenated,
//! constraints are left for synthesis to dedup and order.

pub mod comparison;
pub mod debug;
pub mod summary;
pub mod teaching;
pub mod variants;

use promptc_ir::{Inputs, Intent, Language, LengthHint, OutputFormat, Step};

use crate::constraints::Emission;
use crate::signals::Signals;
use crate::text::Text;

/// Read-only view handed to every intent handler.
pub struct IntentContext<'a> {
    pub text: &'a Text<'a>,
    pub language: Language,
    pub signals: &'a Signals,
}

/// What one intent contributes.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentDelta {
    pub intent: Intent,
    pub constraints: Vec<Emission>,
    pub steps: Option<Vec<Step>>,
    pub examples: Vec<String>,
    pub output_format: Option<OutputFormat>,
    pub length_hint: Option<LengthHint>,
    pub inputs: Inputs,
    pub style: Vec<&'static str>,
    pub tone: Vec<&'static str>,
    pub comparison_items: Vec<String>,
    pub summary_limit: Option<u32>,
    pub variant_count: Option<u32>,
}

impl IntentDelta {
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            constraints: Vec::new(),
            steps: None,
            examples: Vec::new(),
            output_format: None,
            length_hint: None,
            inputs: Inputs::default(),
            style: Vec::new(),
            tone: Vec::new(),
            comparison_items: Vec::new(),
            summary_limit: None,
            variant_count: None,
        }
    }
}

type Handler = fn(&IntentContext<'_>) -> Option<IntentDelta>;

/// Intent handlers, in precedence order.
pub const ROUTES: &[(Intent, Handler)] = &[
    (Intent::Debug, debug::enrich),
    (Intent::Teaching, teaching::enrich),
    (Intent::Comparison, comparison::enrich),
    (Intent::Summary, summary::enrich),
    (Intent::Variants, variants::enrich),
];

/// All deltas merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntentOutcome {
    pub intents: Vec<Intent>,
    pub constraints: Vec<Emission>,
    pub steps: Option<Vec<Step>>,
    pub examples: Vec<String>,
    pub output_format: Option<OutputFormat>,
    pub length_hint: Option<LengthHint>,
    pub inputs: Inputs,
    pub style: Vec<&'static str>,
    pub tone: Vec<&'static str>,
    pub comparison_items: Vec<String>,
    pub summary_limit: Option<u32>,
    pub variant_count: Option<u32>,
}

impl IntentOutcome {
    pub fn has(&self, intent: Intent) -> bool {
        self.intents.contains(&intent)
    }
}

/// Run every handler and merge what fired.
pub fn route(ctx: &IntentContext<'_>) -> IntentOutcome {
    let deltas: Vec<IntentDelta> = ROUTES
        .iter()
        .filter_map(|(intent, handler)| {
            let delta = handler(ctx)?;
            debug_assert_eq!(delta.intent, *intent);
            Some(delta)
        })
        .collect();
    let outcome = merge(deltas);
    tracing::debug!(intents = ?outcome.intents, "intents routed");
    outcome
}

/// Merge deltas by intent precedence, whatever order they arrive in.
pub fn merge(mut deltas: Vec<IntentDelta>) -> IntentOutcome {
    deltas.sort_by_key(|d| d.intent);
    deltas.dedup_by_key(|d| d.intent);

    let mut out = IntentOutcome::default();
    for delta in deltas {
        out.intents.push(delta.intent);
        out.constraints.extend(delta.constraints);
        if out.steps.is_none() {
            out.steps = delta.steps;
        }
        for example in delta.examples {
            if !out.examples.contains(&example) {
                out.examples.push(example);
            }
        }
        out.output_format = out.output_format.or(delta.output_format);
        out.length_hint = out.length_hint.or(delta.length_hint);
        merge_inputs(&mut out.inputs, delta.inputs);
        out.style.extend(delta.style);
        out.tone.extend(delta.tone);
        if out.comparison_items.is_empty() {
            out.comparison_items = delta.comparison_items;
        }
        out.summary_limit = out.summary_limit.or(delta.summary_limit);
        out.variant_count = out.variant_count.or(delta.variant_count);
    }
    out
}

fn merge_inputs(into: &mut Inputs, from: Inputs) {
    into.interest = into.interest.take().or(from.interest);
    into.budget = into.budget.take().or(from.budget);
    into.format = into.format.take().or(from.format);
    into.level = into.level.take().or(from.level);
    into.duration = into.duration.take().or(from.duration);
}
