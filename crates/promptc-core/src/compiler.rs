//! The compile pipeline.
//!
//! ```text
//! text -> language -> domain -> signals -> intents -> persona -> hints
//!      -> synthesis -> plugins -> hybrid -> synthesis -> assembly -> seal
//! ```
//!
//! Every stage reads the pre-tokenized [`Text`] and the outputs of the stages
//! before it. Nothing is shared between calls except the immutable lookup
//! tables, so one [`Compiler`] can serve any number of threads.

use std::fmt;
use std::sync::Arc;

use promptc_ir::{Intent, Ir, IrV1, IrV2, Language, Metadata, Persona, SchemaVersion, Signed};
use smol_str::SmolStr;
use tracing::{info, warn};

use crate::assemble::{assemble, IrDraft};
use crate::config::{CompileOptions, PatternConfig};
use crate::constraints::{synthesize, Emission, Emitter, Origin, Synthesized};
use crate::error::CompileError;
use crate::intents::{self, IntentContext};
use crate::phrases::phrases;
use crate::plugin::{
    ConstraintPlugin, HybridDraft, HybridEnricher, PluginConstraint, PluginContext,
    PLUGIN_API_VERSION,
};
use crate::tables::Tables;
use crate::text::Text;
use crate::{domain, hints, language, persona, signals, HEURISTIC_VERSION};

/// One compile result in the requested schema.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub ir: Ir,
    /// Heuristic trace, when requested.
    pub trace: Option<Vec<String>>,
}

/// Both schema shapes from a single compile.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub v1: Signed<IrV1>,
    pub v2: Signed<IrV2>,
    pub trace: Option<Vec<String>>,
}

impl Compilation {
    /// The shape selected by `version`.
    pub fn select(self, version: SchemaVersion) -> CompileOutput {
        let ir = match version {
            SchemaVersion::V1 => Ir::V1(self.v1),
            SchemaVersion::V2 => Ir::V2(self.v2),
        };
        CompileOutput {
            ir,
            trace: self.trace,
        }
    }
}

/// Prompt compiler.
///
/// Holds the lookup tables and the registered extension hooks. Compiling is
/// a pure function of the text, the options and this state.
#[derive(Clone)]
pub struct Compiler {
    tables: Arc<Tables>,
    plugins: Vec<Arc<dyn ConstraintPlugin>>,
    hybrid: Option<Arc<dyn HybridEnricher>>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("domains", &self.tables.domains.len())
            .field("plugins", &self.plugin_names())
            .field("hybrid", &self.hybrid.is_some())
            .finish()
    }
}

impl Compiler {
    /// Compiler with the built-in tables.
    pub fn new() -> Self {
        Self {
            tables: Tables::builtin(),
            plugins: Vec::new(),
            hybrid: None,
        }
    }

    /// Compiler with built-in tables extended by `config`.
    pub fn with_patterns(config: &PatternConfig) -> Result<Self, CompileError> {
        config.validate()?;
        Ok(Self {
            tables: Arc::new(Tables::from_config(config)),
            ..Self::new()
        })
    }

    /// Register a constraint plugin. Plugins run in registration order.
    pub fn register_plugin(&mut self, plugin: Arc<dyn ConstraintPlugin>) -> Result<(), CompileError> {
        let found = plugin.api_version();
        if found != PLUGIN_API_VERSION {
            return Err(CompileError::IncompatiblePlugin {
                name: plugin.name().to_string(),
                found,
                expected: PLUGIN_API_VERSION,
            });
        }
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn with_hybrid(mut self, hybrid: Arc<dyn HybridEnricher>) -> Self {
        self.hybrid = Some(hybrid);
        self
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Compile `text` into the schema selected by `options`.
    pub fn compile(&self, text: &str, options: &CompileOptions) -> Result<CompileOutput, CompileError> {
        Ok(self.compile_both(text, options)?.select(options.schema_version))
    }

    /// Compile `text` into both schema shapes.
    ///
    /// The trace's signature line refers to the shape selected by `options`.
    pub fn compile_both(&self, text: &str, options: &CompileOptions) -> Result<Compilation, CompileError> {
        let (v1, v2, mut trace) = self.run(text, options)?;
        let v1 = Signed::seal(v1)?;
        let v2 = Signed::seal(v2)?;

        let signature = match options.schema_version {
            SchemaVersion::V1 => v1.signature(),
            SchemaVersion::V2 => v2.signature(),
        };
        trace.push(|| format!("ir_signature={signature}"));
        info!(
            signature,
            schema = %options.schema_version,
            language = %v2.language,
            domain = %v2.domain,
            persona = %v2.persona,
            constraints = v2.constraints.len(),
            "compiled"
        );

        Ok(Compilation {
            v1,
            v2,
            trace: trace.finish(),
        })
    }

    fn run(&self, text: &str, options: &CompileOptions) -> Result<(IrV1, IrV2, Trace), CompileError> {
        let source = Text::new(text);
        if source.is_blank() {
            return Err(CompileError::EmptyInput);
        }
        let persona_override = options.persona()?;
        let language_override = options.language()?;
        let tables = match &options.patterns {
            Some(config) => {
                config.validate()?;
                Arc::new(Tables::from_config(config))
            }
            None => Arc::clone(&self.tables),
        };
        let mut trace = Trace::new(options.trace);

        // Language
        let detection = language::detect(&source);
        let language = language_override.unwrap_or(detection.language);
        trace.push(|| match language_override {
            Some(lang) => format!("language={lang} (override)"),
            None => format!("language={language} (scores {})", detection.describe_scores()),
        });

        // Domain
        let classification = domain::classify(&source, language, &tables);
        trace.push(|| {
            format!(
                "domain={} ({} evid)",
                classification.domain,
                classification.evidence_count()
            )
        });

        // Signals
        let signals = signals::extract(&source, language, &tables);
        trace.push(|| format!("pii_flags={}", join_labels(&signals.pii)));
        trace.push(|| format!("temporal_flags={}", signals.temporal.flags.join(",")));
        trace.push(|| format!("ambiguous_terms={}", signals.ambiguity.terms.join(",")));
        trace.push(|| format!("risk_flags={}", signals.risk.join(",")));
        trace.push(|| format!("complexity={} ({} pts)", signals.complexity, signals.complexity_points));

        // Intents
        let outcome = intents::route(&IntentContext {
            text: &source,
            language,
            signals: &signals,
        });
        trace.push(|| format!("intents={}", join_labels(&outcome.intents)));

        // Persona
        let selection = persona::select(&persona::PersonaInput {
            text: &source,
            language,
            domain: &classification.domain,
            intents: &outcome.intents,
            code_request: signals.code_request,
            override_persona: persona_override,
        });
        trace.push(|| format!("persona={} ({})", selection.persona, selection.rule));

        let hints = hints::derive(&source, &signals, &outcome);

        // Core synthesis
        let mut emissions = signals.emissions(language);
        emissions.extend(outcome.constraints.iter().cloned());
        emissions.extend(hints.emissions(language, &classification.domain));
        let plugin_order: Vec<SmolStr> = self.plugins.iter().map(|p| SmolStr::new(p.name())).collect();
        let core = synthesize(&emissions, &plugin_order);

        // Plugins
        let mut contributors = Vec::new();
        if !self.plugins.is_empty() {
            let texts = constraint_texts(&core);
            let ctx = PluginContext {
                text,
                language,
                domain: &classification.domain,
                persona: selection.persona,
                intents: &outcome.intents,
                constraints: &texts,
            };
            for plugin in &self.plugins {
                let added = plugin_emissions(
                    Origin::Plugin(SmolStr::new(plugin.name())),
                    plugin.extend(&ctx),
                );
                if !added.is_empty() && !contributors.iter().any(|c| c == plugin.name()) {
                    contributors.push(plugin.name().to_string());
                }
                emissions.extend(added);
            }
        }

        // Hybrid
        let teaching = outcome.has(Intent::Teaching);
        let mut persona = selection.persona;
        let mut role = role_line(language, persona, teaching);
        let mut steps = outcome.steps.clone().unwrap_or_else(|| hints.default_steps());
        let mut hybrid_applied = false;
        if let Some(hybrid) = &self.hybrid {
            let texts = constraint_texts(&synthesize(&emissions, &plugin_order));
            let draft = HybridDraft {
                text,
                language,
                domain: &classification.domain,
                persona,
                role: &role,
                intents: &outcome.intents,
                constraints: &texts,
                steps: &steps,
            };
            if let Some(patch) = hybrid.enrich(&draft).filter(|p| !p.is_empty()) {
                hybrid_applied = true;
                // An explicit persona override outranks the hook
                if persona_override.is_none() {
                    if let Some(patched) = patch.persona {
                        persona = patched;
                        role = role_line(language, persona, teaching);
                    }
                    if let Some(patched) = patch.role.filter(|r| !r.trim().is_empty()) {
                        role = patched;
                    }
                }
                if let Some(patched) = patch.steps {
                    steps = patched;
                }
                emissions.extend(plugin_emissions(Origin::Hybrid, patch.constraints));
            }
        }

        let constraints = synthesize(&emissions, &plugin_order);
        trace.push(|| format!("constraints={}", constraints.len()));

        let mut inputs = outcome.inputs.clone();
        if inputs.budget.is_none() {
            inputs.budget = hints.budget.clone();
        }
        if inputs.format.is_none() {
            inputs.format = hints.explicit_format.map(|f| f.label().to_string());
        }

        let metadata = Metadata {
            ir_version: String::new(),
            heuristic_version: HEURISTIC_VERSION.to_string(),
            language_scores: detection.scores,
            domain_candidates: classification.candidates,
            domain_confidence: classification.confidence,
            domain_scores: classification.scores,
            domain_evidence: classification.evidence,
            persona_evidence: selection.evidence,
            pii_flags: signals.pii,
            temporal_flags: signals.temporal.flags,
            quantities: signals.quantities,
            ambiguous_terms: signals.ambiguity.terms,
            clarify_questions_struct: signals.ambiguity.questions,
            risk_flags: signals.risk,
            entities: signals.entities,
            complexity: signals.complexity,
            code_request: signals.code_request,
            teaching_mode: teaching,
            comparison_items: outcome.comparison_items.clone(),
            summary: outcome.has(Intent::Summary),
            summary_limit: outcome.summary_limit,
            variant_count: outcome.variant_count,
            debug: outcome.has(Intent::Debug),
            intents: None,
            constraint_origins: None,
            plugins: contributors,
            hybrid: hybrid_applied,
        };

        let draft = IrDraft {
            language,
            persona,
            role,
            domain: classification.domain,
            intents: outcome.intents.clone(),
            goals: hints.goals,
            tasks: hints.tasks,
            inputs,
            constraints,
            style: hints.style,
            tone: hints.tone,
            output_format: hints.output_format,
            length_hint: hints.length_hint,
            steps,
            examples: outcome.examples,
            banned: hints.banned,
            tools: hints.tools,
            metadata,
        };
        let (v1, v2) = assemble(draft)?;
        Ok((v1, v2, trace))
    }
}

/// Role line for a persona; teaching mode adds the instructor note.
pub fn role_line(language: Language, persona: Persona, teaching: bool) -> String {
    let p = phrases(language);
    if teaching {
        format!("{} {}", p.role(persona), p.instructor_note)
    } else {
        p.role(persona).to_string()
    }
}

fn plugin_emissions(origin: Origin, constraints: Vec<PluginConstraint>) -> Vec<Emission> {
    let mut e = Emitter::new(origin.clone());
    for constraint in constraints {
        if constraint.text.trim().is_empty() {
            warn!(%origin, "dropping blank extension constraint");
            continue;
        }
        e.emit(constraint.priority, constraint.text);
    }
    e.finish()
}

fn constraint_texts(constraints: &[Synthesized]) -> Vec<String> {
    constraints.iter().map(|c| c.text.clone()).collect()
}

fn join_labels<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Heuristic trace collector; a no-op unless enabled.
struct Trace(Option<Vec<String>>);

impl Trace {
    fn new(enabled: bool) -> Self {
        Self(enabled.then(Vec::new))
    }

    fn push(&mut self, line: impl FnOnce() -> String) {
        if let Some(lines) = &mut self.0 {
            lines.push(line());
        }
    }

    fn finish(self) -> Option<Vec<String>> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OverrideKind;
    use crate::plugin::HybridPatch;
    use promptc_ir::{IrView, OutputFormat, PiiKind, StepKind};
    use std::collections::BTreeSet;
    use std::io::Write;

    fn compile(text: &str) -> Signed<IrV2> {
        match Compiler::new().compile(text, &CompileOptions::default()).unwrap().ir {
            Ir::V2(ir) => ir,
            Ir::V1(_) => panic!("expected v2"),
        }
    }

    fn texts(ir: &IrV2) -> Vec<&str> {
        ir.constraints.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_scenario_teaching() {
        let ir = compile("teach me binary search in 10 minutes beginner level");
        assert_eq!(ir.persona, Persona::Developer);
        assert!(ir.role.ends_with("Act as an instructor for this request."));
        assert!(ir.metadata.teaching_mode);
        assert_eq!(ir.inputs.level.as_deref(), Some("beginner"));
        assert_eq!(ir.inputs.duration.as_deref(), Some("10m"));
        let texts = texts(&ir);
        assert!(texts.iter().any(|t| t.contains("pedagogical flow")));
        assert!(texts.contains(&"Keep the lesson within 10 minutes."));
        let kinds: Vec<_> = ir.steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Introduce,
                StepKind::Demonstrate,
                StepKind::Exercise,
                StepKind::Summarize
            ]
        );
    }

    #[test]
    fn test_scenario_comparison() {
        let ir = compile("python vs go performance comparison");
        assert_eq!(ir.output_format, OutputFormat::Table);
        assert_eq!(ir.metadata.comparison_items, vec!["python", "go"]);
        assert!(texts(&ir)
            .iter()
            .any(|t| t.starts_with("Present a structured comparison")));
        assert_eq!(ir.intents, vec![Intent::Comparison]);
    }

    #[test]
    fn test_scenario_summary() {
        let ir = compile("summarize the text in 5 bullet points");
        assert!(ir.metadata.summary);
        assert_eq!(ir.metadata.summary_limit, Some(5));
        assert!(texts(&ir).contains(&"Maximum 5 bullet points."));
    }

    #[test]
    fn test_scenario_pii() {
        let ir = compile("my email is a@b.com");
        assert!(ir.metadata.pii_flags.contains(&PiiKind::Email));
        let privacy = ir.constraints.iter().find(|c| c.origin == "pii").unwrap();
        assert!(privacy.text.starts_with("Redact personal data"));
        assert_eq!(ir.constraints[0].id, privacy.id);
    }

    #[test]
    fn test_scenario_empty_input() {
        let compiler = Compiler::new();
        for text in ["", "   \n\t"] {
            let err = compiler.compile(text, &CompileOptions::default()).unwrap_err();
            assert!(matches!(err, CompileError::EmptyInput));
        }
    }

    #[test]
    fn test_scenario_ambiguity() {
        let ir = compile("secure resilient scalable api design");
        for term in ["secure", "resilient", "scalable"] {
            assert!(ir.metadata.ambiguous_terms.iter().any(|t| t == term), "{term}");
        }
        let questions = &ir.metadata.clarify_questions_struct;
        assert!(!questions.is_empty() && questions.len() <= 5);
        assert!(questions.iter().all(|q| !q.term.is_empty() && !q.question.is_empty()));
    }

    #[test]
    fn test_question_cap() {
        let ir = compile("make it fast, efficient, scalable, secure, robust, clean and modern");
        assert!(ir.metadata.ambiguous_terms.len() > 5);
        assert_eq!(ir.metadata.clarify_questions_struct.len(), 5);
    }

    #[test]
    fn test_deterministic() {
        let compiler = Compiler::new();
        let options = CompileOptions::default();
        for text in [
            "teach me binary search in 10 minutes beginner level",
            "deploy a python api on aws lambda, should I invest in bitcoin?",
            "Bana ikili aramayı 10 dakikada öğret",
        ] {
            let a = compiler.compile(text, &options).unwrap();
            let b = compiler.compile(text, &options).unwrap();
            assert_eq!(a.ir.signature(), b.ir.signature());
            assert_eq!(
                serde_json::to_string(&a.ir).unwrap(),
                serde_json::to_string(&b.ir).unwrap()
            );
        }
    }

    #[test]
    fn test_confidence_bounds() {
        for text in ["deploy to aws lambda with terraform", "write a haiku about rain"] {
            let ir = compile(text);
            match ir.metadata.domain_confidence {
                Some(c) => {
                    assert!((0.0..=1.0).contains(&c));
                    assert!(!ir.metadata.domain_evidence.is_empty());
                }
                None => assert_eq!(ir.domain, "general"),
            }
        }
    }

    #[test]
    fn test_schema_equivalence() {
        let compiler = Compiler::new();
        for text in [
            "teach me python vs go in 30 minutes",
            "summarize the latest news on the stock market in 3 bullet points",
            "my login handler is not working, help me fix it",
        ] {
            let both = compiler.compile_both(text, &CompileOptions::default()).unwrap();
            let t1: BTreeSet<&str> = both.v1.constraint_texts().into_iter().collect();
            let t2: BTreeSet<&str> = both.v2.constraint_texts().into_iter().collect();
            assert_eq!(t1, t2);
            assert_eq!(both.v1.step_texts(), both.v2.step_texts());
        }
    }

    #[test]
    fn test_v1_shape() {
        let options = CompileOptions::builder().schema(SchemaVersion::V1).build();
        let out = Compiler::new()
            .compile("summarize the text in 5 bullet points", &options)
            .unwrap();
        let Ir::V1(ir) = &out.ir else {
            panic!("expected v1")
        };
        assert_eq!(ir.version, "1.0");
        let origins = ir.metadata.constraint_origins.as_ref().unwrap();
        assert_eq!(origins["Maximum 5 bullet points."], "summary");
        assert_eq!(ir.metadata.intents, Some(vec![Intent::Summary]));
    }

    #[test]
    fn test_variant_clamp() {
        assert_eq!(compile("write 15 alternatives for the slogan").metadata.variant_count, Some(10));
        assert_eq!(compile("suggest alternatives for the slogan").metadata.variant_count, Some(3));
        let disabled = compile("write 1 alternative for the slogan");
        assert_eq!(disabled.metadata.variant_count, None);
        assert!(!disabled.intents.contains(&Intent::Variants));
    }

    #[test]
    fn test_invalid_overrides() {
        let compiler = Compiler::new();
        let options = CompileOptions::builder().persona("wizard").build();
        let err = compiler.compile("hello there", &options).unwrap_err();
        assert!(matches!(
            err,
            CompileError::InvalidOverride { kind: OverrideKind::Persona, ref value, .. } if value == "wizard"
        ));

        let options = CompileOptions::builder().language("fr").build();
        let err = compiler.compile("hello there", &options).unwrap_err();
        assert!(matches!(
            err,
            CompileError::InvalidOverride { kind: OverrideKind::Language, .. }
        ));
    }

    #[test]
    fn test_overrides_applied() {
        let options = CompileOptions::builder().persona("coach").language("tr").build();
        let out = Compiler::new()
            .compile("summarize the text in 5 bullet points", &options)
            .unwrap();
        let view = out.ir.view();
        assert_eq!(view.persona(), Persona::Coach);
        assert_eq!(view.language(), Language::Tr);
        assert!(view.constraint_texts().contains(&"En fazla 5 madde kullan."));
    }

    #[test]
    fn test_trace() {
        let options = CompileOptions::builder().trace(true).build();
        let out = Compiler::new()
            .compile("teach me binary search in 10 minutes beginner level", &options)
            .unwrap();
        let trace = out.trace.unwrap();
        assert!(trace[0].starts_with("language=en (scores "));
        assert!(trace.contains(&"intents=teaching".to_string()));
        assert!(trace.iter().any(|l| l.starts_with("persona=developer")));
        assert_eq!(
            trace.last().unwrap(),
            &format!("ir_signature={}", out.ir.signature())
        );

        let quiet = Compiler::new()
            .compile("hello there", &CompileOptions::default())
            .unwrap();
        assert!(quiet.trace.is_none());
    }

    #[test]
    fn test_external_patterns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"domains": {{"gardening": ["compost", "mulch"]}}}}"#).unwrap();
        let config = PatternConfig::from_path(file.path()).unwrap();

        let compiler = Compiler::with_patterns(&config).unwrap();
        let out = compiler
            .compile("how much mulch and compost per bed", &CompileOptions::default())
            .unwrap();
        assert_eq!(out.ir.view().domain(), "gardening");

        // per-call snapshot, default compiler
        let options = CompileOptions::builder().patterns(Arc::new(config)).build();
        let out = Compiler::new()
            .compile("how much mulch and compost per bed", &options)
            .unwrap();
        assert_eq!(out.ir.view().domain(), "gardening");
        assert!(out
            .ir
            .view()
            .constraint_texts()
            .contains(&"Use accurate gardening terminology."));
    }

    struct HouseStyle;

    impl ConstraintPlugin for HouseStyle {
        fn name(&self) -> &str {
            "house-style"
        }

        fn extend(&self, ctx: &PluginContext<'_>) -> Vec<PluginConstraint> {
            let mut out = vec![PluginConstraint::new("Use British spelling.", 30)];
            // duplicate of a core constraint, differently cased
            if let Some(first) = ctx.constraints.first() {
                out.push(PluginConstraint::new(first.to_uppercase(), 99));
            }
            out.push(PluginConstraint::new("   ", 10));
            out
        }
    }

    struct Future;

    impl ConstraintPlugin for Future {
        fn name(&self) -> &str {
            "future"
        }

        fn api_version(&self) -> u32 {
            PLUGIN_API_VERSION + 1
        }

        fn extend(&self, _ctx: &PluginContext<'_>) -> Vec<PluginConstraint> {
            Vec::new()
        }
    }

    #[test]
    fn test_plugins() {
        let mut compiler = Compiler::new();
        compiler.register_plugin(Arc::new(HouseStyle)).unwrap();
        let err = compiler.register_plugin(Arc::new(Future)).unwrap_err();
        assert!(matches!(err, CompileError::IncompatiblePlugin { found: 2, expected: 1, .. }));
        assert_eq!(compiler.plugin_names(), vec!["house-style"]);

        let out = compiler
            .compile("summarize the text in 5 bullet points", &CompileOptions::default())
            .unwrap();
        let Ir::V2(ir) = &out.ir else {
            panic!("expected v2")
        };
        let british = ir
            .constraints
            .iter()
            .find(|c| c.text == "Use British spelling.")
            .unwrap();
        assert_eq!(british.origin, "plugin:house-style");
        assert_eq!(ir.metadata.plugins, vec!["house-style"]);

        // the duplicate collapsed into the core entry, keeping its origin and the max priority
        let bullets: Vec<_> = ir
            .constraints
            .iter()
            .filter(|c| c.text.eq_ignore_ascii_case("Maximum 5 bullet points."))
            .collect();
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].origin, "summary");
        assert_eq!(bullets[0].priority, 99);
        assert_eq!(ir.constraints[0].id, bullets[0].id);
    }

    struct Poet;

    impl HybridEnricher for Poet {
        fn enrich(&self, _draft: &HybridDraft<'_>) -> Option<HybridPatch> {
            Some(HybridPatch {
                persona: Some(Persona::Mentor),
                role: None,
                constraints: vec![PluginConstraint::new("Keep a warm voice.", 33)],
                steps: None,
            })
        }
    }

    #[test]
    fn test_hybrid_patch() {
        let compiler = Compiler::new().with_hybrid(Arc::new(Poet));
        let out = compiler
            .compile("write a haiku about rain", &CompileOptions::default())
            .unwrap();
        let view = out.ir.view();
        assert_eq!(view.persona(), Persona::Mentor);
        assert_eq!(view.role(), "You are an experienced mentor.");
        assert!(view.metadata().hybrid);
        let Ir::V2(ir) = &out.ir else {
            panic!("expected v2")
        };
        let warm = ir.constraints.iter().find(|c| c.text == "Keep a warm voice.").unwrap();
        assert_eq!(warm.origin, "hybrid");

        // persona override outranks the hook
        let options = CompileOptions::builder().persona("teacher").build();
        let out = compiler.compile("write a haiku about rain", &options).unwrap();
        assert_eq!(out.ir.view().persona(), Persona::Teacher);
    }

    #[test]
    fn test_without_hooks_is_unchanged() {
        let plain = compile("write a haiku about rain");
        assert!(!plain.metadata.hybrid);
        assert!(plain.metadata.plugins.is_empty());
        assert_eq!(plain.persona, Persona::Assistant);
    }

    #[test]
    fn test_parallel_use() {
        let compiler = Arc::new(Compiler::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let compiler = Arc::clone(&compiler);
                std::thread::spawn(move || {
                    compiler
                        .compile("python vs go performance comparison", &CompileOptions::default())
                        .unwrap()
                        .ir
                        .signature()
                        .to_string()
                })
            })
            .collect();
        let signatures: BTreeSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(signatures.len(), 1);
    }

    #[test]
    fn test_mixed_script_digits_compile() {
        let inputs = [
            "send to GB१२WEST12345698765432 please",
            "kart ٤١١١ ١١١١ ١١١١ ١١١١ ile öde",
            "explícame ५ minutos de ٣ variantes ۱۲۳",
            "call +٩٧١ ५५५ 1234 about q४ 20२4",
        ];
        for text in inputs {
            let ir = compile(text);
            assert!(ir.metadata.pii_flags.is_empty(), "{text}");
        }
    }

    #[test]
    fn test_grouped_budget() {
        let ir = compile("plan a trip with a $1,500,000 budget");
        assert_eq!(ir.inputs.budget.as_deref(), Some("$1,500,000"));
        assert_eq!(ir.metadata.quantities[0].value, 1_500_000.0);
    }

    #[test]
    fn test_spelled_variant_count() {
        let ir = compile("give me five alternatives for this slogan");
        assert_eq!(ir.metadata.variant_count, Some(5));
        assert!(texts(&ir).contains(&"Generate 5 distinct variants."));
    }
}
