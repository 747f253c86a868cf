//! IR assembly: one draft, two schema shapes, both validated.

use std::collections::BTreeSet;

use promptc_ir::{
    check_equivalence, validate_v1, validate_v2, Constraint, Inputs, Intent, IrV1, IrV2, Language,
    LengthHint, Metadata, OutputFormat, Persona, Step, ValidationError, IR_VERSION_V1,
    IR_VERSION_V2,
};

use crate::constraints::{origin_map, Synthesized};
use crate::error::CompileError;

/// Everything the pipeline decided, independent of schema shape.
#[derive(Debug, Clone)]
pub struct IrDraft {
    pub language: Language,
    pub persona: Persona,
    pub role: String,
    pub domain: String,
    pub intents: Vec<Intent>,
    pub goals: Vec<String>,
    pub tasks: Vec<String>,
    pub inputs: Inputs,
    pub constraints: Vec<Synthesized>,
    pub style: BTreeSet<String>,
    pub tone: BTreeSet<String>,
    pub output_format: OutputFormat,
    pub length_hint: LengthHint,
    pub steps: Vec<Step>,
    pub examples: Vec<String>,
    pub banned: Vec<String>,
    pub tools: Vec<String>,
    /// Shape-independent metadata; version and v1-only fields are filled here.
    pub metadata: Metadata,
}

/// Build both shapes from one draft and check them.
pub fn assemble(draft: IrDraft) -> Result<(IrV1, IrV2), CompileError> {
    let v2 = IrV2 {
        version: IR_VERSION_V2.to_string(),
        language: draft.language,
        persona: draft.persona,
        role: draft.role.clone(),
        domain: draft.domain.clone(),
        intents: draft.intents.clone(),
        goals: draft.goals.clone(),
        tasks: draft.tasks.clone(),
        inputs: draft.inputs.clone(),
        constraints: draft
            .constraints
            .iter()
            .enumerate()
            .map(|(i, c)| Constraint {
                id: format!("c{}", i + 1),
                text: c.text.clone(),
                origin: c.origin.label(),
                priority: c.priority,
            })
            .collect(),
        style: draft.style.clone(),
        tone: draft.tone.clone(),
        output_format: draft.output_format,
        length_hint: draft.length_hint,
        steps: draft.steps.clone(),
        examples: draft.examples.clone(),
        banned: draft.banned.clone(),
        tools: draft.tools.clone(),
        metadata: Metadata {
            ir_version: IR_VERSION_V2.to_string(),
            intents: None,
            constraint_origins: None,
            ..draft.metadata.clone()
        },
    };

    let v1 = IrV1 {
        version: IR_VERSION_V1.to_string(),
        language: draft.language,
        persona: draft.persona,
        role: draft.role,
        domain: draft.domain,
        goals: draft.goals,
        tasks: draft.tasks,
        inputs: draft.inputs,
        constraints: draft.constraints.iter().map(|c| c.text.clone()).collect(),
        style: draft.style,
        tone: draft.tone,
        output_format: draft.output_format,
        length_hint: draft.length_hint,
        steps: draft.steps.into_iter().map(|s| s.text).collect(),
        examples: draft.examples,
        banned: draft.banned,
        tools: draft.tools,
        metadata: Metadata {
            ir_version: IR_VERSION_V1.to_string(),
            intents: Some(draft.intents),
            constraint_origins: Some(origin_map(&draft.constraints)),
            ..draft.metadata
        },
    };

    let mut errors = Vec::new();
    errors.extend(validate_v1(&v1).err().unwrap_or_default());
    errors.extend(validate_v2(&v2).err().unwrap_or_default());
    errors.extend(check_equivalence(&v1, &v2).err().unwrap_or_default());
    if !errors.is_empty() {
        return Err(invariant(&errors));
    }
    Ok((v1, v2))
}

fn invariant(errors: &[ValidationError]) -> CompileError {
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    CompileError::SchemaInvariant(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::Origin;
    use promptc_ir::{IrView, StepKind, GENERAL_DOMAIN};

    fn draft() -> IrDraft {
        IrDraft {
            language: Language::En,
            persona: Persona::Researcher,
            role: "You are a meticulous researcher.".into(),
            domain: GENERAL_DOMAIN.into(),
            intents: vec![Intent::Summary],
            goals: vec!["summarize the text".into()],
            tasks: vec!["summarize the text".into()],
            inputs: Inputs::default(),
            constraints: vec![
                Synthesized {
                    text: "Maximum 5 bullet points.".into(),
                    origin: Origin::Summary,
                    priority: 52,
                },
                Synthesized {
                    text: "Provide a concise summary.".into(),
                    origin: Origin::Summary,
                    priority: 50,
                },
            ],
            style: BTreeSet::new(),
            tone: BTreeSet::new(),
            output_format: OutputFormat::Markdown,
            length_hint: LengthHint::Short,
            steps: vec![Step::new(StepKind::Task, "summarize the text")],
            examples: vec![],
            banned: vec![],
            tools: vec![],
            metadata: Metadata {
                summary: true,
                summary_limit: Some(5),
                ..Metadata::default()
            },
        }
    }

    #[test]
    fn test_shapes() {
        let (v1, v2) = assemble(draft()).unwrap();
        assert_eq!(v1.version, IR_VERSION_V1);
        assert_eq!(v2.version, IR_VERSION_V2);
        assert_eq!(v2.constraints[0].id, "c1");
        assert_eq!(v2.constraints[1].origin, "summary");
        assert_eq!(v1.metadata.intents, Some(vec![Intent::Summary]));
        assert_eq!(v2.metadata.intents, None);
        assert_eq!(
            v1.metadata.constraint_origins.as_ref().unwrap()["Provide a concise summary."],
            "summary"
        );
        assert_eq!(v1.step_texts(), v2.step_texts());
    }

    #[test]
    fn test_invariant_violation() {
        let mut bad = draft();
        bad.constraints.reverse();
        let err = assemble(bad).unwrap_err();
        assert!(matches!(err, CompileError::SchemaInvariant(msg) if msg.contains("priority order")));
    }
}
