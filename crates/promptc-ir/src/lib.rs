//! # promptc IR
//!
//! The versioned Intermediate Representation produced by the prompt
//! compiler. Two shapes coexist:
//!
//! - **v1** (`"version": "1.0"`): flat legacy form. Constraints and steps are
//!   plain strings; provenance lives in `metadata.constraint_origins`.
//! - **v2** (`"version": "2.0"`): typed form. Constraints carry
//!   `{id, text, origin, priority}`, steps carry `{type, text}`, and intents
//!   are a top-level list.
//!
//! ## Design Goals
//!
//! - **Deterministic**: same content always hashes to the same signature
//! - **Immutable**: an assembled IR is sealed in [`Signed`]; edits re-hash
//! - **Serializable**: JSON for transmission, caching and diffing
//!
//! ## Example
//!
//! ```json
//! {
//!   "version": "2.0",
//!   "language": "en",
//!   "persona": "developer",
//!   "domain": "software",
//!   "intents": ["comparison"],
//!   "constraints": [
//!     {"id": "c1", "text": "Present a structured comparison ...", "origin": "comparison", "priority": 55}
//!   ],
//!   "output_format": "table",
//!   "signature": "3f1c0a9e5b7d2c44"
//! }
//! ```

pub mod diff;
mod ir;
pub mod signature;
mod signed;
mod types;
mod validation;

pub use ir::*;
pub use signed::*;
pub use types::*;
pub use validation::*;

/// `version` of v1 IR documents.
pub const IR_VERSION_V1: &str = "1.0";

/// `version` of v2 IR documents.
pub const IR_VERSION_V2: &str = "2.0";

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn metadata() -> Metadata {
        Metadata {
            ir_version: IR_VERSION_V2.into(),
            heuristic_version: "test".into(),
            domain_confidence: Some(0.75),
            domain_scores: BTreeMap::from([("software".into(), 3), ("cloud".into(), 1)]),
            domain_candidates: vec!["cloud".into()],
            complexity: Complexity::Medium,
            ..Metadata::default()
        }
    }

    pub(crate) fn sample_v2() -> IrV2 {
        IrV2 {
            version: IR_VERSION_V2.into(),
            language: Language::En,
            persona: Persona::Developer,
            role: "Senior software engineer".into(),
            domain: "software".into(),
            intents: vec![Intent::Comparison],
            goals: vec!["python vs go performance comparison".into()],
            tasks: vec!["python vs go performance comparison".into()],
            inputs: Inputs::default(),
            constraints: vec![
                Constraint {
                    id: "c1".into(),
                    text: "Present a structured comparison".into(),
                    origin: "comparison".into(),
                    priority: 55,
                },
                Constraint {
                    id: "c2".into(),
                    text: "Use accurate software terminology".into(),
                    origin: "domain".into(),
                    priority: 25,
                },
            ],
            style: BTreeSet::new(),
            tone: BTreeSet::new(),
            output_format: OutputFormat::Table,
            length_hint: LengthHint::Medium,
            steps: vec![],
            examples: vec![],
            banned: vec![],
            tools: vec![],
            metadata: metadata(),
        }
    }

    pub(crate) fn sample_v1() -> IrV1 {
        let v2 = sample_v2();
        let mut meta = v2.metadata.clone();
        meta.ir_version = IR_VERSION_V1.into();
        meta.intents = Some(v2.intents.clone());
        meta.constraint_origins = Some(
            v2.constraints
                .iter()
                .map(|c| (c.text.clone(), c.origin.clone()))
                .collect(),
        );
        IrV1 {
            version: IR_VERSION_V1.into(),
            language: v2.language,
            persona: v2.persona,
            role: v2.role.clone(),
            domain: v2.domain.clone(),
            goals: v2.goals.clone(),
            tasks: v2.tasks.clone(),
            inputs: v2.inputs.clone(),
            constraints: v2.constraints.iter().map(|c| c.text.clone()).collect(),
            style: v2.style.clone(),
            tone: v2.tone.clone(),
            output_format: v2.output_format,
            length_hint: v2.length_hint,
            steps: vec![],
            examples: vec![],
            banned: vec![],
            tools: vec![],
            metadata: meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{sample_v1, sample_v2};
    use super::*;

    #[test]
    fn test_seal_is_deterministic() {
        let a = Signed::seal(sample_v2()).unwrap();
        let b = Signed::seal(sample_v2()).unwrap();
        assert_eq!(a.signature(), b.signature());
        assert_eq!(a.signature().len(), signature::SIGNATURE_LEN);
    }

    #[test]
    fn test_rebuild_rehashes() {
        let sealed = Signed::seal(sample_v2()).unwrap();
        let before = sealed.signature().to_string();
        let rebuilt = sealed.rebuild(|ir| ir.domain = "cloud".into()).unwrap();
        assert_eq!(rebuilt.domain, "cloud");
        assert_ne!(rebuilt.signature(), before);
    }

    #[test]
    fn test_serialized_document_carries_signature() {
        let sealed = Signed::seal(sample_v1()).unwrap();
        let value = serde_json::to_value(&sealed).unwrap();
        assert_eq!(value["signature"], sealed.signature());
        assert_eq!(value["version"], IR_VERSION_V1);
        assert_eq!(signature::verify_value(&value).unwrap(), Some(true));
    }

    #[test]
    fn test_parse_document_roundtrip() {
        let sealed = Ir::V2(Signed::seal(sample_v2()).unwrap());
        let json = serde_json::to_string(&sealed).unwrap();
        let parsed = parse_document(&json).unwrap();
        assert_eq!(parsed.schema_version(), SchemaVersion::V2);
        assert_eq!(parsed.signature(), sealed.signature());
        assert_eq!(parsed.view().domain(), "software");
    }

    #[test]
    fn test_parse_document_rejects_tampering() {
        let sealed = Signed::seal(sample_v1()).unwrap();
        let mut value = sealed.to_value().unwrap();
        value["domain"] = "finance".into();
        let err = parse_document(&value.to_string()).unwrap_err();
        assert!(matches!(err, DocumentError::SignatureMismatch { .. }));
    }

    #[test]
    fn test_parse_document_unknown_version() {
        let err = parse_document(r#"{"version": "9.9"}"#).unwrap_err();
        assert!(matches!(err, DocumentError::UnknownVersion(v) if v == "9.9"));
    }
}
