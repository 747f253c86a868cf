//! IR validation - check the invariants every assembled IR must hold.

use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

use crate::{IrV1, IrV2, IrView, Metadata, IR_VERSION_V1, IR_VERSION_V2};

/// Domain name used when no domain evidence was found.
pub const GENERAL_DOMAIN: &str = "general";

/// Validation errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("version mismatch: expected {expected}, found {found}")]
    Version { expected: &'static str, found: String },

    #[error("empty constraint text")]
    EmptyConstraint,

    #[error("duplicate constraint: {0}")]
    DuplicateConstraint(String),

    #[error("duplicate constraint id: {0}")]
    DuplicateConstraintId(String),

    #[error("constraint '{0}' breaks priority order")]
    PriorityOrder(String),

    #[error("constraint has no recorded origin: {0}")]
    MissingOrigin(String),

    #[error("domain_confidence {0} outside [0, 1]")]
    ConfidenceOutOfRange(f64),

    #[error("domain_confidence present without domain evidence")]
    ConfidenceWithoutEvidence,

    #[error("domain_confidence missing for domain '{0}'")]
    MissingConfidence(String),

    #[error("variant_count {0} outside [2, 10]")]
    VariantCount(u32),

    #[error("summary_limit set without summary")]
    OrphanSummaryLimit,

    #[error("{0} differs between v1 and v2")]
    ShapeMismatch(&'static str),
}

/// Normalized form of a constraint text: trimmed, case-folded, inner whitespace collapsed.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Validate a v1 IR.
pub fn validate_v1(ir: &IrV1) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if ir.version != IR_VERSION_V1 {
        errors.push(ValidationError::Version {
            expected: IR_VERSION_V1,
            found: ir.version.clone(),
        });
    }

    check_constraint_texts(ir.constraints.iter().map(String::as_str), &mut errors);

    // Every constraint must be attributed in the legacy origin map
    if let Some(origins) = &ir.metadata.constraint_origins {
        for text in &ir.constraints {
            if !origins.contains_key(text) {
                errors.push(ValidationError::MissingOrigin(text.clone()));
            }
        }
    }

    check_metadata(&ir.domain, &ir.metadata, &mut errors);

    finish(errors)
}

/// Validate a v2 IR.
pub fn validate_v2(ir: &IrV2) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if ir.version != IR_VERSION_V2 {
        errors.push(ValidationError::Version {
            expected: IR_VERSION_V2,
            found: ir.version.clone(),
        });
    }

    check_constraint_texts(ir.constraints.iter().map(|c| c.text.as_str()), &mut errors);

    let mut ids = HashSet::new();
    for constraint in &ir.constraints {
        if !ids.insert(constraint.id.as_str()) {
            errors.push(ValidationError::DuplicateConstraintId(constraint.id.clone()));
        }
    }

    for pair in ir.constraints.windows(2) {
        if pair[1].priority > pair[0].priority {
            errors.push(ValidationError::PriorityOrder(pair[1].id.clone()));
        }
    }

    check_metadata(&ir.domain, &ir.metadata, &mut errors);

    finish(errors)
}

/// Check that the two shapes agree wherever they represent the same concept.
pub fn check_equivalence(v1: &IrV1, v2: &IrV2) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let texts1: BTreeSet<&str> = v1.constraint_texts().into_iter().collect();
    let texts2: BTreeSet<&str> = v2.constraint_texts().into_iter().collect();
    if texts1 != texts2 {
        errors.push(ValidationError::ShapeMismatch("constraints"));
    }
    if v1.step_texts() != v2.step_texts() {
        errors.push(ValidationError::ShapeMismatch("steps"));
    }
    if v1.intents() != v2.intents() {
        errors.push(ValidationError::ShapeMismatch("intents"));
    }
    if v1.language != v2.language {
        errors.push(ValidationError::ShapeMismatch("language"));
    }
    if v1.persona != v2.persona {
        errors.push(ValidationError::ShapeMismatch("persona"));
    }
    if v1.domain != v2.domain {
        errors.push(ValidationError::ShapeMismatch("domain"));
    }
    if v1.output_format != v2.output_format {
        errors.push(ValidationError::ShapeMismatch("output_format"));
    }
    if v1.inputs != v2.inputs {
        errors.push(ValidationError::ShapeMismatch("inputs"));
    }
    if let Some(origins) = &v1.metadata.constraint_origins {
        let agree = v2
            .constraints
            .iter()
            .all(|c| origins.get(&c.text) == Some(&c.origin));
        if !agree {
            errors.push(ValidationError::ShapeMismatch("constraint origins"));
        }
    }

    finish(errors)
}

fn check_constraint_texts<'a>(
    texts: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for text in texts {
        let key = normalize_text(text);
        if key.is_empty() {
            errors.push(ValidationError::EmptyConstraint);
        } else if !seen.insert(key) {
            errors.push(ValidationError::DuplicateConstraint(text.to_string()));
        }
    }
}

fn check_metadata(domain: &str, meta: &Metadata, errors: &mut Vec<ValidationError>) {
    match meta.domain_confidence {
        Some(c) if !(0.0..=1.0).contains(&c) => {
            errors.push(ValidationError::ConfidenceOutOfRange(c));
        }
        Some(_) if domain == GENERAL_DOMAIN => {
            errors.push(ValidationError::ConfidenceWithoutEvidence);
        }
        None if domain != GENERAL_DOMAIN => {
            errors.push(ValidationError::MissingConfidence(domain.to_string()));
        }
        _ => {}
    }

    if let Some(n) = meta.variant_count {
        if !(2..=10).contains(&n) {
            errors.push(ValidationError::VariantCount(n));
        }
    }

    if meta.summary_limit.is_some() && !meta.summary {
        errors.push(ValidationError::OrphanSummaryLimit);
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
