//! Enumerations shared by both IR shapes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string is not a member of one of the IR enums.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {kind}: '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Declares a closed, string-valued IR enum with `label`, `ALL`, `Display` and `FromStr`.
macro_rules! ir_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $label)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The serialized label.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label() == needle)
                    .ok_or_else(|| ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|v| v.label())
                            .collect::<Vec<_>>()
                            .join("|"),
                    })
            }
        }
    };
}

ir_enum! {
    /// Detected (or overridden) request language.
    Language, "language" {
        Tr => "tr",
        En => "en",
        Es => "es",
    }
}

ir_enum! {
    /// Response persona assigned to the IR.
    Persona, "persona" {
        Assistant => "assistant",
        Teacher => "teacher",
        Researcher => "researcher",
        Coach => "coach",
        Mentor => "mentor",
        Developer => "developer",
    }
}

ir_enum! {
    OutputFormat, "output format" {
        Markdown => "markdown",
        Json => "json",
        Yaml => "yaml",
        Table => "table",
        Text => "text",
    }
}

ir_enum! {
    LengthHint, "length hint" {
        Short => "short",
        Medium => "medium",
        Long => "long",
    }
}

ir_enum! {
    /// Coarse request complexity.
    Complexity, "complexity" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

ir_enum! {
    /// Task intents recognized by the intent router.
    ///
    /// Declaration order is the precedence order used when co-triggered intents
    /// disagree on a scalar field (steps, output format, length hint).
    Intent, "intent" {
        Debug => "debug",
        Teaching => "teaching",
        Comparison => "comparison",
        Summary => "summary",
        Variants => "variants",
    }
}

ir_enum! {
    /// Kind of a typed step.
    StepKind, "step kind" {
        Introduce => "introduce",
        Demonstrate => "demonstrate",
        Exercise => "exercise",
        Summarize => "summarize",
        Reproduce => "reproduce",
        Isolate => "isolate",
        Fix => "fix",
        Verify => "verify",
        Task => "task",
    }
}

ir_enum! {
    /// Personal data categories flagged by the PII detector.
    PiiKind, "pii kind" {
        Email => "email",
        Phone => "phone",
        CreditCard => "credit_card",
        Iban => "iban",
    }
}

ir_enum! {
    /// IR schema generation.
    SchemaVersion, "schema version" {
        V1 => "v1",
        V2 => "v2",
    }
}

ir_enum! {
    /// Category of an ambiguous term; selects the clarification template.
    AmbiguityCategory, "ambiguity category" {
        Performance => "performance",
        Scale => "scale",
        Security => "security",
        Reliability => "reliability",
        Quality => "quality",
        Scope => "scope",
    }
}

ir_enum! {
    QuantityKind, "quantity kind" {
        Duration => "duration",
        Count => "count",
        Currency => "currency",
    }
}

ir_enum! {
    EntityKind, "entity kind" {
        Proper => "proper",
        Acronym => "acronym",
        Technology => "technology",
    }
}

impl Default for Complexity {
    fn default() -> Self {
        Complexity::Low
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        SchemaVersion::V2
    }
}

impl SchemaVersion {
    /// The `version` field written into IR documents of this schema.
    pub fn ir_version(&self) -> &'static str {
        match self {
            SchemaVersion::V1 => crate::IR_VERSION_V1,
            SchemaVersion::V2 => crate::IR_VERSION_V2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_from_str() {
        assert_eq!("Developer".parse::<Persona>(), Ok(Persona::Developer));
        assert_eq!(" coach ".parse::<Persona>(), Ok(Persona::Coach));

        let err = "wizard".parse::<Persona>().unwrap_err();
        assert_eq!(err.kind, "persona");
        assert!(err.expected.contains("assistant"));
        assert!(err.to_string().contains("wizard"));
    }

    #[test]
    fn test_language_labels() {
        assert_eq!(Language::Tr.to_string(), "tr");
        assert_eq!(serde_json::to_string(&Language::Es).unwrap(), "\"es\"");
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_intent_precedence_is_declaration_order() {
        assert!(Intent::Debug < Intent::Teaching);
        assert!(Intent::Teaching < Intent::Comparison);
        assert!(Intent::Summary < Intent::Variants);
    }

    #[test]
    fn test_pii_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&PiiKind::CreditCard).unwrap(),
            "\"credit_card\""
        );
    }
}
