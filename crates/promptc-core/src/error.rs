//! Compile and configuration errors.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which override was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideKind {
    Persona,
    Language,
}

impl fmt::Display for OverrideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideKind::Persona => f.write_str("persona"),
            OverrideKind::Language => f.write_str("language"),
        }
    }
}

/// Errors from a compile call.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("invalid {kind} override: '{value}' (expected one of: {expected})")]
    InvalidOverride {
        kind: OverrideKind,
        value: String,
        expected: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    /// An assembled IR broke one of its own invariants. Always a bug.
    #[error("schema invariant violated: {0}")]
    SchemaInvariant(String),

    #[error("plugin '{name}' targets extension API v{found}, expected v{expected}")]
    IncompatiblePlugin {
        name: String,
        found: u32,
        expected: u32,
    },
}

impl From<serde_json::Error> for CompileError {
    fn from(err: serde_json::Error) -> Self {
        // IR records only hold string-keyed maps; failing to serialize one is an invariant break
        CompileError::SchemaInvariant(format!("IR serialization failed: {err}"))
    }
}

/// Errors loading an external pattern configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read pattern config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed pattern config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid pattern config: {0}")]
    Invalid(String),
}
