//! # promptc core
//!
//! Deterministic, offline compiler from a natural-language request to a
//! versioned prompt IR.
//!
//! The pipeline:
//! 1. Language detection
//! 2. Domain classification
//! 3. Signal extraction (PII, temporal, quantities, ambiguity, risk, entities,
//!    complexity, code requests)
//! 4. Intent routing and enrichment
//! 5. Persona selection and output hints
//! 6. Constraint synthesis
//! 7. Constraint plugins and the optional hybrid hook
//! 8. Assembly into the v1 and v2 shapes, validation and sealing
//!
//! ## Example
//!
//! ```
//! use promptc_core::{CompileOptions, Compiler};
//!
//! let compiler = Compiler::new();
//! let out = compiler
//!     .compile("python vs go performance comparison", &CompileOptions::default())
//!     .unwrap();
//!
//! assert_eq!(out.ir.view().output_format().label(), "table");
//! assert_eq!(out.ir.view().metadata().comparison_items, ["python", "go"]);
//! ```

pub mod assemble;
pub mod compiler;
pub mod config;
pub mod constraints;
pub mod domain;
mod error;
pub mod hints;
pub mod intents;
pub mod language;
pub mod persona;
pub mod phrases;
pub mod plugin;
pub mod signals;
pub mod tables;
pub mod text;

pub use compiler::{role_line, Compilation, CompileOutput, Compiler};
pub use config::{CompileOptions, CompileOptionsBuilder, PatternConfig};
pub use error::{CompileError, ConfigLoadError, OverrideKind};
pub use plugin::{
    ConstraintPlugin, HybridDraft, HybridEnricher, HybridPatch, PluginConstraint, PluginContext,
    PLUGIN_API_VERSION,
};

/// Version of the heuristic tables and rules, recorded in every IR.
pub const HEURISTIC_VERSION: &str = "h1.0";
