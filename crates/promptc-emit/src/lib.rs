//! # promptc emit
//!
//! Renders an assembled IR into localized prompt text. Four surfaces:
//!
//! - **system**: role line, ordered constraints, output rules
//! - **user**: goals, inputs, tasks, compared items, examples
//! - **plan**: ordered steps and follow-up questions
//! - **expanded**: the three above under headings
//!
//! Section labels follow the IR's `language`. Rendering only reads the IR.

mod labels;
mod writer;

pub use labels::{labels, Labels};
pub use writer::{emit, PromptWriter, Surface, UnknownSurface};
