//! Prompt writer - renders an IR into one of the prompt surfaces.

use std::fmt::{self, Write};
use std::str::FromStr;
use thiserror::Error;

use promptc_ir::IrView;

use crate::labels::{labels, Labels};

/// Rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Role line, constraints and output rules
    System,
    /// Goals, inputs, tasks and examples
    User,
    /// Ordered steps and follow-up questions
    Plan,
    /// All three, one after the other
    Expanded,
}

impl Surface {
    pub const ALL: [Surface; 4] = [
        Surface::System,
        Surface::User,
        Surface::Plan,
        Surface::Expanded,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Surface::System => "system",
            Surface::User => "user",
            Surface::Plan => "plan",
            Surface::Expanded => "expanded",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown surface '{0}' (expected one of: system, user, plan, expanded)")]
pub struct UnknownSurface(pub String);

impl FromStr for Surface {
    type Err = UnknownSurface;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Surface::ALL
            .into_iter()
            .find(|surface| surface.label() == needle)
            .ok_or_else(|| UnknownSurface(s.to_string()))
    }
}

/// Writer for prompt surfaces.
pub struct PromptWriter {
    /// Prefix for list items (default: `- `).
    bullet: String,
}

impl Default for PromptWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptWriter {
    pub fn new() -> Self {
        Self {
            bullet: "- ".to_string(),
        }
    }

    /// Writer with a custom bullet prefix.
    pub fn with_bullet(bullet: impl Into<String>) -> Self {
        Self {
            bullet: bullet.into(),
        }
    }

    /// Render `surface` with section labels in the IR's language.
    pub fn render(&self, ir: &dyn IrView, surface: Surface) -> String {
        let mut output = String::new();
        self.write_surface(&mut output, ir, surface)
            .expect("write to String");
        output.trim_end().to_string() + "\n"
    }

    fn write_surface(&self, output: &mut String, ir: &dyn IrView, surface: Surface) -> fmt::Result {
        let labels = labels(ir.language());
        match surface {
            Surface::System => self.write_system(output, ir, labels),
            Surface::User => self.write_user(output, ir, labels),
            Surface::Plan => self.write_plan(output, ir, labels),
            Surface::Expanded => {
                let parts: [fn(&Self, &mut String, &dyn IrView, &Labels) -> fmt::Result; 3] =
                    [Self::write_system, Self::write_user, Self::write_plan];
                for (heading, write) in labels.parts.iter().zip(parts) {
                    writeln!(output, "## {heading}")?;
                    writeln!(output)?;
                    write(self, output, ir, labels)?;
                    writeln!(output)?;
                }
                Ok(())
            }
        }
    }

    fn write_system(&self, output: &mut String, ir: &dyn IrView, labels: &Labels) -> fmt::Result {
        writeln!(output, "{}", ir.role())?;

        let constraints = ir.constraint_texts();
        if !constraints.is_empty() {
            writeln!(output)?;
            writeln!(output, "{}:", labels.constraints)?;
            for (i, text) in constraints.iter().enumerate() {
                writeln!(output, "{}. {}", i + 1, text)?;
            }
        }

        writeln!(output)?;
        writeln!(output, "{}: {}", labels.output_format, ir.output_format())?;
        writeln!(output, "{}: {}", labels.length, ir.length_hint())?;
        self.write_inline(output, labels.style, ir.style().iter())?;
        self.write_inline(output, labels.tone, ir.tone().iter())?;
        self.write_inline(output, labels.avoid, ir.banned().iter())?;
        self.write_inline(output, labels.tools, ir.tools().iter())?;
        Ok(())
    }

    fn write_user(&self, output: &mut String, ir: &dyn IrView, labels: &Labels) -> fmt::Result {
        self.write_list(output, labels.goals, ir.goals().iter())?;

        let inputs = ir.inputs().entries();
        if !inputs.is_empty() {
            writeln!(output, "{}:", labels.inputs)?;
            for (key, value) in inputs {
                writeln!(output, "{}{key}: {value}", self.bullet)?;
            }
            writeln!(output)?;
        }

        if ir.tasks().len() > 1 {
            self.write_list(output, labels.tasks, ir.tasks().iter())?;
        }
        self.write_list(output, labels.comparison, ir.metadata().comparison_items.iter())?;
        self.write_list(output, labels.examples, ir.examples().iter())?;
        Ok(())
    }

    fn write_plan(&self, output: &mut String, ir: &dyn IrView, labels: &Labels) -> fmt::Result {
        let steps = ir.step_texts();
        let steps: Vec<&str> = if steps.is_empty() {
            ir.tasks().iter().map(String::as_str).collect()
        } else {
            steps
        };

        writeln!(output, "{}", labels.plan_intro)?;
        writeln!(output)?;
        writeln!(output, "{}:", labels.steps)?;
        for (i, step) in steps.iter().enumerate() {
            writeln!(output, "{}. {}", i + 1, step)?;
        }

        let questions = &ir.metadata().clarify_questions_struct;
        if !questions.is_empty() {
            writeln!(output)?;
            self.write_list(output, labels.questions, questions.iter().map(|q| &q.question))?;
        }
        Ok(())
    }

    /// `Label:` followed by bullet items; nothing when empty.
    fn write_list<'a>(
        &self,
        output: &mut String,
        label: &str,
        items: impl Iterator<Item = &'a String>,
    ) -> fmt::Result {
        let mut items = items.peekable();
        if items.peek().is_none() {
            return Ok(());
        }
        writeln!(output, "{label}:")?;
        for item in items {
            writeln!(output, "{}{}", self.bullet, item)?;
        }
        writeln!(output)
    }

    /// `Label: a, b, c`; nothing when empty.
    fn write_inline<'a>(
        &self,
        output: &mut String,
        label: &str,
        items: impl Iterator<Item = &'a String>,
    ) -> fmt::Result {
        let items: Vec<&str> = items.map(String::as_str).collect();
        if items.is_empty() {
            return Ok(());
        }
        writeln!(output, "{label}: {}", items.join(", "))
    }
}

/// Render `surface` with the default writer.
pub fn emit(ir: &dyn IrView, surface: Surface) -> String {
    PromptWriter::new().render(ir, surface)
}
