//! Debugging and live-fix requests.

use lazy_static::lazy_static;
use promptc_ir::{Intent, Step, StepKind};
use regex::Regex;

use super::{IntentContext, IntentDelta};
use crate::constraints::{Emitter, Origin};
use crate::phrases::phrases;

pub const PRIORITY_RUNNABLE: i32 = 70;
pub const PRIORITY_REPRO: i32 = 68;

lazy_static! {
    static ref STACK_TRACE: Regex = Regex::new(
        r#"(?m)Traceback \(most recent call last\)|^\s+at \S+\(.*\)|\b\w+(?:Error|Exception)\b|panicked at|File "[^"]+", line [0-9]+|(?i:segmentation fault)|\bline [0-9]+, in\b"#
    )
    .unwrap();
}

/// Requests for a minimal reproducible example.
const REPRO: &[&str] = &[
    "minimal reproducible", "reproducible example", "mre", "repro", "reproduce",
    "minimal example", "yeniden üret*", "reproducir", "ejemplo mínimo",
];

/// Iterative-fix language.
const FIX: &[&str] = &[
    "fix", "fixing", "debug", "debugging", "bug", "bugs", "not working", "doesn't work",
    "does not work", "broken", "crash", "crashes", "crashing", "getting an error",
    "got an error", "throws an error", "throwing an error", "gives an error", "this error",
    "error message", "compile error", "runtime error",
    "stack trace", "traceback", "still failing", "live fix", "hata*", "düzelt*", "çalışmıyor",
    "arregla*", "depura*", "no funciona", "fallo",
];

pub fn enrich(ctx: &IntentContext<'_>) -> Option<IntentDelta> {
    let trace = STACK_TRACE.is_match(ctx.text.raw);
    if !trace && !ctx.text.any(REPRO) && !ctx.text.any(FIX) {
        return None;
    }
    let p = phrases(ctx.language);
    let mut delta = IntentDelta::new(Intent::Debug);

    let mut e = Emitter::new(Origin::Debug);
    e.emit(PRIORITY_RUNNABLE, p.debug_runnable);
    e.emit(PRIORITY_REPRO, p.debug_repro);
    delta.constraints = e.finish();

    let kinds = [
        StepKind::Reproduce,
        StepKind::Isolate,
        StepKind::Fix,
        StepKind::Verify,
    ];
    delta.steps = Some(
        kinds
            .into_iter()
            .zip(p.debug_steps)
            .map(|(kind, text)| Step::new(kind, text))
            .collect(),
    );
    delta.style.push("precise");
    Some(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals;
    use crate::tables::Tables;
    use crate::text::Text;
    use promptc_ir::Language;

    fn run(source: &str) -> Option<IntentDelta> {
        let text = Text::new(source);
        let signals = signals::extract(&text, Language::En, &Tables::builtin());
        enrich(&IntentContext {
            text: &text,
            language: Language::En,
            signals: &signals,
        })
    }

    #[test]
    fn test_stack_trace() {
        let source = "Traceback (most recent call last):\n  File \"app.py\", line 3, in <module>\nKeyError: 'x'";
        let delta = run(source).unwrap();
        assert_eq!(delta.intent, Intent::Debug);
        let priorities: Vec<_> = delta.constraints.iter().map(|e| e.priority).collect();
        assert_eq!(priorities, vec![PRIORITY_RUNNABLE, PRIORITY_REPRO]);
    }

    #[test]
    fn test_fix_language() {
        let delta = run("my login handler is not working, help me fix it").unwrap();
        let kinds: Vec<_> = delta.steps.unwrap().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![StepKind::Reproduce, StepKind::Isolate, StepKind::Fix, StepKind::Verify]
        );
        assert!(run("thread 'main' panicked at src/main.rs:4:5").is_some());
    }

    #[test]
    fn test_error_needs_a_failure_phrase() {
        assert!(run("explain error handling in rust").is_none());
        assert!(run("i keep getting an error when saving the form").is_some());
        assert!(run("what does this error mean").is_some());
    }

    #[test]
    fn test_plain_request() {
        assert!(run("write a haiku about rain").is_none());
        assert!(run("teach me binary search in 10 minutes beginner level").is_none());
    }
}
