//! Batch command - compile every request in a file.

use crate::CompileArgs;
use promptc_driver::{load_items, run_batch, BatchOptions, BatchOutcome, BatchSummary};
use serde_json::{json, Value};
use std::path::Path;

pub fn run(
    file: &Path,
    args: &CompileArgs,
    concurrency: Option<usize>,
    fail_fast: bool,
) -> miette::Result<()> {
    let items = load_items(file).map_err(|e| miette::miette!("{}", e))?;
    if items.is_empty() {
        return Err(miette::miette!("No requests in {}", file.display()));
    }

    let compiler = super::compiler(args)?;
    let options = super::options(args, false)?;
    let mut batch = BatchOptions {
        fail_fast,
        ..BatchOptions::default()
    };
    if let Some(concurrency) = concurrency {
        batch.concurrency = concurrency;
    }

    let outcomes =
        run_batch(&compiler, &items, &options, &batch).map_err(|e| miette::miette!("{}", e))?;

    for outcome in &outcomes {
        println!("{}", record(outcome));
    }

    let summary = BatchSummary::of(&outcomes);
    eprintln!(
        "Batch complete: {} compiled, {} failed, {} skipped",
        summary.compiled, summary.failed, summary.skipped
    );
    if summary.failed > 0 {
        Err(miette::miette!("{} request(s) failed", summary.failed))
    } else {
        Ok(())
    }
}

/// One output line: `{"id", "signature", "ir"}` or `{"id", "error"}`.
fn record(outcome: &BatchOutcome) -> Value {
    match &outcome.result {
        Ok(output) => match output.ir.to_value() {
            Ok(ir) => json!({
                "id": outcome.id,
                "signature": output.ir.signature(),
                "ir": ir,
            }),
            Err(e) => json!({ "id": outcome.id, "error": e.to_string() }),
        },
        Err(e) => json!({ "id": outcome.id, "error": e.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptc_core::{CompileError, CompileOptions, Compiler};
    use promptc_driver::BatchItemError;

    #[test]
    fn test_record_shapes() {
        let output = Compiler::new()
            .compile("compare rust and go", &CompileOptions::default())
            .unwrap();
        let ok = record(&BatchOutcome {
            id: "a".into(),
            result: Ok(output),
        });
        assert_eq!(ok["id"], "a");
        assert_eq!(ok["ir"]["signature"], ok["signature"]);

        let failed = record(&BatchOutcome {
            id: "b".into(),
            result: Err(BatchItemError::Failed(CompileError::EmptyInput)),
        });
        assert_eq!(failed["error"], "input text is empty");
    }
}
