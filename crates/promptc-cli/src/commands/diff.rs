//! Diff command - compare two IR documents field by field.

use promptc_ir::diff::{diff, FieldChange};
use serde_json::Value;
use std::path::Path;

pub fn run(before: &Path, after: &Path, json: bool) -> miette::Result<()> {
    let before_doc = load(before)?;
    let after_doc = load(after)?;
    let changes = diff(&before_doc, &after_doc);

    if json {
        let out = serde_json::to_string_pretty(&changes)
            .map_err(|e| miette::miette!("Failed to serialize diff: {}", e))?;
        println!("{}", out);
        return Ok(());
    }

    if changes.is_empty() {
        println!("No differences");
        return Ok(());
    }
    for change in &changes {
        println!("{}", describe(change));
    }
    println!();
    println!("{} field(s) changed", changes.len());
    Ok(())
}

fn load(path: &Path) -> miette::Result<Value> {
    let source = super::read_file(path)?;
    serde_json::from_str(&source)
        .map_err(|e| miette::miette!("Invalid JSON in {}: {}", path.display(), e))
}

fn describe(change: &FieldChange) -> String {
    match (&change.before, &change.after) {
        (Some(before), Some(after)) => format!("~ {}: {} -> {}", change.path, before, after),
        (None, Some(after)) => format!("+ {}: {}", change.path, after),
        (Some(before), None) => format!("- {}: {}", change.path, before),
        (None, None) => format!("  {}", change.path),
    }
}
