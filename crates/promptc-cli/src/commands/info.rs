//! Info command - show information about this promptc build.

use promptc_core::{HEURISTIC_VERSION, PLUGIN_API_VERSION};
use promptc_ir::{IR_VERSION_V1, IR_VERSION_V2};

pub(crate) fn run() -> miette::Result<()> {
    println!("promptc - offline prompt compiler");
    println!("=================================");
    println!();
    println!("Version:           {}", env!("CARGO_PKG_VERSION"));
    println!("Heuristics:        {}", HEURISTIC_VERSION);
    println!("IR schemas:        v1 ({}), v2 ({})", IR_VERSION_V1, IR_VERSION_V2);
    println!("Plugin API:        v{}", PLUGIN_API_VERSION);
    println!();

    println!("Components:");
    println!("  promptc-lexer   - Tokenization");
    println!("  promptc-ir      - IR shapes, validation, signatures, diff");
    println!("  promptc-core    - Classification and constraint synthesis");
    println!("  promptc-emit    - Prompt rendering (system, user, plan, expanded)");
    println!("  promptc-driver  - Batch compilation");
    println!();

    println!("Languages: tr, en, es");
    println!("Personas:  assistant, teacher, researcher, coach, mentor, developer");

    Ok(())
}
