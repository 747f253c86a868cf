//! Check-config command - validate an external pattern configuration.

use promptc_core::tables::Tables;
use std::path::Path;

pub fn run(file: &Path) -> miette::Result<()> {
    println!("Checking: {}", file.display());
    let config = super::load_patterns(file)?;
    let builtin = Tables::builtin();
    let merged = Tables::from_config(&config);

    for name in config.domains.keys() {
        let verb = if builtin.domains.iter().any(|d| &d.name == name) {
            "replaces"
        } else {
            "adds"
        };
        println!("  domain {:<16} {} built-in set", name, verb);
    }
    for (term, category) in &config.ambiguous_terms {
        println!("  ambiguous term {:<10} -> {}", term, category);
    }
    for name in config.risk.keys() {
        let verb = if builtin.risk.iter().any(|r| &r.name == name) {
            "replaces"
        } else {
            "adds"
        };
        println!("  risk {:<18} {} built-in set", name, verb);
    }

    println!();
    println!(
        "Config ok: {} domain(s), {} ambiguous term(s), {} risk categories after merge",
        merged.domains.len(),
        merged.ambiguous_terms.len(),
        merged.risk.len()
    );
    Ok(())
}
