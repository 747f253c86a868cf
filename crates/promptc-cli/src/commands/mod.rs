//! CLI commands.

pub mod batch;
pub mod check_config;
pub mod compile;
pub mod diff;
pub mod info;
pub mod render;

use crate::CompileArgs;
use promptc_core::{CompileOptions, Compiler, PatternConfig};
use promptc_ir::SchemaVersion;
use std::io::Read;
use std::path::Path;

/// Compiler with the external patterns from `--patterns`, if any.
pub(crate) fn compiler(args: &CompileArgs) -> miette::Result<Compiler> {
    match &args.patterns {
        Some(path) => {
            let config = load_patterns(path)?;
            Compiler::with_patterns(&config).map_err(|e| miette::miette!("{}", e))
        }
        None => Ok(Compiler::new()),
    }
}

pub(crate) fn options(args: &CompileArgs, trace: bool) -> miette::Result<CompileOptions> {
    let schema: SchemaVersion = args
        .schema
        .parse()
        .map_err(|e| miette::miette!("{}", e))?;

    let mut builder = CompileOptions::builder().schema(schema).trace(trace);
    if let Some(persona) = &args.persona {
        builder = builder.persona(persona.clone());
    }
    if let Some(language) = &args.language {
        builder = builder.language(language.clone());
    }
    Ok(builder.build())
}

pub(crate) fn load_patterns(path: &Path) -> miette::Result<PatternConfig> {
    PatternConfig::from_path(path).map_err(|e| miette::miette!("{}", e))
}

/// The given text, or all of stdin.
pub(crate) fn request_text(text: Option<String>) -> miette::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| miette::miette!("Failed to read stdin: {}", e))?;
            Ok(buffer)
        }
    }
}

pub(crate) fn read_file(path: &Path) -> miette::Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_args() {
        let args = CompileArgs {
            persona: Some("teacher".into()),
            language: Some("es".into()),
            schema: "v1".into(),
            patterns: None,
        };
        let options = options(&args, true).unwrap();
        assert_eq!(options.schema_version, SchemaVersion::V1);
        assert!(options.trace);
    }

    #[test]
    fn test_unknown_schema_rejected() {
        let args = CompileArgs {
            schema: "v3".into(),
            ..CompileArgs::default()
        };
        assert!(options(&args, false).is_err());
    }

    #[test]
    fn test_compiler_with_bad_patterns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"{"domains": {"x": []}}"#).unwrap();
        let args = CompileArgs {
            schema: "v2".into(),
            patterns: Some(file.path().to_path_buf()),
            ..CompileArgs::default()
        };
        assert!(compiler(&args).is_err());
    }
}
