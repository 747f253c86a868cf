//! Render command - print a prompt surface.

use crate::CompileArgs;
use promptc_emit::{PromptWriter, Surface};
use promptc_ir::parse_document;
use std::path::Path;

pub fn run(
    text: Option<String>,
    ir_path: Option<&Path>,
    surface: &str,
    args: &CompileArgs,
) -> miette::Result<()> {
    let surface: Surface = surface.parse().map_err(|e| miette::miette!("{}", e))?;

    let ir = match ir_path {
        Some(path) => {
            let source = super::read_file(path)?;
            parse_document(&source)
                .map_err(|e| miette::miette!("Invalid IR document {}: {}", path.display(), e))?
        }
        None => {
            let text = super::request_text(text)?;
            let compiler = super::compiler(args)?;
            let options = super::options(args, false)?;
            compiler
                .compile(&text, &options)
                .map_err(|e| miette::miette!("{}", e))?
                .ir
        }
    };

    print!("{}", PromptWriter::new().render(ir.view(), surface));
    Ok(())
}
