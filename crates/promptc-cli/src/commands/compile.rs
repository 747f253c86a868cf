//! Compile command - compile one request and print its IR.

use crate::CompileArgs;

pub fn run(text: Option<String>, args: &CompileArgs, trace: bool, pretty: bool) -> miette::Result<()> {
    let text = super::request_text(text)?;
    let compiler = super::compiler(args)?;
    let options = super::options(args, trace)?;

    let output = compiler
        .compile(&text, &options)
        .map_err(|e| miette::miette!("{}", e))?;

    if let Some(lines) = &output.trace {
        for line in lines {
            eprintln!("trace: {}", line);
        }
    }

    let json = if pretty {
        serde_json::to_string_pretty(&output.ir)
    } else {
        serde_json::to_string(&output.ir)
    }
    .map_err(|e| miette::miette!("Failed to serialize IR: {}", e))?;
    println!("{}", json);

    Ok(())
}
