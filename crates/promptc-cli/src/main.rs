//! promptc CLI - command-line interface for the prompt compiler.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// promptc - compile natural-language requests into a structured prompt IR
#[derive(Parser)]
#[command(name = "promptc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that compiles text.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CompileArgs {
    /// Persona override (assistant, teacher, researcher, coach, mentor, developer)
    #[arg(long)]
    persona: Option<String>,
    /// Language override (tr, en, es)
    #[arg(long = "lang")]
    language: Option<String>,
    /// IR schema to emit (v1 or v2)
    #[arg(long, default_value = "v2")]
    schema: String,
    /// External pattern configuration (JSON)
    #[arg(long)]
    patterns: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a request and print its IR as JSON
    Compile {
        /// Request text (read from stdin when omitted)
        text: Option<String>,
        #[command(flatten)]
        args: CompileArgs,
        /// Print the heuristic trace to stderr
        #[arg(long)]
        trace: bool,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Compile every request in a file and print one JSON line per request
    Batch {
        /// Input file: one request per line, or JSONL with {"id", "text"}
        file: PathBuf,
        #[command(flatten)]
        args: CompileArgs,
        /// Maximum parallel compiles (default: available cores)
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,
        /// Stop starting new requests after the first failure
        #[arg(long)]
        fail_fast: bool,
    },

    /// Render a prompt surface from a request or a saved IR document
    Render {
        /// Request text (read from stdin when neither text nor --ir is given)
        text: Option<String>,
        /// Render a saved IR document instead of compiling text
        #[arg(long, conflicts_with = "text")]
        ir: Option<PathBuf>,
        /// Surface: system, user, plan or expanded
        #[arg(short, long, default_value = "expanded")]
        surface: String,
        #[command(flatten)]
        args: CompileArgs,
    },

    /// Show field-level differences between two IR documents
    Diff {
        /// IR document before
        before: PathBuf,
        /// IR document after
        after: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate an external pattern configuration
    CheckConfig {
        /// Pattern configuration file (JSON)
        file: PathBuf,
    },

    /// Show information about this promptc build
    Info,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    match cli.command {
        Commands::Compile {
            text,
            args,
            trace,
            pretty,
        } => commands::compile::run(text, &args, trace, pretty),
        Commands::Batch {
            file,
            args,
            concurrency,
            fail_fast,
        } => commands::batch::run(&file, &args, concurrency, fail_fast),
        Commands::Render {
            text,
            ir,
            surface,
            args,
        } => commands::render::run(text, ir.as_deref(), &surface, &args),
        Commands::Diff {
            before,
            after,
            json,
        } => commands::diff::run(&before, &after, json),
        Commands::CheckConfig { file } => commands::check_config::run(&file),
        Commands::Info => commands::info::run(),
    }
}
