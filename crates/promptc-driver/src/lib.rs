//! Batch driver for the promptc prompt compiler.
//!
//! Compiles many independent requests on a bounded worker pool:
//! 1. Load items (plain text, one request per line, or JSONL)
//! 2. Compile each item on its own; a failure never touches its siblings
//! 3. Optionally stop scheduling new items after the first failure
//! 4. Return outcomes in input order

use promptc_core::{CompileError, CompileOptions, CompileOutput, Compiler};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Batch configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Maximum number of compiles running at once.
    pub concurrency: usize,
    /// Stop starting new items once one has failed.
    pub fail_fast: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            fail_fast: false,
        }
    }
}

/// One request in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub id: String,
    pub text: String,
}

impl BatchItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Why a batch item has no IR.
#[derive(Debug, Error)]
pub enum BatchItemError {
    #[error(transparent)]
    Failed(#[from] CompileError),

    #[error("skipped after an earlier failure")]
    Skipped,
}

/// Result for one item, carrying the item's id.
#[derive(Debug)]
pub struct BatchOutcome {
    pub id: String,
    pub result: Result<CompileOutput, BatchItemError>,
}

/// Counts over a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub compiled: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn of(outcomes: &[BatchOutcome]) -> Self {
        outcomes
            .iter()
            .fold(BatchSummary::default(), |mut acc, outcome| {
                match &outcome.result {
                    Ok(_) => acc.compiled += 1,
                    Err(BatchItemError::Failed(_)) => acc.failed += 1,
                    Err(BatchItemError::Skipped) => acc.skipped += 1,
                }
                acc
            })
    }
}

/// Driver-level errors (loading input, building the pool).
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: invalid batch record: {source}")]
    Record {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Compile every item, at most `batch.concurrency` at a time.
///
/// Outcomes come back in input order. With `fail_fast`, items that had not
/// started when the first failure was seen are reported as
/// [`BatchItemError::Skipped`]; items already compiled keep their results.
pub fn run_batch(
    compiler: &Compiler,
    items: &[BatchItem],
    options: &CompileOptions,
    batch: &BatchOptions,
) -> Result<Vec<BatchOutcome>, DriverError> {
    if batch.concurrency == 0 {
        return Err(DriverError::ZeroConcurrency);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(batch.concurrency)
        .thread_name(|i| format!("promptc-batch-{i}"))
        .build()?;

    info!(items = items.len(), concurrency = batch.concurrency, fail_fast = batch.fail_fast, "starting batch");

    let failed = AtomicBool::new(false);
    let outcomes: Vec<BatchOutcome> = pool.install(|| {
        items
            .par_iter()
            .map(|item| compile_item(compiler, item, options, batch.fail_fast, &failed))
            .collect()
    });

    let summary = BatchSummary::of(&outcomes);
    info!(
        compiled = summary.compiled,
        failed = summary.failed,
        skipped = summary.skipped,
        "batch finished"
    );
    Ok(outcomes)
}

fn compile_item(
    compiler: &Compiler,
    item: &BatchItem,
    options: &CompileOptions,
    fail_fast: bool,
    failed: &AtomicBool,
) -> BatchOutcome {
    if fail_fast && failed.load(Ordering::SeqCst) {
        warn!(id = %item.id, "skipping batch item after earlier failure");
        return BatchOutcome {
            id: item.id.clone(),
            result: Err(BatchItemError::Skipped),
        };
    }

    let result = compiler.compile(&item.text, options).map_err(|err| {
        debug!(id = %item.id, error = %err, "batch item failed");
        failed.store(true, Ordering::SeqCst);
        BatchItemError::Failed(err)
    });

    BatchOutcome {
        id: item.id.clone(),
        result,
    }
}

// ============================================================================
// Input loading
// ============================================================================

/// Record shape for JSONL input; `id` defaults to the line number.
#[derive(Deserialize)]
struct Record {
    #[serde(default)]
    id: Option<String>,
    text: String,
}

/// Load items from `path`: JSONL when the extension is `.jsonl`, plain
/// text otherwise.
pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<BatchItem>, DriverError> {
    let path = path.as_ref();
    let is_jsonl = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));
    if is_jsonl {
        load_jsonl(path)
    } else {
        load_plain(path)
    }
}

/// One request per non-blank line; ids are 1-based line numbers.
pub fn load_plain(path: impl AsRef<Path>) -> Result<Vec<BatchItem>, DriverError> {
    let path = path.as_ref();
    let source = read(path)?;
    Ok(parse_plain(&source))
}

/// One `{"id", "text"}` object per non-blank line.
pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Vec<BatchItem>, DriverError> {
    let path = path.as_ref();
    let source = read(path)?;
    parse_jsonl(&source).map_err(|(line, source)| DriverError::Record {
        path: path.to_path_buf(),
        line,
        source,
    })
}

fn read(path: &Path) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|source| DriverError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_plain(source: &str) -> Vec<BatchItem> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| BatchItem::new((i + 1).to_string(), line.trim()))
        .collect()
}

fn parse_jsonl(source: &str) -> Result<Vec<BatchItem>, (usize, serde_json::Error)> {
    let mut items = Vec::new();
    for (i, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: Record = serde_json::from_str(line).map_err(|err| (i + 1, err))?;
        items.push(BatchItem {
            id: record.id.unwrap_or_else(|| (i + 1).to_string()),
            text: record.text,
        });
    }
    Ok(items)
}
