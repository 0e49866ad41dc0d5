use crate::cli::Cli;
use crate::report::{count_defects, extract_defects, filter_new_defects, load, persist};
use crate::AppResult;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// An I/O or parse error was reported and the run stopped early.
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: Outcome,
    pub total: usize,
    pub new_defects: Vec<String>,
    pub fail_open: bool,
    pub output: Option<PathBuf>,
}

impl RunSummary {
    fn aborted() -> Self {
        Self {
            outcome: Outcome::Aborted,
            total: 0,
            new_defects: Vec::new(),
            fail_open: false,
            output: None,
        }
    }
}

pub fn run_filter(args: Cli) -> AppResult<()> {
    filter_report(&args.input, args.output.as_deref()).map(|_| ())
}

/// Runs the load → extract → filter → persist pipeline.
///
/// I/O and parse failures are logged and turned into an `Aborted` summary.
/// A structurally malformed report is returned as an error.
pub fn filter_report(input: &Path, output: Option<&Path>) -> AppResult<RunSummary> {
    match process(input, output) {
        Err(err) if err.is_handled() => {
            error!("Error: {err}");
            Ok(RunSummary::aborted())
        }
        result => result,
    }
}

fn process(input: &Path, output: Option<&Path>) -> AppResult<RunSummary> {
    let report = load(input)?;
    let defects = extract_defects(&report)?;

    let total = count_defects(defects.unwrap_or_default());
    info!(total, "Total number of issues: {total}");

    let new_defects = filter_new_defects(defects);

    if let Some(path) = output {
        persist(path, &new_defects)?;
        info!(path = %path.display(), count = new_defects.len(), "Wrote new CIDs.");
    }

    Ok(RunSummary {
        outcome: Outcome::Completed,
        total,
        fail_open: total == 0,
        new_defects,
        output: output.map(Path::to_path_buf),
    })
}
