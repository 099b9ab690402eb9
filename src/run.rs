// File: src/run.rs

use std::path::PathBuf;

use log::info;

use crate::aggregate;
use crate::config::Config;
use crate::discover;
use crate::report;
use crate::stats;

/// How a run ended. All three variants are a clean exit; failures travel
/// as errors.
#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    /// A fresh report was written to this path.
    ReportWritten(PathBuf),
    /// The report for the latest log's date is already on disk.
    ReportAlreadyExists(PathBuf),
    /// No file in the log directory matches the naming convention.
    NoLogFound,
}

/// One full reporting run: discover → gate → aggregate → stats → render.
///
/// Idempotent with respect to the gate: running twice over the same log
/// directory writes the report once.
pub fn run(config: &Config) -> anyhow::Result<RunOutcome> {
    let Some(source) = discover::find_latest_log(&config.log_dir)? else {
        info!(
            "no nginx-access-ui log found in {}, nothing to do",
            config.log_dir.display()
        );
        return Ok(RunOutcome::NoLogFound);
    };
    info!("processing {} ({})", source.path.display(), source.date);

    let dest = report::report_path(&config.report_dir, source.date);
    if dest.exists() {
        info!("report {} already exists, nothing to do", dest.display());
        return Ok(RunOutcome::ReportAlreadyExists(dest));
    }

    let agg = aggregate::aggregate_log(&source.path, config.error_limit)?;
    let url_stats = stats::compute_stats(&agg.times_by_url);

    let max_size = match config.report_size {
        0 => None,
        size => Some(size),
    };
    let top = report::select_top(url_stats, max_size);

    report::render_report(&top, &dest)?;
    info!(
        "report with {} rows written to {}",
        top.len(),
        dest.display()
    );
    Ok(RunOutcome::ReportWritten(dest))
}
