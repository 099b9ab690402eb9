// File: src/aggregate.rs

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use flate2::read::GzDecoder;
use log::warn;

use crate::parsers::nginx;

/// Everything one pass over a log file produces.
#[derive(Debug, Default)]
pub struct Aggregation {
    /// Observed request times grouped by URL. Every key holds at least one
    /// sample.
    pub times_by_url: HashMap<String, Vec<f64>>,
    pub total_lines: u64,
    pub error_lines: u64,
}

/// Fatal condition: the share of unparseable lines went over the configured
/// limit, so the file cannot be trusted to produce a meaningful report.
#[derive(Debug)]
pub struct ErrorRateExceeded {
    pub error_lines: u64,
    pub total_lines: u64,
    pub limit: f64,
}

impl fmt::Display for ErrorRateExceeded {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} of {} lines failed to parse, more than the allowed share of {}",
            self.error_lines, self.total_lines, self.limit
        )
    }
}

impl std::error::Error for ErrorRateExceeded {}

/// Opens the log for sequential reading; a `.gz` extension selects
/// transparent gzip decompression.
fn open_log(path: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    let file =
        File::open(path).with_context(|| format!("opening log file {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads the whole log once, in order, grouping request times by URL.
///
/// Lines that do not match the grammar only bump the error counter. After
/// the pass, if `error_limit` is set and the error share exceeds it, the
/// run fails with [`ErrorRateExceeded`] and no report must be produced.
pub fn aggregate_log(path: &Path, error_limit: Option<f64>) -> anyhow::Result<Aggregation> {
    let reader = open_log(path)?;
    let mut agg = Aggregation::default();

    for line in reader.lines() {
        let line = line.with_context(|| format!("reading log file {}", path.display()))?;
        agg.total_lines += 1;
        match nginx::parse_line(&line) {
            Some(record) => agg
                .times_by_url
                .entry(record.url)
                .or_default()
                .push(record.request_time),
            None => agg.error_lines += 1,
        }
    }

    if let Some(limit) = error_limit {
        if agg.total_lines > 0 {
            let rate = agg.error_lines as f64 / agg.total_lines as f64;
            if rate > limit {
                return Err(ErrorRateExceeded {
                    error_lines: agg.error_lines,
                    total_lines: agg.total_lines,
                    limit,
                }
                .into());
            }
        }
    }

    if agg.error_lines > 0 {
        warn!(
            "{} of {} lines in {} did not match the log grammar",
            agg.error_lines,
            agg.total_lines,
            path.display()
        );
    }

    Ok(agg)
}
