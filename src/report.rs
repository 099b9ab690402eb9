// File: src/report.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;

use crate::stats::UrlStat;

const REPORT_TEMPLATE: &str = include_str!("../templates/report.html");

/// The placeholder the HTML shell reserves for the JSON-encoded rows.
const TABLE_PLACEHOLDER: &str = "$table_json";

/// Sorts by total time descending and truncates to the configured size.
///
/// Ties on `time_sum` break on ascending URL so the report is deterministic
/// regardless of the aggregate mapping's iteration order. A `max_size` of
/// `None` keeps the full sorted list.
pub fn select_top(mut stats: Vec<UrlStat>, max_size: Option<usize>) -> Vec<UrlStat> {
    stats.sort_by(|a, b| {
        b.time_sum
            .total_cmp(&a.time_sum)
            .then_with(|| a.url.cmp(&b.url))
    });
    if let Some(size) = max_size {
        stats.truncate(size);
    }
    stats
}

/// Report destination for a log of the given date: `report-YYYY.MM.DD.html`.
pub fn report_path(report_dir: &Path, date: NaiveDate) -> PathBuf {
    report_dir.join(format!("report-{}.html", date.format("%Y.%m.%d")))
}

/// Embeds the selected rows into the HTML shell and writes the report.
///
/// The template is literal substitution, not logic templating: the single
/// `$table_json` placeholder is replaced with the rows as a JSON array. The
/// document is written to a sibling `.tmp` path and renamed into place, so
/// an aborted run never leaves a partial file at the final path.
pub fn render_report(stats: &[UrlStat], dest: &Path) -> anyhow::Result<()> {
    let rows = serde_json::to_string(stats).context("encoding report rows")?;
    let html = REPORT_TEMPLATE.replace(TABLE_PLACEHOLDER, &rows);

    if let Some(dir) = dest.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating report directory {}", dir.display()))?;
    }

    let tmp = dest.with_extension("html.tmp");
    fs::write(&tmp, html).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, dest)
        .with_context(|| format!("moving report into place at {}", dest.display()))?;
    Ok(())
}
