// File: src/discover.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::NaiveDate;
use log::debug;
use regex::Regex;

/// A log file picked for processing, with the date embedded in its name.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSource {
    pub path: PathBuf,
    pub date: NaiveDate,
}

fn name_regex() -> &'static Regex {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();

    NAME_REGEX.get_or_init(|| {
        Regex::new(r"^nginx-access-ui\.log-(\d{8})(\.gz)?$").expect("Invalid log name regex")
    })
}

/// Finds the most recent `nginx-access-ui.log-YYYYMMDD[.gz]` in `log_dir`.
///
/// A missing or empty directory is not an error: there is simply nothing to
/// do, so the result is `None`. Ties on date are arbitrary among same-date
/// files (a plain and a gzipped log for one day carry the same data).
pub fn find_latest_log(log_dir: &Path) -> anyhow::Result<Option<LogSource>> {
    if !log_dir.is_dir() {
        return Ok(None);
    }

    let entries = fs::read_dir(log_dir)
        .with_context(|| format!("listing log directory {}", log_dir.display()))?;

    let mut latest: Option<LogSource> = None;
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", log_dir.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(caps) = name_regex().captures(name) else {
            continue;
        };
        // Eight digits are not necessarily a calendar date (month 13, day 40).
        let Ok(date) = NaiveDate::parse_from_str(&caps[1], "%Y%m%d") else {
            debug!("skipping {name}: not a real date");
            continue;
        };

        if latest.as_ref().is_none_or(|best| date > best.date) {
            latest = Some(LogSource {
                path: entry.path(),
                date,
            });
        }
    }

    Ok(latest)
}
