// File: src/stats.rs

use std::collections::HashMap;

use serde::Serialize;

/// Per-URL request-time statistics, one record per distinct URL.
///
/// Field order is the order the report embeds them in. Every derived value
/// except `time_max` is rounded to 3 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlStat {
    pub url: String,
    pub count: u64,
    pub time_med: f64,
    pub time_sum: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_perc: f64,
    pub count_perc: f64,
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Middle element for odd lengths, mean of the two middle elements for even.
fn median(times: &[f64]) -> f64 {
    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Converts the URL→times mapping into one `UrlStat` per URL.
///
/// Two passes: the first builds per-URL aggregates, the second computes each
/// URL's share of the dataset-wide totals. The totals are sums of the
/// already-rounded per-URL sums, not of the raw sample times — the shares a
/// report emits depend on this, so it is kept even though a raw running
/// total would be more precise.
pub fn compute_stats(times_by_url: &HashMap<String, Vec<f64>>) -> Vec<UrlStat> {
    let mut total_time = 0.0;
    let mut total_count = 0u64;
    let mut stats = Vec::with_capacity(times_by_url.len());

    for (url, times) in times_by_url {
        let count = times.len() as u64;
        let time_sum = round3(times.iter().sum());
        total_time += time_sum;
        total_count += count;

        stats.push(UrlStat {
            url: url.clone(),
            count,
            time_med: round3(median(times)),
            time_sum,
            time_avg: round3(time_sum / count as f64),
            time_max: times.iter().fold(f64::MIN, |max, &t| max.max(t)),
            time_perc: 0.0,
            count_perc: 0.0,
        });
    }

    for stat in &mut stats {
        if total_time > 0.0 {
            stat.time_perc = round3(stat.time_sum / total_time * 100.0);
        }
        if total_count > 0 {
            stat.count_perc = round3(stat.count as f64 / total_count as f64 * 100.0);
        }
    }

    stats
}
