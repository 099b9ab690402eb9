// End-to-end runs over temp log/report directories.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use uilog_report::aggregate::{aggregate_log, ErrorRateExceeded};
use uilog_report::{run, Config, RunOutcome};

const SAMPLE_LOG: &str = concat!(
    "1.196.116.32 -  - [29/Jun/2017:03:50:22 +0300] \"GET /api/v2/banner/25019354 HTTP/1.1\" 200 927 \"-\" \"Lynx/2.8.8dev.9\" \"-\" \"1498697422-2190034393-4708-9752759\" \"dc7161be3\" 0.390\n",
    "1.99.174.176 3b81f63526fa8  - [29/Jun/2017:03:50:22 +0300] \"GET /api/1/photogenic_banners/list/?server_name=WIN7RB4 HTTP/1.1\" 200 12 \"-\" \"Python-urllib/2.7\" \"-\" \"1498697422-32900793-4708-9752770\" \"-\" 0.133\n",
    "1.169.137.128 -  - [29/Jun/2017:03:50:22 +0300] \"GET /api/v2/banner/16852664 HTTP/1.1\" 200 19415 \"-\" \"Slotovod\" \"-\" \"1498697422-2118016444-4708-9752769\" \"712e90144abee9\" 0.199\n",
);

fn workspace() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        report_size: 10,
        report_dir: dir.path().join("reports"),
        log_dir: dir.path().join("log"),
        error_limit: None,
        log_file: None,
    };
    fs::create_dir_all(&config.log_dir).unwrap();
    (dir, config)
}

fn write_plain(log_dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = log_dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn write_gzipped(log_dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = log_dir.join(name);
    let mut encoder = flate2::write::GzEncoder::new(
        File::create(&path).unwrap(),
        flate2::Compression::default(),
    );
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

#[test]
fn sample_log_aggregates_into_three_single_sample_urls() {
    let (_dir, config) = workspace();
    let path = write_plain(&config.log_dir, "nginx-access-ui.log-20170629", SAMPLE_LOG);

    let agg = aggregate_log(&path, None).unwrap();
    assert_eq!(agg.total_lines, 3);
    assert_eq!(agg.error_lines, 0);
    assert_eq!(agg.times_by_url.len(), 3);
    assert_eq!(
        agg.times_by_url["/api/v2/banner/25019354"],
        vec![0.390]
    );
    assert_eq!(
        agg.times_by_url["/api/1/photogenic_banners/list/?server_name=WIN7RB4"],
        vec![0.133]
    );
    assert_eq!(agg.times_by_url["/api/v2/banner/16852664"], vec![0.199]);
}

#[test]
fn full_run_writes_the_dated_report() {
    let (_dir, config) = workspace();
    write_plain(&config.log_dir, "nginx-access-ui.log-20170630", SAMPLE_LOG);

    let outcome = run(&config).unwrap();
    let expected = config.report_dir.join("report-2017.06.30.html");
    assert_eq!(outcome, RunOutcome::ReportWritten(expected.clone()));

    let html = fs::read_to_string(&expected).unwrap();
    // Slowest URL first in the embedded rows.
    let first = html.find("/api/v2/banner/25019354").unwrap();
    let second = html.find("/api/v2/banner/16852664").unwrap();
    assert!(first < second);
}

#[test]
fn second_run_is_a_no_op() {
    let (_dir, config) = workspace();
    write_plain(&config.log_dir, "nginx-access-ui.log-20170630", SAMPLE_LOG);

    let first = run(&config).unwrap();
    let RunOutcome::ReportWritten(path) = first else {
        panic!("first run should write the report, got {first:?}");
    };
    let written = fs::metadata(&path).unwrap().modified().unwrap();

    let second = run(&config).unwrap();
    assert_eq!(second, RunOutcome::ReportAlreadyExists(path.clone()));
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), written);
}

#[test]
fn empty_log_dir_is_a_no_op() {
    let (_dir, config) = workspace();
    assert_eq!(run(&config).unwrap(), RunOutcome::NoLogFound);
    assert!(!config.report_dir.exists());
}

#[test]
fn error_rate_over_limit_aborts_without_a_report() {
    let (_dir, mut config) = workspace();
    config.error_limit = Some(0.01);
    let broken = format!("{SAMPLE_LOG}broken line one\nbroken line two\n");
    write_plain(&config.log_dir, "nginx-access-ui.log-20170630", &broken);

    let err = run(&config).unwrap_err();
    assert!(err.downcast_ref::<ErrorRateExceeded>().is_some());
    assert!(!config
        .report_dir
        .join("report-2017.06.30.html")
        .exists());
}

#[test]
fn gzipped_log_produces_identical_aggregation() {
    let (_dir, config) = workspace();
    let plain = write_plain(&config.log_dir, "nginx-access-ui.log-20170629", SAMPLE_LOG);
    let gzipped = write_gzipped(
        &config.log_dir,
        "nginx-access-ui.log-20170630.gz",
        SAMPLE_LOG,
    );

    let from_plain = aggregate_log(&plain, None).unwrap();
    let from_gz = aggregate_log(&gzipped, None).unwrap();
    assert_eq!(from_plain.times_by_url, from_gz.times_by_url);
    assert_eq!(from_plain.total_lines, from_gz.total_lines);
    assert_eq!(from_plain.error_lines, from_gz.error_lines);
}

#[test]
fn gzipped_log_is_discovered_and_reported() {
    let (_dir, config) = workspace();
    write_gzipped(
        &config.log_dir,
        "nginx-access-ui.log-20170701.gz",
        SAMPLE_LOG,
    );

    let outcome = run(&config).unwrap();
    assert_eq!(
        outcome,
        RunOutcome::ReportWritten(config.report_dir.join("report-2017.07.01.html"))
    );
}

#[test]
fn report_size_truncates_to_top_n() {
    let (_dir, mut config) = workspace();
    config.report_size = 1;
    write_plain(&config.log_dir, "nginx-access-ui.log-20170630", SAMPLE_LOG);

    run(&config).unwrap();
    let html = fs::read_to_string(config.report_dir.join("report-2017.06.30.html")).unwrap();
    assert!(html.contains("/api/v2/banner/25019354"));
    assert!(!html.contains("/api/v2/banner/16852664"));
    assert!(!html.contains("/api/1/photogenic_banners/list/?server_name=WIN7RB4"));
}
