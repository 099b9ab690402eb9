// File: src/main.rs

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use log::error;

use uilog_report::{run, Config};

/// Batch nginx access-log analyzer.
///
/// Picks the most recent nginx-access-ui log in the configured directory,
/// aggregates per-URL request times and writes the slowest URLs as an HTML
/// report. Does nothing if that report already exists.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON config file overriding the built-in defaults field-by-field
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{}] {} {}",
            Local::now().format("%Y.%m.%d %H:%M:%S"),
            &record.level().as_str()[..1],
            record.args()
        )
    });

    if let Some(path) = log_file {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("opening diagnostic log {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            // Logging is configured from the config itself, so this one
            // failure goes straight to stderr.
            eprintln!("configuration error: {err:#}");
            process::exit(1);
        }
    };

    if let Err(err) = init_logging(config.log_file.as_deref()) {
        eprintln!("logging setup failed: {err:#}");
        process::exit(1);
    }

    if let Err(err) = run(&config) {
        error!("run failed: {err:#}");
        process::exit(1);
    }
}
