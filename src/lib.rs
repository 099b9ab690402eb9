pub mod aggregate;
pub mod config;
pub mod discover;
pub mod parsers;
pub mod report;
pub mod run;
pub mod stats;

// Re-export for easy access
pub use config::Config;
pub use run::{run, RunOutcome};
pub use stats::UrlStat;
