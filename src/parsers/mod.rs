// File: src/parsers/mod.rs

pub mod nginx;

/// A single successfully parsed access-log record.
///
/// Only the two fields the report needs survive parsing; the rest of the
/// line is matched and discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub url: String,
    pub request_time: f64,
}
