// File: src/parsers/nginx.rs

use regex::Regex;
use std::sync::OnceLock;

use super::ParsedRecord;

// Grammar of nginx's `ui_short` access log format:
//
//   $remote_addr  $remote_user $http_x_real_ip [$time_local] "$request"
//   $status $body_bytes_sent "$http_referer" "$http_user_agent"
//   "$http_x_forwarded_for" "$http_X_REQUEST_ID" "$http_X_RB_USER"
//   $request_time
//
// The remote_user field is padded with a second space, hence `\s+`. The
// user-agent is the one quoted field that may itself contain spaces (and
// arbitrary UTF-8), hence `.*` instead of `\S+`. Anchored at the start
// only; trailing content after the request time does not reject the line.
fn line_regex() -> &'static Regex {
    static LINE_REGEX: OnceLock<Regex> = OnceLock::new();

    LINE_REGEX.get_or_init(|| {
        Regex::new(
            r#"^\S+ \S+\s+\S+ \[\S+ \S+\] "\S+ (?P<url>\S+) \S+" \d+ \d+ "\S+" ".*" "\S+" "\S+" "\S+" (?P<time>\d+\.\d+)"#,
        )
        .expect("Invalid ui_short line regex")
    })
}

/// Matches one decoded log line against the `ui_short` grammar.
///
/// Captures the URL token of the quoted request field and the trailing
/// request time in seconds. A line that does not match yields `None` —
/// malformed records are tallied by the caller, never raised.
pub fn parse_line(line: &str) -> Option<ParsedRecord> {
    let caps = line_regex().captures(line)?;
    let url = caps.name("url")?.as_str().to_string();
    let request_time = caps.name("time")?.as_str().parse::<f64>().ok()?;

    Some(ParsedRecord { url, request_time })
}
