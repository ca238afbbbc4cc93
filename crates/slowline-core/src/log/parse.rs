use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // nginx log_format ui_short: remote_addr, remote_user, http_x_real_ip,
    // [time_local], "request", status, body_bytes_sent, "http_referer",
    // "http_user_agent", "http_x_forwarded_for", "http_X_REQUEST_ID",
    // "http_X_RB_USER", request_time
    static ref LOG_LINE_RE: Regex = Regex::new(
        r#"^(?P<remote_addr>\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})\s+(?P<remote_user>.*?)\s+(?P<real_ip>.*?)\s+\[(?P<time_local>.*?)\]\s+"(?P<method>.*?)\s+(?P<path>.*?)(\s+HTTP/.*?)?"\s+(?P<status>.*?)\s+(?P<bytes_sent>.*?)\s+"(?P<referer>.*?)"\s+"(?P<user_agent>.*?)"\s+"(?P<forwarded_for>.*?)"\s+"(?P<request_id>.*?)"\s+"(?P<rb_user>.*)"\s+(?P<request_time>\d+\.?\d*)"#
    )
    .unwrap();
}

/// One successfully parsed access-log record.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub path: String,
    pub request_time: f64,
}

/// Parse a single access-log line into the request path and its duration.
///
/// Returns `None` when the line does not match the expected format; a
/// mismatch is an ordinary per-line outcome counted by the caller, not an
/// error. No partial records are produced.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let caps = LOG_LINE_RE.captures(line)?;
    let request_time: f64 = caps["request_time"].parse().ok()?;

    Some(ParsedLine {
        path: caps["path"].to_string(),
        request_time,
    })
}
