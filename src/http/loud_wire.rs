//! Wire-level tracing for clients built with `verbose(true)`.
//!
//! Prints outgoing requests and raw responses to stderr with pretty
//! formatting and colors:
//!
//! - Green `>>>` for outgoing requests
//! - Red `<<<` for incoming responses
//! - Timestamps and request IDs for correlation
//!
//! Long string values are truncated and binary bodies (such as TTS audio)
//! are summarised by size. Output is diagnostic only; callers decide whether
//! to invoke these functions, nothing here reads the environment.

use chrono::{SecondsFormat, Utc};
use colored::Colorize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Request ID counter for correlating requests with responses
static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Maximum length of a JSON string value before truncation.
const TRUNCATE_THRESHOLD: usize = 200;

/// Maximum length of a non-JSON text body before truncation.
const RAW_BODY_PREVIEW: usize = 1000;

/// Get the next request ID for correlation.
#[must_use]
pub fn next_request_id() -> usize {
    REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Truncates a string at a character boundary, appending `...` if shortened.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= max_len)
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    format!("{}...", &s[..cut])
}

/// Walks the JSON tree and truncates every long string value.
fn truncate_long_strings(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::String(s) if s.len() > TRUNCATE_THRESHOLD => {
            *s = truncate(s, TRUNCATE_THRESHOLD);
        }
        serde_json::Value::Object(map) => map.values_mut().for_each(truncate_long_strings),
        serde_json::Value::Array(arr) => arr.iter_mut().for_each(truncate_long_strings),
        _ => {}
    }
}

/// Log prefix with timestamp and request ID.
fn prefix(request_id: usize) -> String {
    let ts = Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .dimmed();
    format!(
        "{} {} {}",
        "[WIRE]".bold(),
        ts,
        format!("[REQ#{request_id}]").cyan()
    )
}

/// Masks credentials so they never reach the terminal.
fn display_header_value(name: &str, value: &str) -> String {
    if name.eq_ignore_ascii_case("authorization") {
        "Bearer ***".to_string()
    } else {
        value.to_string()
    }
}

/// Prints a body, pretty-printing JSON and summarising binary payloads.
fn print_body(prefix: &str, label: &str, body: &[u8]) {
    if let Ok(mut parsed) = serde_json::from_slice::<serde_json::Value>(body) {
        truncate_long_strings(&mut parsed);
        eprintln!("{prefix} {label}:");
        let rendered = colored_json::to_colored_json_auto(&parsed)
            .ok()
            .or_else(|| serde_json::to_string_pretty(&parsed).ok());
        if let Some(rendered) = rendered {
            for line in rendered.lines() {
                eprintln!("{prefix} {line}");
            }
        }
    } else if let Ok(text) = std::str::from_utf8(body) {
        eprintln!("{prefix} {label}: {}", truncate(text, RAW_BODY_PREVIEW));
    } else {
        eprintln!("{prefix} {label}: <{} bytes of binary data>", body.len());
    }
}

/// Log an outgoing HTTP request: method, URL, caller headers and query params.
pub fn log_request(
    request_id: usize,
    method: &str,
    url: &str,
    headers: &[(&str, &str)],
    params: &[(&str, &str)],
    body: Option<&[u8]>,
) {
    let prefix = prefix(request_id);
    let direction = ">>>".green().bold();

    eprintln!("{prefix} {direction} {method} {url}");
    for (name, value) in headers {
        eprintln!(
            "{prefix} {}: {name}: {}",
            "Header".green(),
            display_header_value(name, value)
        );
    }
    if !params.is_empty() {
        let rendered: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        eprintln!("{prefix} {}: {}", "Params".green(), rendered.join("&"));
    }
    if let Some(body) = body {
        print_body(&prefix, &"Body".green().to_string(), body);
    }
}

/// Log the parts of an outgoing multipart body.
pub fn log_multipart_part(request_id: usize, name: &str, description: &str) {
    let prefix = prefix(request_id);
    eprintln!("{prefix} {}: {name} = {description}", "Part".green());
}

/// Log an incoming HTTP response status.
pub fn log_response_status(request_id: usize, status: u16) {
    let prefix = prefix(request_id);
    let direction = "<<<".red().bold();
    let status_text = if status < 300 {
        format!("{status} OK").green()
    } else {
        format!("{status} ERROR").red()
    };

    eprintln!("{prefix} {direction} {status_text}");
}

/// Log an incoming HTTP response body.
pub fn log_response_body(request_id: usize, body: &[u8]) {
    let prefix = prefix(request_id);
    print_body(&prefix, &"Response".red().to_string(), body);
}

/// Log a failed exchange.
pub fn log_error(request_id: usize, error: &dyn std::fmt::Display) {
    let prefix = prefix(request_id);
    eprintln!("{prefix} {} {error}", "<<< FAILED".red().bold());
}
