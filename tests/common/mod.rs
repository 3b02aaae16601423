//! Common test utilities shared across integration test files.
//!
//! Usage in test files:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

use dialogflow::Client;
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use wiremock::{MockServer, Request};

/// Access token used by every mock-backed client.
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-developer-token";

/// Default timeout for mock-backed tests.
#[allow(dead_code)]
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds a client pointed at the mock server's `/v1` prefix.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> Client {
    Client::builder(TEST_TOKEN)
        .base_url(format!("{}/v1", server.uri()))
        .timeout(TEST_TIMEOUT)
        .build()
        .expect("client should build")
}

/// Wraps a future with a timeout, panicking if the timeout is exceeded.
#[allow(dead_code)]
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(duration, future)
        .await
        .unwrap_or_else(|_| panic!("Test timed out after {:?}", duration))
}

/// Returns the single request the mock server received.
#[allow(dead_code)]
pub async fn single_request(server: &MockServer) -> Request {
    let mut requests = server
        .received_requests()
        .await
        .expect("request recording should be enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

/// Values of a query parameter, in order of appearance.
#[allow(dead_code)]
pub fn query_values(request: &Request, key: &str) -> Vec<String> {
    request
        .url
        .query_pairs()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}

/// Splits a multipart/form-data body into `name -> (filename, content)`.
#[allow(dead_code)]
pub fn parse_multipart(request: &Request) -> BTreeMap<String, (Option<String>, Vec<u8>)> {
    let content_type = request
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .expect("multipart request should have a content type")
        .to_string();
    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .expect("content type should carry a boundary")
        .trim_matches('"')
        .to_string();
    let body = String::from_utf8_lossy(&request.body).into_owned();

    let mut parts = BTreeMap::new();
    for chunk in body.split(&format!("--{boundary}")) {
        let Some((head, content)) = chunk.split_once("\r\n\r\n") else {
            continue;
        };
        let attr = |key: &str| {
            let prefix = format!("{key}=\"");
            head.split(';')
                .map(str::trim)
                .find_map(|p| p.strip_prefix(prefix.as_str()))
                .and_then(|p| p.split('"').next())
                .map(String::from)
        };
        let name = attr("name").expect("part should be named");
        let content = content.strip_suffix("\r\n").unwrap_or(content);
        parts.insert(name, (attr("filename"), content.as_bytes().to_vec()));
    }
    parts
}
