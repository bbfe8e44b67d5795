use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use facade_core::Request;
use pingora::http::RequestHeader;
use uuid::Uuid;

/// Normalizes a pingora request header into the canonical [`Request`]:
/// uppercases the method, preserves the full path including query string,
/// lower-cases header names (a no-op in practice — `http::HeaderName` is
/// already case-insensitive and stored lower-case), joins repeated headers
/// with `, `, and stamps a fresh request id and RFC3339-nanos timestamp.
pub fn adapt(header: &RequestHeader, body: Vec<u8>) -> Request {
    let method = header.method.as_str().to_uppercase();

    let path = header
        .uri
        .path_and_query()
        .map(|path_and_query| path_and_query.as_str().to_string())
        .unwrap_or_else(|| header.uri.path().to_string());

    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for name in header.headers.keys() {
        let joined = header
            .headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(", ");
        headers.insert(name.as_str().to_lowercase(), joined);
    }

    let body = String::from_utf8_lossy(&body).into_owned();

    Request {
        method,
        path,
        headers,
        body,
        request_id: Uuid::new_v4().to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
    }
}
