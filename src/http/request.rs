//! Request translation for the bridge.
//!
//! The bridge consumes only the method (as an integer code) and the URI
//! from an inbound request; headers and body are not forwarded.

use axum::http::{Method, Uri};

/// Integer code for an HTTP method, as carried in the request envelope.
///
/// Unrecognized methods map to 0; the worker decides what to do with them.
pub fn method_code(method: &Method) -> i64 {
    match method.as_str() {
        "GET" => 1,
        "HEAD" => 2,
        "POST" => 3,
        "PUT" => 4,
        "DELETE" => 5,
        "OPTIONS" => 6,
        "PATCH" => 7,
        _ => 0,
    }
}

/// URI string carried in the request envelope: path plus query.
pub fn bridge_uri(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}
