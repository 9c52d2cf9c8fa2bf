//! Parsed HTTP request data.

use std::collections::HashMap;
use std::io::Read;

use http::Method;
use serde_json::Value;
use tracing::debug;

use crate::params::Params;

/// Extracted request information handed to handlers.
///
/// `params` starts as the parsed query string; the router appends path
/// captures to it before the handler chain runs, so both remain retrievable
/// and [`Params::get`] keeps returning the first-appended value.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path without the query string
    pub path: String,
    /// Query parameters, later augmented with path captures
    pub params: Params,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Request body parsed as JSON (if content-type is application/json)
    pub body: Option<Value>,
}

impl Request {
    /// Bare request, mostly useful in tests and examples.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            params: Params::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Extract method, path, query parameters, headers, and body from a raw
/// transport request.
pub fn parse_request(req: may_minihttp::Request) -> Request {
    let method = req.method().parse::<Method>().unwrap_or(Method::GET);
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let params = parse_query_params(&raw_path);

    let body = {
        let mut body_str = String::new();
        match req.body().read_to_string(&mut body_str) {
            Ok(size) if size > 0 => {
                let is_json = headers
                    .get("content-type")
                    .is_some_and(|ct| ct.starts_with("application/json"));
                if is_json {
                    serde_json::from_str(&body_str).ok()
                } else {
                    None
                }
            }
            _ => None,
        }
    };

    debug!(
        method = %method,
        path = %path,
        param_count = params.len(),
        header_count = headers.len(),
        has_body = body.is_some(),
        "Request parsed"
    );

    Request {
        method,
        path,
        params,
        headers,
        body,
    }
}

/// Parse and URL-decode the query string portion of `path`, preserving
/// value order for duplicate keys.
#[must_use]
pub fn parse_query_params(path: &str) -> Params {
    match path.find('?') {
        Some(pos) => url::form_urlencoded::parse(path[pos + 1..].as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        None => Params::new(),
    }
}
