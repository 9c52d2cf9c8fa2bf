//! Response sinks, the response tracker, and body encoders.
//!
//! Handlers write through [`ResponseTracker`], a decorator that records the
//! first status code sent so outer middleware can observe the outcome after
//! delegating. Encoding is best-effort: a payload that fails to serialize
//! produces an empty body rather than failing the request a second time.

use may_minihttp::Response;
use serde::Serialize;
use serde_json::json;

use crate::error::ValidationFailures;

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_CONTENT_LENGTH: &str = "Content-Length";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_MSGPACK: &str = "application/msgpack";
pub const ERROR_NOT_FOUND: &str = "not found";

/// Single-error response body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

/// Validation-failure response body: `{"errors": [...]}`.
#[derive(Debug, Serialize)]
pub struct ErrorsBody<'a> {
    pub errors: &'a ValidationFailures,
}

/// Raw output sink a response is written into.
pub trait ResponseSink {
    fn insert_header(&mut self, name: &str, value: &str);
    fn write_head(&mut self, status: u16);
    fn write(&mut self, body: &[u8]);
}

/// Decorator recording whether, and with what status, a response was written.
///
/// The status is recorded when headers are first sent and read-only
/// afterwards; later `write_head` calls still reach the sink but do not
/// change the tracked state.
pub struct ResponseTracker<'a> {
    sink: &'a mut dyn ResponseSink,
    status: Option<u16>,
}

impl<'a> ResponseTracker<'a> {
    #[must_use]
    pub fn new(sink: &'a mut dyn ResponseSink) -> Self {
        Self { sink, status: None }
    }

    /// Status code of the first header write, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Whether headers have been sent.
    #[must_use]
    pub fn written(&self) -> bool {
        self.status.is_some()
    }
}

impl ResponseSink for ResponseTracker<'_> {
    fn insert_header(&mut self, name: &str, value: &str) {
        self.sink.insert_header(name, value);
    }

    fn write_head(&mut self, status: u16) {
        if self.status.is_none() {
            self.status = Some(status);
        }
        self.sink.write_head(status);
    }

    fn write(&mut self, body: &[u8]) {
        self.sink.write(body);
    }
}

/// Owned response buffer.
///
/// Collects status, headers, and body during dispatch, then flushes into the
/// transport response in one go. Also serves as the inspectable sink in
/// tests.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<u16>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl BufferedResponse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Write the buffered response into the transport.
    pub fn flush(self, res: &mut Response) {
        let status = self.status.unwrap_or(200);
        res.status_code(usize::from(status), status_reason(status));
        for (name, value) in &self.headers {
            // The transport computes Content-Length from the body itself.
            if name.eq_ignore_ascii_case(HEADER_CONTENT_LENGTH) {
                continue;
            }
            res.header(header_line(name, value));
        }
        res.body_vec(self.body);
    }
}

impl ResponseSink for BufferedResponse {
    fn insert_header(&mut self, name: &str, value: &str) {
        self.headers
            .retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn write_head(&mut self, status: u16) {
        if self.status.is_none() {
            self.status = Some(status);
        }
    }

    fn write(&mut self, body: &[u8]) {
        self.body.extend_from_slice(body);
    }
}

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "OK",
    }
}

/// The transport borrows header lines for `'static`; intern the common ones
/// and leak the rest.
fn header_line(name: &str, value: &str) -> &'static str {
    match (name, value) {
        (HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON) => "Content-Type: application/json",
        (HEADER_CONTENT_TYPE, CONTENT_TYPE_MSGPACK) => "Content-Type: application/msgpack",
        (HEADER_CONTENT_TYPE, "text/plain") => "Content-Type: text/plain",
        _ => Box::leak(format!("{name}: {value}").into_boxed_str()),
    }
}

/// Serialize `payload` as JSON and write it with status `status`.
pub fn write_json<T: Serialize + ?Sized>(rw: &mut dyn ResponseSink, status: u16, payload: &T) {
    let buf = serde_json::to_vec(payload).unwrap_or_default();
    rw.insert_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);
    rw.insert_header(HEADER_CONTENT_LENGTH, &buf.len().to_string());
    rw.write_head(status);
    rw.write(&buf);
}

/// Serialize `payload` as MessagePack and write it with status `status`.
pub fn write_binary<T: Serialize + ?Sized>(rw: &mut dyn ResponseSink, status: u16, payload: &T) {
    let buf = rmp_serde::to_vec_named(payload).unwrap_or_default();
    rw.insert_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_MSGPACK);
    rw.insert_header(HEADER_CONTENT_LENGTH, &buf.len().to_string());
    rw.write_head(status);
    rw.write(&buf);
}

/// Fixed 404 body.
pub fn not_found(rw: &mut dyn ResponseSink) {
    write_json(
        rw,
        404,
        &ErrorBody {
            error: ERROR_NOT_FOUND,
        },
    );
}

/// Generic 500 body carrying the error description.
pub fn server_error(rw: &mut dyn ResponseSink, message: &str) {
    write_json(rw, 500, &ErrorBody { error: message });
}

/// Healthy 200 body, `{"status": "ok"}`.
pub fn ok(rw: &mut dyn ResponseSink) {
    write_json(rw, 200, &json!({ "status": "ok" }));
}
