//! End-to-end tests: a real server bound to a local port, driven over raw
//! TCP.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use http::Method;
use serde_json::json;
use switchboard::dispatch::{with_deadline, Endpoint};
use switchboard::middleware::{LoggingMiddleware, RecoveryMiddleware};
use switchboard::router::Router;
use switchboard::server::{HttpServer, RouterService};
use switchboard::telemetry::{InMemoryMetrics, LogReporter};

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

fn parse_content_length(head: &[u8]) -> Option<usize> {
    let head = String::from_utf8_lossy(head);
    head.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

fn http_get(addr: SocketAddr, path: &str, accept: Option<&str>) -> (u16, Vec<u8>) {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("read timeout");

    let mut request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n");
    if let Some(accept) = accept {
        request.push_str(&format!("Accept: {accept}\r\n"));
    }
    request.push_str("Connection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).expect("write request");

    let mut raw = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        if let Some(header_end) = find_header_end(&raw) {
            if let Some(length) = parse_content_length(&raw[..header_end]) {
                if raw.len() >= header_end + length {
                    break;
                }
            }
        }
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => raw.extend_from_slice(&chunk[..n]),
            Err(_) => break,
        }
    }

    let header_end = find_header_end(&raw).expect("complete response head");
    let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
    let status: u16 = head
        .split_whitespace()
        .nth(1)
        .expect("status line")
        .parse()
        .expect("numeric status");
    let length = parse_content_length(&raw[..header_end]).unwrap_or(raw.len() - header_end);
    let body = raw[header_end..header_end + length.min(raw.len() - header_end)].to_vec();
    (status, body)
}

fn body_json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).expect("body is JSON")
}

#[test]
fn served_router_answers_over_tcp() {
    switchboard::telemetry::init_tracing();
    let metrics = Arc::new(InMemoryMetrics::new());
    let reporter = Arc::new(LogReporter);

    let get_person = Endpoint::new(
        "get_person",
        metrics.clone(),
        reporter.clone(),
        |params: &switchboard::Params| {
            Ok(Some(json!({
                "id": params.int64("id"),
                "name": params.get("name").unwrap_or("unknown"),
            })))
        },
    );

    let get_slow = Endpoint::new(
        "get_slow",
        metrics.clone(),
        reporter.clone(),
        |_params: &switchboard::Params| {
            with_deadline(Duration::from_millis(50), || {
                may::coroutine::sleep(Duration::from_millis(500));
                Ok(Some(json!({ "done": true })))
            })
        },
    );

    let router = Router::builder()
        .middleware(Arc::new(RecoveryMiddleware::new(reporter.clone())))
        .middleware(Arc::new(LoggingMiddleware))
        .route(Method::GET, "/people/:id", Arc::new(get_person))
        .route(Method::GET, "/slow", Arc::new(get_slow))
        .build();

    let service = RouterService::new(Arc::new(router));
    let handle = HttpServer(service)
        .start("127.0.0.1:18471")
        .expect("bind test port");
    handle.wait_ready().expect("server ready");
    let addr = handle.addr();

    let (status, body) = http_get(addr, "/people/42?name=Jo", None);
    assert_eq!(status, 200);
    assert_eq!(body_json(&body), json!({ "id": 42, "name": "Jo" }));

    let (status, body) = http_get(addr, "/missing", None);
    assert_eq!(status, 404);
    assert_eq!(body_json(&body), json!({ "error": "not found" }));

    let (status, body) = http_get(addr, "/slow", None);
    assert_eq!(status, 503);
    assert_eq!(
        body_json(&body),
        json!({ "error": "timed out after 50ms" })
    );

    assert_eq!(metrics.counter("service.get_person.success"), 1);
    assert_eq!(metrics.counter("service.get_slow.timeout"), 1);

    handle.stop();
}

#[test]
fn served_router_negotiates_msgpack() {
    switchboard::telemetry::init_tracing();
    let metrics = Arc::new(InMemoryMetrics::new());
    let reporter = Arc::new(LogReporter);

    let get_pixel = Endpoint::new(
        "get_pixel",
        metrics,
        reporter,
        |_params: &switchboard::Params| Ok(Some(json!({ "x": 3, "y": 9 }))),
    );

    let router = Router::builder()
        .route(Method::GET, "/pixel", Arc::new(get_pixel))
        .build();

    let service = RouterService::new(Arc::new(router));
    let handle = HttpServer(service)
        .start("127.0.0.1:18472")
        .expect("bind test port");
    handle.wait_ready().expect("server ready");
    let addr = handle.addr();

    let (status, body) = http_get(addr, "/pixel", Some("application/msgpack"));
    assert_eq!(status, 200);
    let decoded: serde_json::Value = rmp_serde::from_slice(&body).expect("msgpack body");
    assert_eq!(decoded, json!({ "x": 3, "y": 9 }));

    let (status, body) = http_get(addr, "/pixel", None);
    assert_eq!(status, 200);
    assert_eq!(body_json(&body), json!({ "x": 3, "y": 9 }));

    handle.stop();
}
