//! HTTP transport layer: request parsing, response sinks and encoding, and
//! the `may_minihttp`-backed server.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use self::http_server::{resolve_addr, HttpServer, ServerHandle};
pub use self::request::{parse_query_params, parse_request, Request};
pub use self::response::{BufferedResponse, ResponseSink, ResponseTracker};
pub use self::service::RouterService;
