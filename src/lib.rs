//! # Switchboard
//!
//! **Switchboard** is a small, coroutine-powered HTTP request-dispatch layer
//! for Rust: it matches incoming requests to registered handlers by method
//! and path pattern, wraps handler invocation in a composable middleware
//! chain, and encodes success and error outcomes uniformly.
//!
//! ## Architecture
//!
//! - **[`router`]** - pattern compilation and first-match-wins route
//!   resolution over an ordered, frozen table
//! - **[`middleware`]** - handler-wrapping layers (logging, panic recovery,
//!   request dumping) composed in onion order
//! - **[`dispatch`]** - the service-method adapter mapping tri-state
//!   outcomes to responses, plus deadline-bounded execution
//! - **[`server`]** - request parsing, response tracking and encoding, and
//!   the `may_minihttp`-backed HTTP server
//! - **[`params`]** - typed access to query parameters and path captures
//! - **[`validator`]** - statically declared field validation
//! - **[`telemetry`]** - injected metrics and crash-reporting collaborators
//! - **[`runtime_config`]** - environment knobs for the coroutine runtime
//!
//! ## Request Flow
//!
//! 1. The server parses the raw request and wraps the output sink in a
//!    response tracker.
//! 2. The router scans its table in registration order; the first entry
//!    whose method and compiled pattern both match wins, and its captures
//!    are appended to the request parameters.
//! 3. The selected handler (or the not-found fallback) is wrapped by every
//!    registered middleware, first-registered outermost.
//! 4. Service endpoints produce a tri-state outcome - payload, absence, or
//!    classified error - which the dispatch adapter encodes with the right
//!    status code, counters, and crash reports.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use http::Method;
//! use switchboard::dispatch::Endpoint;
//! use switchboard::middleware::{LoggingMiddleware, RecoveryMiddleware};
//! use switchboard::router::Router;
//! use switchboard::server::{HttpServer, RouterService};
//! use switchboard::telemetry::{InMemoryMetrics, LogReporter};
//!
//! let metrics = Arc::new(InMemoryMetrics::new());
//! let reporter = Arc::new(LogReporter);
//!
//! let router = Router::builder()
//!     .middleware(Arc::new(RecoveryMiddleware::new(reporter.clone())))
//!     .middleware(Arc::new(LoggingMiddleware))
//!     .route(
//!         Method::GET,
//!         "/people/:id",
//!         Arc::new(Endpoint::new("get_person", metrics, reporter, |params| {
//!             Ok(Some(serde_json::json!({ "id": params.int64("id") })))
//!         })),
//!     )
//!     .build();
//!
//! let service = RouterService::new(Arc::new(router));
//! HttpServer(service).start("0.0.0.0:8080")?.join().unwrap();
//! ```

pub mod dispatch;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod params;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod telemetry;
pub mod validator;

pub use dispatch::{with_deadline, Endpoint, ServiceResult};
pub use error::{ServiceError, ValidationError, ValidationFailures};
pub use handler::{ArcHandler, Handler, HandlerFn};
pub use params::Params;
pub use router::{Router, RouterBuilder};
pub use server::{HttpServer, RouterService};
