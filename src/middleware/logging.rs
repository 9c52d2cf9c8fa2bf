use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::handler::{ArcHandler, Handler};
use crate::server::request::Request;
use crate::server::response::ResponseTracker;

use super::Middleware;

/// Request logging middleware.
///
/// Emits a start line before delegating and a completion line with the final
/// status and elapsed time after, read back from the response tracker.
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn wrap(&self, next: ArcHandler) -> ArcHandler {
        Arc::new(LoggingHandler { next })
    }
}

struct LoggingHandler {
    next: ArcHandler,
}

impl Handler for LoggingHandler {
    fn handle(&self, req: &Request, rw: &mut ResponseTracker<'_>) {
        let start = Instant::now();
        info!(method = %req.method, path = %req.path, "request start");

        self.next.handle(req, rw);

        info!(
            method = %req.method,
            path = %req.path,
            status = rw.status().unwrap_or(0),
            duration_ms = start.elapsed().as_millis() as u64,
            "request complete"
        );
    }
}
