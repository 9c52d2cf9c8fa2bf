use std::sync::Arc;

use tracing::debug;

use crate::handler::{ArcHandler, Handler};
use crate::server::request::Request;
use crate::server::response::ResponseTracker;

use super::Middleware;

/// Request dumping middleware, for development use.
pub struct DebugMiddleware;

impl Middleware for DebugMiddleware {
    fn wrap(&self, next: ArcHandler) -> ArcHandler {
        Arc::new(DebugHandler { next })
    }
}

struct DebugHandler {
    next: ArcHandler,
}

impl Handler for DebugHandler {
    fn handle(&self, req: &Request, rw: &mut ResponseTracker<'_>) {
        debug!(
            method = %req.method,
            path = %req.path,
            headers = ?req.headers,
            body = ?req.body,
            "request dump"
        );
        self.next.handle(req, rw);
    }
}
