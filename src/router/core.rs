use std::sync::Arc;

use http::Method;
use tracing::{debug, info, warn};

use crate::handler::{ArcHandler, Handler};
use crate::middleware::Middleware;
use crate::server::request::Request;
use crate::server::response::{self, ResponseSink, ResponseTracker};

use super::pattern::CompiledPattern;

/// One registered route: method, compiled pattern, handler.
///
/// Created at build time and immutable afterwards; owned exclusively by the
/// router's route list.
pub struct RouteEntry {
    method: Method,
    pattern: String,
    compiled: CompiledPattern,
    handler: ArcHandler,
}

impl RouteEntry {
    fn new(method: Method, pattern: &str, handler: ArcHandler) -> Self {
        Self {
            method,
            pattern: pattern.to_string(),
            compiled: CompiledPattern::compile(pattern),
            handler,
        }
    }

    /// Test the entry against a request.
    ///
    /// The method comparison is exact: no case normalization and no
    /// HEAD-as-GET aliasing. The path must be covered entirely by the
    /// compiled rule. Captures come back in declaration order.
    #[must_use]
    pub fn matches(&self, method: &Method, path: &str) -> Option<Vec<(String, String)>> {
        if &self.method != method {
            return None;
        }
        self.compiled.matches(path)
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Default not-found fallback: fixed 404 JSON body.
struct NotFoundHandler;

impl Handler for NotFoundHandler {
    fn handle(&self, _req: &Request, rw: &mut ResponseTracker<'_>) {
        response::not_found(rw);
    }
}

/// Append-only construction phase of a [`Router`].
///
/// Routes and middleware are collected here and frozen by [`build`], so the
/// serving router is immutable and safe to share across request coroutines
/// without locking.
///
/// [`build`]: RouterBuilder::build
pub struct RouterBuilder {
    routes: Vec<RouteEntry>,
    middleware: Vec<Arc<dyn Middleware>>,
    not_found: ArcHandler,
}

impl RouterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            middleware: Vec::new(),
            not_found: Arc::new(NotFoundHandler),
        }
    }

    /// Register a route. Entries are tried in registration order and the
    /// first match wins, so more specific patterns must be registered before
    /// more general ones that could shadow them.
    ///
    /// # Panics
    ///
    /// Panics when the pattern does not compile (see
    /// [`CompiledPattern::compile`]).
    #[must_use]
    pub fn route(mut self, method: Method, pattern: &str, handler: ArcHandler) -> Self {
        self.routes.push(RouteEntry::new(method, pattern, handler));
        self
    }

    /// Register a middleware layer. The first-registered middleware becomes
    /// the outermost wrapper: it observes the request before, and the
    /// response after, every later-registered layer and the route handler.
    #[must_use]
    pub fn middleware(mut self, mw: Arc<dyn Middleware>) -> Self {
        self.middleware.push(mw);
        self
    }

    /// Replace the not-found fallback handler.
    #[must_use]
    pub fn not_found(mut self, handler: ArcHandler) -> Self {
        self.not_found = handler;
        self
    }

    /// Freeze the table and hand out the serving router.
    #[must_use]
    pub fn build(self) -> Router {
        let routes_summary: Vec<String> = self
            .routes
            .iter()
            .take(10)
            .map(|entry| format!("{} {}", entry.method, entry.pattern))
            .collect();

        info!(
            routes_count = self.routes.len(),
            middleware_count = self.middleware.len(),
            routes_summary = ?routes_summary,
            "Routing table frozen"
        );

        Router {
            routes: self.routes,
            middleware: self.middleware,
            not_found: self.not_found,
        }
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Frozen route table plus middleware chain.
///
/// Built once through [`RouterBuilder`], then shared read-only between all
/// in-flight requests.
pub struct Router {
    routes: Vec<RouteEntry>,
    middleware: Vec<Arc<dyn Middleware>>,
    not_found: ArcHandler,
}

impl Router {
    #[must_use]
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Serve one request against the table.
    ///
    /// Wraps `sink` in a [`ResponseTracker`], selects the first matching
    /// entry (or the not-found fallback), appends any captures to the
    /// request's parameters, composes the middleware onion, and invokes the
    /// result. Matching itself cannot fail; failures originate inside
    /// handlers or middleware.
    pub fn dispatch(&self, req: &mut Request, sink: &mut dyn ResponseSink) {
        let mut rw = ResponseTracker::new(sink);

        let mut handler = Arc::clone(&self.not_found);
        let mut matched = false;
        for entry in &self.routes {
            if let Some(captures) = entry.matches(&req.method, &req.path) {
                debug!(
                    method = %req.method,
                    path = %req.path,
                    route_pattern = %entry.pattern,
                    captures = ?captures,
                    "Route matched"
                );
                for (name, value) in captures {
                    req.params.append(name, value);
                }
                handler = Arc::clone(&entry.handler);
                matched = true;
                break;
            }
        }

        if !matched {
            warn!(method = %req.method, path = %req.path, "No route matched");
        }

        let mut composed = handler;
        for mw in self.middleware.iter().rev() {
            composed = mw.wrap(composed);
        }

        composed.handle(req, &mut rw);
    }

    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Print all registered routes to stdout.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for entry in &self.routes {
            println!("[route] {} {}", entry.method, entry.pattern);
        }
    }
}
