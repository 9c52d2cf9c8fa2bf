use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::error;

use crate::handler::{ArcHandler, Handler};
use crate::server::request::Request;
use crate::server::response::{self, ResponseTracker};
use crate::telemetry::CrashReporter;

use super::Middleware;

/// Panic recovery middleware.
///
/// Belongs at the outermost layer: catches any fault escaping the inner
/// chain, reports it to the crash collaborator, and answers with a 500 if
/// nothing has been written yet. A single request's fault must never take
/// the process down.
pub struct RecoveryMiddleware {
    reporter: Arc<dyn CrashReporter>,
}

impl RecoveryMiddleware {
    #[must_use]
    pub fn new(reporter: Arc<dyn CrashReporter>) -> Self {
        Self { reporter }
    }
}

impl Middleware for RecoveryMiddleware {
    fn wrap(&self, next: ArcHandler) -> ArcHandler {
        Arc::new(RecoveryHandler {
            next,
            reporter: Arc::clone(&self.reporter),
        })
    }
}

struct RecoveryHandler {
    next: ArcHandler,
    reporter: Arc<dyn CrashReporter>,
}

impl Handler for RecoveryHandler {
    fn handle(&self, req: &Request, rw: &mut ResponseTracker<'_>) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.next.handle(req, rw)));

        if let Err(payload) = outcome {
            let reason = if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "handler panicked".to_string()
            };

            error!(
                method = %req.method,
                path = %req.path,
                reason = %reason,
                "Handler panicked"
            );
            self.reporter.report(&reason, req);

            if !rw.written() {
                response::server_error(rw, &reason);
            }
        }
    }
}
