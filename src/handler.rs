//! The single `handle` capability shared by routes and middleware.

use std::sync::Arc;

use crate::server::request::Request;
use crate::server::response::ResponseTracker;

/// Anything that can answer a request by writing to the tracked sink.
///
/// Route handlers, middleware layers, and the not-found fallback all conform
/// to this one interface, which is what makes onion composition uniform: a
/// middleware takes a `Handler` and returns a `Handler`.
pub trait Handler: Send + Sync {
    fn handle(&self, req: &Request, rw: &mut ResponseTracker<'_>);
}

/// Adapter turning a plain function or closure into a [`Handler`].
pub struct HandlerFn<F>(pub F);

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&Request, &mut ResponseTracker<'_>) + Send + Sync,
{
    fn handle(&self, req: &Request, rw: &mut ResponseTracker<'_>) {
        (self.0)(req, rw)
    }
}

/// Shared, dynamically dispatched handler reference.
pub type ArcHandler = Arc<dyn Handler>;
