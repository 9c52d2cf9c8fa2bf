use crate::handler::ArcHandler;

/// A handler-transforming layer.
///
/// Each middleware takes the next handler in the chain and returns a wrapped
/// handler that runs its own logic before and/or after delegating. Layers
/// registered on the router compose into an onion: the first-registered
/// middleware is the outermost wrapper, so its pre-logic runs before every
/// inner layer and its post-logic after them.
pub trait Middleware: Send + Sync {
    fn wrap(&self, next: ArcHandler) -> ArcHandler;
}
