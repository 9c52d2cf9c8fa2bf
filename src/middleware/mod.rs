//! Pluggable middleware layers.
//!
//! A middleware transforms a handler into a wrapped handler
//! ([`Middleware::wrap`]); the router composes all registered layers so the
//! first-registered one sits outermost. Stock layers: request logging, panic
//! recovery, and request dumping.

mod core;
mod debug;
mod logging;
mod recovery;

pub use self::core::Middleware;
pub use self::debug::DebugMiddleware;
pub use self::logging::LoggingMiddleware;
pub use self::recovery::RecoveryMiddleware;
