//! # Router Module
//!
//! Path matching and route resolution. Route patterns are compiled into
//! match rules once, at registration time; each incoming request is tested
//! against the table in registration order and the first matching entry
//! wins.
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: at build time, patterns like `/people/:id` or
//!    `/files/**` are converted into whole-path match rules with ordered
//!    capture names.
//! 2. **Matching**: per request, the table is scanned linearly; the first
//!    entry whose method and rule both match is selected, and its captures
//!    are appended to the request's parameters.
//!
//! Registration order is part of the routing contract: more specific
//! patterns must be registered before more general ones that could shadow
//! them. The table is frozen by [`RouterBuilder::build`] before serving
//! begins, so no synchronization is needed on the request path.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use http::Method;
//! use switchboard::router::Router;
//!
//! let router = Router::builder()
//!     .route(Method::GET, "/people/:id", Arc::new(get_person))
//!     .middleware(Arc::new(LoggingMiddleware))
//!     .build();
//! ```

mod core;
mod pattern;

pub use self::core::{RouteEntry, Router, RouterBuilder};
pub use self::pattern::CompiledPattern;
