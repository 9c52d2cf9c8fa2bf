//! # Dispatch Module
//!
//! Converts service-method outcomes into HTTP responses.
//!
//! A service method is a plain function from extracted parameters to a
//! [`ServiceResult`]: success carries a serializable payload, absence is
//! `Ok(None)`, and failures are classified [`crate::ServiceError`] values.
//! [`Endpoint`] adapts such a method into a [`crate::Handler`], choosing the
//! status code and body encoding and driving the metrics and crash-reporting
//! collaborators.
//!
//! [`with_deadline`] bounds a unit of service logic in time by racing it
//! against a deadline on the coroutine runtime.
//!
//! ## Example
//!
//! ```rust,ignore
//! let endpoint = Endpoint::new("get_person", metrics, reporter, |params| {
//!     let id = params.int64("id");
//!     with_deadline(Duration::from_millis(100), move || lookup_person(id))
//! });
//! ```

mod core;
mod timeout;

pub use self::core::{Endpoint, ServiceResult};
pub use self::timeout::with_deadline;
