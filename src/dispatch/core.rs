use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::error::ServiceError;
use crate::handler::Handler;
use crate::params::Params;
use crate::server::request::Request;
use crate::server::response::{
    self, ErrorBody, ErrorsBody, ResponseTracker, CONTENT_TYPE_MSGPACK,
};
use crate::telemetry::{CrashReporter, MetricsSink};

/// Tri-state outcome of a service method.
///
/// `Ok(Some(payload))` is success, `Ok(None)` is absence (a 404, not an
/// error), and `Err` carries a classified failure. Exactly one outcome is
/// derivable per invocation: an error takes precedence over absence, which
/// takes precedence over a payload, and the type enforces it.
pub type ServiceResult<T> = Result<Option<T>, ServiceError>;

/// Turns a transport-agnostic service method into an instrumented endpoint.
///
/// The service method receives the request's parameters (query values plus
/// path captures) and returns a [`ServiceResult`]; the endpoint maps the
/// outcome to a status code and encoded body, and feeds the metrics and
/// crash-reporting collaborators:
///
/// - validation failure: 400, `{"errors": [...]}`
/// - timeout or unavailable: 503, `{"error": ...}`, `timeout` counter
/// - any other error: 500, `{"error": ...}`, crash report, `error` counter
/// - absence: 404, fixed body, `notfound` counter
/// - success: 200, payload encoded per the `Accept` header, `success`
///   counter and runtime measurement
pub struct Endpoint<F, T> {
    name: String,
    service: F,
    metrics: Arc<dyn MetricsSink>,
    reporter: Arc<dyn CrashReporter>,
    _payload: PhantomData<fn() -> T>,
}

impl<F, T> Endpoint<F, T>
where
    F: Fn(&Params) -> ServiceResult<T> + Send + Sync,
    T: Serialize + Send + Sync,
{
    #[must_use]
    pub fn new(
        name: &str,
        metrics: Arc<dyn MetricsSink>,
        reporter: Arc<dyn CrashReporter>,
        service: F,
    ) -> Self {
        Self {
            name: name.to_string(),
            service,
            metrics,
            reporter,
            _payload: PhantomData,
        }
    }

    fn counter(&self, outcome: &str) -> String {
        format!("service.{}.{outcome}", self.name)
    }
}

impl<F, T> Handler for Endpoint<F, T>
where
    F: Fn(&Params) -> ServiceResult<T> + Send + Sync,
    T: Serialize + Send + Sync,
{
    fn handle(&self, req: &Request, rw: &mut ResponseTracker<'_>) {
        let start = Instant::now();

        match (self.service)(&req.params) {
            Err(ServiceError::Validation(failures)) => {
                debug!(service = %self.name, failures = failures.len(), "validation failed");
                response::write_json(rw, 400, &ErrorsBody { errors: &failures });
            }
            Err(err @ (ServiceError::Timeout(_) | ServiceError::Unavailable(_))) => {
                self.metrics.count(&self.counter("timeout"));
                response::write_json(
                    rw,
                    503,
                    &ErrorBody {
                        error: &err.to_string(),
                    },
                );
            }
            Err(err) => {
                self.reporter.report(&err.to_string(), req);
                self.metrics.count(&self.counter("error"));
                response::server_error(rw, &err.to_string());
            }
            Ok(None) => {
                self.metrics.count(&self.counter("notfound"));
                response::not_found(rw);
            }
            Ok(Some(payload)) => {
                if wants_binary(req) {
                    response::write_binary(rw, 200, &payload);
                } else {
                    response::write_json(rw, 200, &payload);
                }
                self.metrics.count(&self.counter("success"));
                self.metrics
                    .measure_duration(&self.counter("runtime"), start.elapsed());
            }
        }
    }
}

fn wants_binary(req: &Request) -> bool {
    req.header("accept") == Some(CONTENT_TYPE_MSGPACK)
}
