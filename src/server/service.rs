//! Transport glue: serves a frozen [`Router`] over `may_minihttp`.

use std::io;
use std::sync::Arc;

use may_minihttp::{HttpService, Request, Response};

use super::request::parse_request;
use super::response::BufferedResponse;
use crate::router::Router;

/// `HttpService` implementation dispatching every request through a router.
#[derive(Clone)]
pub struct RouterService {
    router: Arc<Router>,
}

impl RouterService {
    #[must_use]
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }
}

impl HttpService for RouterService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let mut request = parse_request(req);
        let mut buffered = BufferedResponse::new();
        self.router.dispatch(&mut request, &mut buffered);
        buffered.flush(res);
        Ok(())
    }
}
