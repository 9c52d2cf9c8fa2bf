//! HTTP server lifecycle helpers.

use std::env;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;

use may::coroutine::JoinHandle;
use may_minihttp::{HttpServer as MiniHttpServer, HttpService};
use tracing::info;

/// Wrapper around `may_minihttp`'s HTTP server.
pub struct HttpServer<T>(pub T);

/// Handle to a running HTTP server.
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    /// Wait for the server to accept connections.
    ///
    /// Polls the bound address until a TCP connection succeeds. Useful in
    /// tests to avoid racing the listener startup.
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` when the server is not reachable within ~250ms.
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..50 {
            if TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop the server and wait for its coroutine to finish.
    pub fn stop(self) {
        // SAFETY: cancelling the server coroutine during shutdown is the
        // intended use of the handle we hold.
        unsafe {
            self.handle.coroutine().cancel();
        }
        let _ = self.handle.join();
    }

    /// Block until the server coroutine completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the server coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}

impl<T: HttpService + Clone + Send + Sync + 'static> HttpServer<T> {
    /// Start the server on the given address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or the port cannot be
    /// bound.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid address"))?;
        info!(addr = %addr, "starting server");
        let handle = MiniHttpServer(self.0).start(addr)?;
        Ok(ServerHandle { addr, handle })
    }
}

/// Resolve the listen address: an explicit value wins, then `LISTEN`, then
/// `0.0.0.0:$PORT` with port 8080 as the final default.
#[must_use]
pub fn resolve_addr(addr: Option<&str>) -> String {
    if let Some(addr) = addr {
        if !addr.is_empty() {
            return addr.to_string();
        }
    }
    if let Ok(listen) = env::var("LISTEN") {
        if !listen.is_empty() {
            return listen;
        }
    }
    let port = env::var("PORT").unwrap_or_default();
    let port = if port.is_empty() {
        "8080".to_string()
    } else {
        port
    };
    format!("0.0.0.0:{port}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_addr_wins() {
        assert_eq!(resolve_addr(Some("127.0.0.1:3000")), "127.0.0.1:3000");
        // an empty explicit value falls through to the environment defaults
        assert_eq!(resolve_addr(Some("")), resolve_addr(None));
    }
}
