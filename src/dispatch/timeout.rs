use std::time::Duration;

use may::coroutine;
use may::go;
use may::sync::mpsc;

use crate::error::ServiceError;

use super::core::ServiceResult;

/// Run `f` on its own coroutine, racing completion against a deadline.
///
/// Whichever side finishes first wins: the caller gets either `f`'s result
/// or `Err(ServiceError::Timeout(duration))` promptly at the deadline. The
/// losing unit of work is not cancelled; it keeps running to completion and
/// its eventual result is discarded. Under sustained timeouts that abandoned
/// work accumulates, so callers that cannot tolerate it should make `f`
/// itself deadline-aware.
pub fn with_deadline<T, F>(duration: Duration, f: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let timer_tx = tx.clone();

    go!(move || {
        let _ = tx.send(Some(f()));
    });
    go!(move || {
        coroutine::sleep(duration);
        let _ = timer_tx.send(None);
    });

    match rx.recv() {
        Ok(Some(result)) => result,
        _ => Err(ServiceError::Timeout(duration)),
    }
}
