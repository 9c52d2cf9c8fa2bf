//! Environment-driven runtime configuration.
//!
//! Two knobs, both optional:
//!
//! - `SWITCHBOARD_STACK_SIZE`: coroutine stack size in bytes, decimal or
//!   `0x` hexadecimal. Default 64 KB. Total memory is
//!   `stack_size x concurrent coroutines`, so tune it to handler depth.
//! - `SWITCHBOARD_DEADLINE_MS`: default service deadline in milliseconds
//!   for callers that bound handler execution. Default 30000.

use std::env;
use std::time::Duration;

/// Resolved runtime knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub stack_size: usize,
    pub default_deadline: Duration,
}

impl RuntimeConfig {
    /// Load configuration from the environment, falling back to defaults
    /// for unset or unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        let stack_size = env::var("SWITCHBOARD_STACK_SIZE")
            .ok()
            .and_then(|v| parse_stack_size(&v))
            .unwrap_or(0x10000);

        let default_deadline = env::var("SWITCHBOARD_DEADLINE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(30_000));

        Self {
            stack_size,
            default_deadline,
        }
    }

    /// Apply the stack size to the coroutine runtime.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}

fn parse_stack_size(value: &str) -> Option<usize> {
    if let Some(hex) = value.strip_prefix("0x") {
        usize::from_str_radix(hex, 16).ok()
    } else {
        value.parse().ok()
    }
}
