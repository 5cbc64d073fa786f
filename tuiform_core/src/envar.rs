//! Environment variables.

#![allow(non_snake_case)]

use std::sync::OnceLock;
use std::time::Duration;

/// Mutex locking timeout in seconds, by default is [`u64::MAX`].
///
/// NOTE: This constant can be configured through `TUIFORM_MUTEX_TIMEOUT_SECS` environment variable.
pub fn MUTEX_TIMEOUT_SECS() -> u64 {
  static VALUE: OnceLock<u64> = OnceLock::new();

  *VALUE.get_or_init(|| {
    std::env::var("TUIFORM_MUTEX_TIMEOUT_SECS")
      .map(|v| v.parse::<u64>().unwrap_or(u64::MAX))
      .unwrap_or(u64::MAX)
  })
}

/// Mutex locking timeout duration, by default is [`u64::MAX`] seconds.
pub fn MUTEX_TIMEOUT() -> Duration {
  Duration::from_secs(MUTEX_TIMEOUT_SECS())
}
