//! Logging utils.

use tracing_appender::non_blocking::WorkerGuard;

/// Initialize file logging, always use file logging.
///
/// It uses `TUIFORM_LOG` environment variable to control the logging level.
/// Defaults to `error`.
///
/// Returns the appender worker guard, logs are lost once it is dropped.
pub fn init() -> WorkerGuard {
  let appender = tracing_appender::rolling::never(".", "tuiform.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);

  let subscriber = tracing_subscriber::FmtSubscriber::builder()
    .with_env_filter(tracing_subscriber::EnvFilter::from_env("TUIFORM_LOG"))
    .with_writer(writer)
    .with_ansi(false)
    .finish();
  tracing::subscriber::set_global_default(subscriber).unwrap();

  guard
}
