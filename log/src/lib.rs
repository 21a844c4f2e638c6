use std::sync::Mutex;

use slog::Drain;
use slog::Fuse;
use slog_async::Async;
use slog_json::Json;

pub use slog::{debug, error, info, o, trace, warn, Discard, Logger};

/// Creates the root logger, which writes JSON lines to stderr.
pub fn initialize_logger() -> slog::Logger {
    let drain = Mutex::new(Json::default(std::io::stderr())).map(Fuse);
    let drain = Async::new(drain).build().fuse();

    Logger::root(
        drain,
        o!("version" => info::VERSION, "revision" => info::REVISION, "build_timestamp" => info::BUILD_TIMESTAMP),
    )
}

/// Creates a logger that drops everything. Useful in tests.
pub fn discard_logger() -> slog::Logger {
    Logger::root(Discard, o!())
}

/// Routes records from the `log` facade (used by warp and hyper)
/// through `slog-envlogger`, filtered by `RUST_LOG`. The returned
/// guard must be kept alive for as long as logging is needed.
#[cfg(feature = "env_logging")]
pub fn initialize_env_logging() -> slog_scope::GlobalLoggerGuard {
    slog_envlogger::init().expect("initialize slog-envlogger")
}
