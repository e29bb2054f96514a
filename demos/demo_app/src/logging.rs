//! Logging setup for the demo.
//!
//! Logs go to stderr so they do not mix with handler output on stdout.
//! `RUST_LOG=msg_parser=trace` shows every framing step.

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber filtered by `RUST_LOG`, `info` by default.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
