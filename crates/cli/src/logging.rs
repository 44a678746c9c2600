// SPDX-License-Identifier: MIT

//! Structured logging setup (SPEC_FULL §B.2): a per-run `log.txt` file
//! inside the workdir, in addition to a stderr layer, following the
//! teacher's `tracing-appender`-based daemon logging.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Must be kept alive for the lifetime of the process; dropping it stops
/// the non-blocking writer from flushing.
pub struct LoggingGuard(#[allow(dead_code)] tracing_appender::non_blocking::WorkerGuard);

pub fn init(log_path: &std::path::Path, debug: bool) -> std::io::Result<LoggingGuard> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let dir = log_path.parent().unwrap_or_else(|| std::path::Path::new("."));
    let file_name = log_path.file_name().unwrap_or_else(|| std::ffi::OsStr::new("log.txt"));
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(true))
        .init();

    Ok(LoggingGuard(guard))
}
