//! Tracing initialization: one fmt layer (level, target, thread ids, span close events), written to stdout
//! and, when a log file is configured, appended to that file as well.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan, fmt::writer::MakeWriterExt, layer::SubscriberExt,
    util::SubscriberInitExt, EnvFilter, Registry,
};

/// Installs the global tracing subscriber.
///
/// Level comes from `RUST_LOG` (default `info`). Load `.env` before calling, otherwise `RUST_LOG` from the file is not seen.
/// When `log_file_path` is set its parent directory is created and the file is opened in append mode.
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let base = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    match log_file_path {
        Some(path) => {
            let file = Arc::new(open_log_file(path)?);
            let fmt_layer = base.with_writer(io::stdout.and(file));
            Registry::default()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        }
        None => Registry::default()
            .with(env_filter)
            .with(base.with_writer(io::stdout))
            .try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

fn open_log_file(path: &str) -> io::Result<std::fs::File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
