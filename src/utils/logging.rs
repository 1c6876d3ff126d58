use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_appender::non_blocking::WorkerGuard;
use anyhow::Result;
use crate::config::LoggingSettings;

/// Initializes the logging system for the application
///
/// Console output is always enabled; a daily rolling file `iqx-db_{current_date}.log` is added
/// when `settings.path` is set. The level comes from `RUST_LOG`, falling back to the configured
/// level, and `tower_http` tracing is kept at "warn" unless requested explicitly.
///
/// Returns the file appender's `WorkerGuard` when one was installed; keep it alive for the
/// lifetime of the process so buffered lines are flushed.
pub fn init_logger(settings: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{},tower_http=warn", settings.level)))?;

    let format = fmt::format()
        .with_timer(fmt::time::LocalTime::rfc_3339())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if let Some(path) = &settings.path {
        std::fs::create_dir_all(path)?;

        let file_name = format!(
            "iqx-db_{}.log",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let file_appender = RollingFileAppender::new(Rotation::NEVER, path, file_name);

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = fmt::Layer::default()
            .event_format(format.clone())
            .with_writer(non_blocking);

        let console_layer = fmt::Layer::default()
            .event_format(format.with_ansi(true))
            .with_writer(std::io::stdout);

        let subscriber = subscriber.with(file_layer).with(console_layer);

        tracing::subscriber::set_global_default(subscriber)?;

        tracing::info!("Logging initialized successfully");
        Ok(Some(guard))
    } else {
        let console_layer = fmt::Layer::default()
            .event_format(format.with_ansi(true))
            .with_writer(std::io::stdout);

        let subscriber = subscriber.with(console_layer);
        tracing::subscriber::set_global_default(subscriber)?;

        tracing::info!("Logging initialized successfully (console only)");
        Ok(None)
    }
}
