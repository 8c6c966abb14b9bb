// src/log.rs
use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DIRECTIVES: &str = "nextride_scrape=info,tower_http=info";

fn env_filter() -> EnvFilter {
    let Ok(raw) = std::env::var(EnvFilter::DEFAULT_ENV) else {
        return EnvFilter::new(DEFAULT_DIRECTIVES);
    };
    EnvFilter::try_new(&raw).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to '{DEFAULT_DIRECTIVES}' - {err}",
            EnvFilter::DEFAULT_ENV
        );
        EnvFilter::new(DEFAULT_DIRECTIVES)
    })
}

/// Install the global subscriber. Writes to `log_file` (append) when given and openable,
/// otherwise to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(log_file: Option<&Path>) {
    let file_layer = log_file.and_then(|path| {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            ),
            Err(e) => {
                eprintln!("cannot open log file {}: {e}", path.display());
                None
            }
        }
    });

    let stderr_layer = file_layer
        .is_none()
        .then(|| fmt::layer().with_writer(std::io::stderr));

    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .with(env_filter())
        .try_init();
}

/// Verbose subscriber scoped to the current thread, for tests.
pub fn init_test() -> tracing::dispatcher::DefaultGuard {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::new(LevelFilter::DEBUG.to_string()))
        .set_default()
}
