// Logging
// -------
// Global tracing subscriber for the binary. Progress bars and log lines
// share stderr through the `tracing-indicatif` layer.

use std::io::IsTerminal;
use std::str::FromStr;

use tracing_indicatif::style::ProgressStyle;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use super::LogArgs;

/// Installs the global tracing subscriber.
///
/// On a terminal, logs are compact and share stderr with the upload
/// progress bar. Anywhere else (a CI runner) they are emitted as JSON.
pub fn init_global_subscriber(args: &LogArgs) {
    let log_level = get_log_level(args);

    let env_filter = EnvFilter::from_default_env().add_directive(log_level.into());

    let progress_layer = IndicatifLayer::new().with_progress_style(
        ProgressStyle::with_template("{spinner:.green} {wide_msg}")
            .unwrap_or(ProgressStyle::default_spinner()),
    );

    let fmt = if std::io::stderr().is_terminal() {
        fmt::layer()
            .without_time()
            .with_writer(progress_layer.get_stderr_writer())
            .with_target(false)
            .compact()
            .boxed()
    } else {
        fmt::layer()
            .with_ansi(false)
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt)
        .with(env_filter)
        .with(progress_layer)
        .init();
}

fn get_log_level(args: &LogArgs) -> LevelFilter {
    match args.quiet {
        0 => (),
        1 => return LevelFilter::WARN,
        _ => return LevelFilter::ERROR,
    }

    if let Some(level) = args.level.as_deref().filter(|l| !l.is_empty()) {
        if let Ok(level) = LevelFilter::from_str(level) {
            return level;
        }
    }

    if let Ok(rust_log) = std::env::var(EnvFilter::DEFAULT_ENV) {
        if let Ok(level) = LevelFilter::from_str(&rust_log) {
            return level;
        }
    }

    match args.verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
