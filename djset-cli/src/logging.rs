//! Structured logging for the `djset` binary.
//!
//! Installs a global `tracing` subscriber writing to stderr, in human or JSON
//! form, and routes `log` records through it.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::{LogTracer, log_tracer::SetLoggerError};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::format::FmtSpan,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Environment variable selecting the output format (`human` or `json`).
pub const LOG_FORMAT_ENV: &str = "DJSET_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Output format of the stderr log stream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Multi-line human-readable output.
    #[default]
    Human,
    /// One JSON object per line, including the active span list.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `DJSET_LOG_FORMAT` held invalid UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// `DJSET_LOG_FORMAT` named an unknown format.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Normalised value supplied by the user.
        provided: String,
    },
    /// Another `log` logger already owns the global slot.
    #[error("failed to install log bridge: {source}")]
    LogBridgeFailed {
        /// Error raised by `tracing_log`.
        #[source]
        source: SetLoggerError,
    },
    /// Another global tracing subscriber is already installed.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: TryInitError,
    },
}

/// Installs the global subscriber once; later calls are no-ops.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. If another
/// subscriber already owns the global slot it is left in place and the
/// conflict is reported on stderr.
///
/// # Errors
/// Returns [`LoggingError`] when `DJSET_LOG_FORMAT` is not valid UTF-8 or
/// names an unsupported format.
pub fn init_logging() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    let format = format_from_env()?;
    match install(format) {
        Ok(()) => {}
        Err(err @ (LoggingError::InstallFailed { .. } | LoggingError::LogBridgeFailed { .. })) => {
            report_install_conflict(&err);
        }
        Err(err) => return Err(err),
    }
    INSTALLED.get_or_init(|| ());
    Ok(())
}

#[expect(
    clippy::print_stderr,
    reason = "No subscriber is available to carry this diagnostic"
)]
fn report_install_conflict(err: &LoggingError) {
    eprintln!("structured logging already configured elsewhere: {err}");
}

fn format_from_env() -> Result<LogFormat, LoggingError> {
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => raw.parse(),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(source) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
            source,
        }),
    }
}

fn install(format: LogFormat) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let fmt_layer = match format {
        LogFormat::Human => fmt_layer.boxed(),
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    let bridge = LogTracer::init().map_err(|source| LoggingError::LogBridgeFailed { source });
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })?;
    bridge
}
