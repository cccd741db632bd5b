//! Tracing output for request-check diagnostics.
//!
//! Every rejected check emits one `debug` event under [`REQUEST_TARGET`]
//! carrying `request_type`, `key` and `status`; lenient sessions emit one more
//! when [`Request::non_fatal`](crate::Request::non_fatal) swallows a failure.
//! Embedders either route that target through their own subscriber or call
//! [`initialise`] once at startup.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::fmt::{self, MakeWriter};

use studio_config::{Config, LogFormat};

/// Tracing target of request-check events.
pub const REQUEST_TARGET: &str = "studio_request::request";

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Marker returned once the global subscriber is in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured log filter expression did not parse.
    #[error("invalid log filter '{filter}': {source}")]
    Filter {
        /// Filter text that was rejected.
        filter: String,
        /// Parser failure.
        #[source]
        source: ParseError,
    },
    /// Another global subscriber was installed first.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(#[source] SetGlobalDefaultError),
}

/// Builds the event filter for `config`.
///
/// When `log_request_checks` is set, request-check events are enabled at
/// `debug` whatever `log_filter` says about other targets.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] if `log_filter` does not parse.
pub fn request_filter(config: &Config) -> Result<EnvFilter, TelemetryError> {
    let base = parse_filter(config.log_filter())?;
    if !config.log_request_checks {
        return Ok(base);
    }

    let directive = format!("{REQUEST_TARGET}=debug");
    let request_directive: Directive = directive.parse().map_err(|source| TelemetryError::Filter {
        filter: directive.clone(),
        source,
    })?;
    Ok(base.add_directive(request_directive))
}

/// Installs the global subscriber on first use, writing to stderr.
///
/// Later calls leave the installed subscriber alone and return a fresh
/// [`TelemetryHandle`].
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] if the configured filter does not parse
/// and [`TelemetryError::Subscriber`] if another subscriber is already
/// installed globally.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED
        .get_or_try_init(|| {
            let ansi = io::stderr().is_terminal() && !config.log_format().is_structured();
            let subscriber = build_subscriber(config, io::stderr, ansi)?;
            tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
        })
        .map(|_| TelemetryHandle)
}

/// Builds a subscriber for `config` that writes to `writer`.
pub(crate) fn build_subscriber<W>(
    config: &Config,
    writer: W,
    ansi: bool,
) -> Result<Box<dyn Subscriber + Send + Sync>, TelemetryError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let builder = fmt::Subscriber::builder()
        .with_env_filter(request_filter(config)?)
        .with_target(true)
        .with_level(true)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let subscriber: Box<dyn Subscriber + Send + Sync> = match config.log_format() {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
        LogFormat::Pretty => Box::new(builder.pretty().finish()),
    };
    Ok(subscriber)
}

fn parse_filter(filter: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(filter).map_err(|source| TelemetryError::Filter {
        filter: filter.to_owned(),
        source,
    })
}
