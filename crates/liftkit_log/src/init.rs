//! Global subscriber installation.

use std::io;

use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, registry};

use crate::spec::{EnumLogFormat, LogInitError, SpecLogOptions};

/// Build the filter: `RUST_LOG` when set and valid, else `options.level`.
pub fn derive_env_filter(options: &SpecLogOptions) -> Result<EnvFilter, LogInitError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&options.level).map_err(|err| LogInitError::InvalidFilter {
        level: options.level.clone(),
        message: err.to_string(),
    })
}

/// Install the global tracing subscriber, writing to stderr.
///
/// Returns `Ok(false)` when a global subscriber was already installed, so calling
/// this more than once is harmless.
pub fn init_logging(options: &SpecLogOptions) -> Result<bool, LogInitError> {
    let env_filter = derive_env_filter(options)?;
    let registry = registry().with(env_filter);

    let result = match options.format {
        EnumLogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(options.if_ansi)
                    .with_writer(io::stderr),
            )
            .try_init(),
        EnumLogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_ansi(options.if_ansi)
                    .with_writer(io::stderr),
            )
            .try_init(),
        EnumLogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
    };

    Ok(result.is_ok())
}
