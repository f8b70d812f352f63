//! Logging options and errors.

use std::fmt;
use std::str::FromStr;

/// Default filter directive when neither options nor `RUST_LOG` set one.
pub const C_LOG_LEVEL_DEFAULT: &str = "info";

/// Output layout of the fmt subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumLogFormat {
    /// Multi-line human output.
    Pretty,
    /// Single-line human output (default).
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl EnumLogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for EnumLogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnumLogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "Unknown log format {other:?}; expected pretty, compact or json."
            )),
        }
    }
}

/// Subscriber options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLogOptions {
    /// `EnvFilter` directive, e.g. `info` or `liftkit_e1rm=debug`.
    /// `RUST_LOG` wins when set.
    pub level: String,
    pub format: EnumLogFormat,
    /// Emit ANSI colors (ignored for json).
    pub if_ansi: bool,
}

impl Default for SpecLogOptions {
    fn default() -> Self {
        Self {
            level: C_LOG_LEVEL_DEFAULT.to_string(),
            format: EnumLogFormat::Compact,
            if_ansi: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    #[error("Invalid log filter {level:?}: {message}")]
    InvalidFilter { level: String, message: String },
}
