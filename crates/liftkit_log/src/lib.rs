//! `liftkit_log` v1:
//! tracing-subscriber setup shared by the CLI and the Python binding.
//!
//! - `spec` : options, format switch, errors
//! - `init` : global subscriber installation
pub mod init;
pub mod spec;

pub use init::{derive_env_filter, init_logging};
pub use spec::{C_LOG_LEVEL_DEFAULT, EnumLogFormat, LogInitError, SpecLogOptions};
