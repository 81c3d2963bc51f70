#![forbid(unsafe_code)]

//! Demo error type.

use std::fmt;
use std::io;

use glitch_runtime::ConfigError;

/// Anything that stops the demo from starting or running.
#[derive(Debug)]
pub enum DemoError {
    /// Terminal or log file I/O failed.
    Io(io::Error),
    /// An environment override was invalid.
    Config(ConfigError),
    /// A command-line argument was invalid.
    Usage(String),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Usage(msg) => write!(f, "{msg}\nRun with --help for usage information."),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Usage(_) => None,
        }
    }
}

impl From<io::Error> for DemoError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConfigError> for DemoError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_error_is_wrapped_with_source() {
        let err: DemoError = ConfigError {
            var: "GLITCH_SEED",
            value: "x".into(),
            reason: "expected a non-negative integer",
        }
        .into();
        assert!(err.to_string().starts_with("configuration error: invalid GLITCH_SEED"));
        assert!(err.source().is_some());
    }

    #[test]
    fn io_error_converts() {
        let err: DemoError = io::Error::other("boom").into();
        assert!(matches!(err, DemoError::Io(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn usage_points_at_help() {
        let err = DemoError::Usage("Unknown argument: --nope".into());
        assert!(err.to_string().contains("--help"));
        assert!(err.source().is_none());
    }
}
