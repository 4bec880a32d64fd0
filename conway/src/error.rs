// error.rs - Error types
//
// The simulation itself cannot fail; only loading, saving and validating a
// configuration can.

use std::error::Error;
use std::fmt;
use std::io;

/// Errors from reading, writing or validating a [`Config`](crate::Config).
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read or written.
    Io(io::Error),
    /// The file is not valid YAML for a config.
    Parse(serde_yaml::Error),
    /// A field holds a value the simulation cannot run with.
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid { field, reason: reason.into() }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config i/o failed: {err}"),
            Self::Parse(err) => write!(f, "config is not valid YAML: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid `{field}`: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}
