//! Error types for synsim operations.
//!
//! The simulation core itself cannot fail. Errors come from the I/O around
//! it: reading parameters, interpreting command-line input and writing the
//! result table. Every error is fatal to the run that hit it.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for synsim operations.
pub type Result<T> = std::result::Result<T, SynsimError>;

/// Errors that can occur around a simulation run.
#[derive(Debug, Clone, Error)]
pub enum SynsimError {
    /// Parameter loading errors.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Result export errors.
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
    /// Malformed command-line arguments.
    #[error("Invalid arguments: {0}")]
    Arguments(String),
    /// I/O errors (wrapped).
    #[error("I/O error: {0}")]
    Io(String),
    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for SynsimError {
    fn from(e: std::io::Error) -> Self {
        SynsimError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SynsimError {
    fn from(e: serde_json::Error) -> Self {
        SynsimError::Serialization(e.to_string())
    }
}

impl From<csv::Error> for SynsimError {
    fn from(e: csv::Error) -> Self {
        SynsimError::Serialization(e.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Parameter file does not exist or cannot be opened.
    #[error("Could not open config file: {}", .0.display())]
    NotFound(PathBuf),
    /// File exists but is not valid in its format.
    #[error("Could not parse config file {}: {}", .path.display(), .reason)]
    Unparsable { path: PathBuf, reason: String },
    /// Required key missing.
    #[error("Configuration key '{0}' not found")]
    MissingKey(String),
    /// Value present but not a number (or not the expected type).
    #[error("Invalid numeric value for key '{key}': {value}")]
    MalformedValue { key: String, value: String },
    /// Number outside its admissible range.
    #[error("Value for key '{key}' out of range: {value} ({reason})")]
    OutOfRange {
        key: String,
        value: f64,
        reason: String,
    },
}

/// Result export errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutputError {
    /// Output file could not be created or written.
    #[error("Could not open output file {}: {}", .path.display(), .reason)]
    NotWritable { path: PathBuf, reason: String },
    /// Result file could not be read back.
    #[error("Could not read results from {}: {}", .path.display(), .reason)]
    Unreadable { path: PathBuf, reason: String },
    /// Conflicting output settings.
    #[error("Invalid output target: {0}")]
    InvalidTarget(String),
}

// Convenience constructors
impl SynsimError {
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        SynsimError::Config(ConfigError::NotFound(path.into()))
    }

    pub fn missing_key(key: impl Into<String>) -> Self {
        SynsimError::Config(ConfigError::MissingKey(key.into()))
    }

    pub fn malformed_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        SynsimError::Config(ConfigError::MalformedValue {
            key: key.into(),
            value: value.into(),
        })
    }

    pub fn out_of_range(key: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        SynsimError::Config(ConfigError::OutOfRange {
            key: key.into(),
            value,
            reason: reason.into(),
        })
    }

    pub fn not_writable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        SynsimError::Output(OutputError::NotWritable {
            path: path.into(),
            reason: reason.to_string(),
        })
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        SynsimError::Arguments(msg.into())
    }

    /// The configuration key this error is about, if any.
    pub fn offending_key(&self) -> Option<&str> {
        match self {
            SynsimError::Config(ConfigError::MissingKey(key)) => Some(key),
            SynsimError::Config(ConfigError::MalformedValue { key, .. }) => Some(key),
            SynsimError::Config(ConfigError::OutOfRange { key, .. }) => Some(key),
            _ => None,
        }
    }
}
