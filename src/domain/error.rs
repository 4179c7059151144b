use std::io;

use thiserror::Error;

/// Library-wide error type for appindex operations.
///
/// Per-document validation problems are reported as data inside a
/// `ValidationReport`; this type covers failures that abort a whole run.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration documents directory does not exist.
    #[error("Configuration documents directory not found: {0}")]
    DocumentsDirNotFound(String),

    /// Document directory exists but holds no documents.
    #[error("No configuration documents found in {0}")]
    NoDocuments(String),

    /// Schema file missing, unparsable, or not a valid JSON Schema.
    #[error("Invalid schema {path}: {details}")]
    InvalidSchema { path: String, details: String },

    /// Two documents declare the same application name.
    #[error("Duplicate application name '{name}' declared by {first} and {second}")]
    DuplicateName { name: String, first: String, second: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers that classify failures.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidSchema { .. }
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::DocumentsDirNotFound(_) | AppError::NoDocuments(_) => {
                io::ErrorKind::NotFound
            }
            AppError::DuplicateName { .. } | AppError::Serialization(_) => {
                io::ErrorKind::InvalidData
            }
        }
    }
}
