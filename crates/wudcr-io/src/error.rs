//! [`IoError`]: the stable error kind this crate's parsers/writers raise,
//! covering I/O failure, malformed input, and (de)serialization errors.

use std::fmt;

/// A failure reading or writing a graph, snapshot, or statistics record.
#[derive(Debug)]
pub enum IoError {
    /// A filesystem/stream operation failed.
    Io {
        path: String,
        source: std::io::Error,
    },
    /// The input text was malformed (bad token, empty input, degree < 2).
    Parse { path: String, message: String },
    /// JSON/CBOR (de)serialization failed.
    Serde { path: String, message: String },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoError::Io { path, source } => write!(f, "I/O error on {path}: {source}"),
            IoError::Parse { path, message } => write!(f, "parse error in {path}: {message}"),
            IoError::Serde { path, message } => write!(f, "serialization error in {path}: {message}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::Io { source, .. } => Some(source),
            IoError::Parse { .. } | IoError::Serde { .. } => None,
        }
    }
}
