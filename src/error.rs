//! Error types for ipcarrier.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for ipcarrier operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database file could not be opened (missing, permission denied, ...)
    #[error("failed to open database {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Database is shorter than the fixed header + first-octet index
    #[error("database too small: expected at least {expected} bytes, got {actual}")]
    TooSmall { expected: usize, actual: usize },

    /// Operation on a closed database handle
    #[error("I/O operation on closed database")]
    Closed,

    /// Malformed IPv4 address input
    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),

    /// A header-derived offset points outside the buffer
    #[error("corrupt database: read of {len} bytes at offset {offset} exceeds size {size}")]
    Corrupt { offset: usize, len: usize, size: usize },

    /// A first-octet index entry is neither -1 nor a record index in the table
    #[error("corrupt database: index entry for octet {octet} is {value}")]
    InvalidIndex { octet: u8, value: i32 },

    /// Hostname could not be resolved to an IPv4 address
    #[error("failed to resolve host: {0}")]
    Resolve(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error was produced while loading a database.
    pub fn is_open_error(&self) -> bool {
        matches!(self, Error::Open { .. } | Error::TooSmall { .. })
    }
}

/// Result type alias for ipcarrier operations.
pub type Result<T> = std::result::Result<T, Error>;
